// src/report/html.rs

use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::RESOURCE_PREFIX;

const INDENT: &str = "  ";

/// A node of the report markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Element {
        tag: &'static str,
        attributes: Vec<(String, String)>,
        children: Vec<HtmlNode>,
        /// Void elements (`<img>`, `<meta>`) have no closing tag.
        void: bool,
    },
    Text(String),
}

impl HtmlNode {
    pub fn element(tag: &'static str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Element {
            tag,
            attributes: Vec::new(),
            children,
            void: false,
        }
    }

    fn write(&self, out: &mut String, level: usize) {
        let pad = INDENT.repeat(level);
        match self {
            HtmlNode::Text(text) => {
                out.push_str(&pad);
                out.push_str(&escape(text));
                out.push('\n');
            }
            HtmlNode::Element {
                tag,
                attributes,
                children,
                void,
            } => {
                out.push_str(&pad);
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
                }
                out.push('>');
                if *void {
                    out.push('\n');
                    return;
                }
                match children.as_slice() {
                    [] => {}
                    [HtmlNode::Text(text)] => out.push_str(&escape(text)),
                    _ => {
                        out.push('\n');
                        for child in children {
                            child.write(out, level + 1);
                        }
                        out.push_str(&pad);
                    }
                }
                out.push_str(&format!("</{}>\n", tag));
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn text(value: impl Into<String>) -> HtmlNode {
    HtmlNode::Text(value.into())
}

/// `<img>` with its pixel size. Spaces in the source path are percent-encoded.
pub fn image(src: &str, width: u32, height: u32) -> HtmlNode {
    HtmlNode::Element {
        tag: "img",
        attributes: vec![
            ("src".to_string(), src.replace(' ', "%20")),
            ("width".to_string(), width.to_string()),
            ("height".to_string(), height.to_string()),
        ],
        children: Vec::new(),
        void: true,
    }
}

pub fn td(child: HtmlNode) -> HtmlNode {
    HtmlNode::element("td", vec![child])
}

pub fn tr(cells: Vec<HtmlNode>) -> HtmlNode {
    HtmlNode::element("tr", cells)
}

/// `<table><tbody>` of plain cells.
pub fn table(rows: Vec<Vec<HtmlNode>>) -> HtmlNode {
    let rows = rows
        .into_iter()
        .map(|cells| tr(cells.into_iter().map(td).collect()))
        .collect();
    HtmlNode::element("table", vec![HtmlNode::element("tbody", rows)])
}

fn meta_charset() -> HtmlNode {
    HtmlNode::Element {
        tag: "meta",
        attributes: vec![("charset".to_string(), "utf-8".to_string())],
        children: Vec::new(),
        void: true,
    }
}

pub type StyleRule = (&'static str, Vec<(&'static str, &'static str)>);

fn default_styles() -> Vec<StyleRule> {
    let border = vec![
        ("border-width", "1px"),
        ("border-collapse", "collapse"),
        ("border-style", "solid"),
        ("border-color", "#000000"),
        ("padding", "10px 10px"),
    ];
    vec![
        ("html", vec![("font-size", "25px"), ("margin", "10px"), ("font-family", "Times New Roman")]),
        ("p", vec![("width", "70%"), ("margin-left", "auto"), ("margin-right", "auto")]),
        ("b", vec![("margin", "0")]),
        ("h1, h2, h3, h4, h5, h6", vec![("text-align", "center")]),
        ("td", vec![("margin", "5px")]),
        ("table.border", border.clone()),
        ("table.border th", border.clone()),
        ("table.border td", border),
    ]
}

/// `<style>` element holding the given rules on one line.
pub fn style(rules: &[StyleRule]) -> HtmlNode {
    let css = rules
        .iter()
        .map(|(selector, props)| {
            let body: Vec<String> = props.iter().map(|(k, v)| format!("{}: {};", k, v)).collect();
            format!("{} {{ {} }}", selector, body.join(" "))
        })
        .collect::<Vec<_>>()
        .join(" ");
    HtmlNode::element("style", vec![text(css)])
}

/// A report page plus the folder its images live in.
///
/// Images are referenced relative to the report file so the report folder can be moved as a whole.
pub struct HtmlDocument {
    report_path: PathBuf,
    resource_folder: PathBuf,
    body: Vec<HtmlNode>,
    next_resource: usize,
}

impl HtmlDocument {
    /// Creates the report and resource folders when they are missing.
    pub fn new(report_path: &Path, resource_folder: &Path) -> io::Result<Self> {
        if let Some(report_folder) = report_path.parent() {
            fs::create_dir_all(report_folder)?;
        }
        fs::create_dir_all(resource_folder)?;
        debug!("Report folders ready under '{}'", resource_folder.display());
        Ok(HtmlDocument {
            report_path: report_path.to_path_buf(),
            resource_folder: resource_folder.to_path_buf(),
            body: Vec::new(),
            next_resource: 0,
        })
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Allocates the next `res_<n>.<extension>` name and returns its absolute and
    /// report-relative paths.
    pub fn resource_paths(&mut self, extension: &str) -> (PathBuf, String) {
        let name = format!("{}{}.{}", RESOURCE_PREFIX, self.next_resource, extension);
        self.next_resource += 1;

        let absolute = self.resource_folder.join(&name);
        let relative = match self
            .report_path
            .parent()
            .and_then(|parent| self.resource_folder.strip_prefix(parent).ok())
        {
            Some(folder) if folder.as_os_str().is_empty() => format!("./{}", name),
            Some(folder) => format!("./{}/{}", folder.to_string_lossy().replace('\\', "/"), name),
            None => absolute.to_string_lossy().into_owned(),
        };
        (absolute, relative)
    }

    pub fn add(&mut self, node: HtmlNode) {
        self.body.push(node);
    }

    pub fn to_html(&self) -> String {
        let head = HtmlNode::element(
            "head",
            vec![
                meta_charset(),
                style(&default_styles()),
            ],
        );
        let body = HtmlNode::element("body", self.body.clone());
        let mut out = String::from("<!DOCTYPE html>\n");
        out.push_str(&HtmlNode::element("html", vec![head, body]).to_html());
        out
    }

    pub fn save(&self) -> io::Result<()> {
        fs::write(&self.report_path, self.to_html())?;
        info!("Saved report '{}'", self.report_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_is_void_and_encoded() {
        let html = image("./resources/my plot.png", 10, 20).to_html();
        assert_eq!(html, "<img src=\"./resources/my%20plot.png\" width=\"10\" height=\"20\">\n");
    }

    #[test]
    fn test_table_single_column() {
        let html = table(vec![vec![text("a")], vec![text("b & c")]]).to_html();
        let expected = "<table>\n  <tbody>\n    <tr>\n      <td>a</td>\n    </tr>\n    <tr>\n      <td>b &amp; c</td>\n    </tr>\n  </tbody>\n</table>\n";
        assert_eq!(html, expected);
    }

    #[test]
    fn test_document_structure_and_resources() {
        let dir = tempfile::tempdir().unwrap();
        let report_folder = dir.path().join("rec.dat");
        let report_path = report_folder.join("rec.dat.html");
        let mut doc = HtmlDocument::new(&report_path, &report_folder.join("resources")).unwrap();
        assert!(report_folder.join("resources").is_dir());

        let (abs0, rel0) = doc.resource_paths("png");
        let (_, rel1) = doc.resource_paths("png");
        assert_eq!(abs0, report_folder.join("resources").join("res_0.png"));
        assert_eq!(rel0, "./resources/res_0.png");
        assert_eq!(rel1, "./resources/res_1.png");

        doc.add(image(&rel0, 1, 1));
        doc.save().unwrap();
        let html = fs::read_to_string(&report_path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n  <head>\n"));
        assert!(html.contains("td { margin: 5px; }"));
        assert!(html.contains("<img src=\"./resources/res_0.png\""));
        assert!(html.trim_end().ends_with("</html>"));
    }
}

// src/report/html.rs
