// src/report/mod.rs

pub mod html;
pub mod pagination;
pub mod renderer;

use chrono::Local;
use log::{info, warn};
use std::error::Error;
use std::path::PathBuf;

use crate::config::{latest_recording, AnalysisConfig};
use crate::constants::{RESOURCE_FOLDER_NAME, REPORT_EXTENSION};
use crate::data_analysis::derived_signals::{sample_intervals, ChannelSummary, DerivedSignals};
use crate::data_input::log_data::Recording;
use crate::data_input::log_parser::parse_log_file;
use crate::error::ReportError;
use html::{image, table, HtmlDocument};
use pagination::{format_window_title, paginate, window_start_time, ReportSignals};
use renderer::ReportRenderer;

const IMAGE_EXTENSION: &str = "png";

/// Outcome of one report run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub report_path: PathBuf,
    /// Number of paginated windows, not counting the sample interval overview.
    pub windows: usize,
}

/// Writes `output_folder/<name>/<name>.html` for a loaded recording, with its
/// images under `output_folder/<name>/resources/`.
pub fn generate_report<R: ReportRenderer>(
    recording: &Recording,
    derived: &DerivedSignals,
    config: &AnalysisConfig,
    renderer: &mut R,
) -> Result<ReportSummary, Box<dyn Error>> {
    if recording.is_empty() {
        return Err(ReportError::EmptyRecording {
            path: recording.path.clone(),
        }
        .into());
    }
    let name = recording
        .path
        .file_name()
        .ok_or_else(|| ReportError::NoFileName {
            path: recording.path.clone(),
        })?
        .to_string_lossy()
        .into_owned();

    let report_folder = config.output_folder.join(&name);
    let report_path = report_folder.join(format!("{}.{}", name, REPORT_EXTENSION));
    let mut document = HtmlDocument::new(&report_path, &report_folder.join(RESOURCE_FOLDER_NAME))?;

    let signals = ReportSignals::new(recording, derived);
    let elapsed = signals.elapsed.to_vec();

    let (overview_file, overview_src) = document.resource_paths(IMAGE_EXTENSION);
    let (width, height) =
        renderer.render_sample_intervals(&elapsed, &sample_intervals(&elapsed), &overview_file)?;
    document.add(image(&overview_src, width, height));

    let start_ms = recording.start_ms().unwrap_or(0.0);
    let windows = paginate(elapsed.len(), config.window_size);
    let mut rows = Vec::with_capacity(windows.len());
    for (index, range) in windows.iter().enumerate() {
        let title = match window_start_time(start_ms, elapsed[range.start]) {
            Some(start) => format_window_title(&start.with_timezone(&Local)),
            None => {
                warn!("Window {} start time is out of range", index);
                format!("Window {}", index)
            }
        };
        let window = signals.window(index, range, title);
        let (window_file, window_src) = document.resource_paths(IMAGE_EXTENSION);
        let (width, height) = renderer.render_window(&window, &window_file)?;
        rows.push(vec![image(&window_src, width, height)]);
        info!("Rendered window {}/{}: {}", index + 1, windows.len(), window.title);
    }
    document.add(table(rows));
    document.save()?;

    if let Some(summary) = ChannelSummary::of(&recording.positions) {
        info!("{} points, min {}, max {}", summary.count, summary.min, summary.max);
    }

    Ok(ReportSummary {
        report_path: document.report_path().to_path_buf(),
        windows: windows.len(),
    })
}

/// Picks the most recent recording in the input folder and writes its report.
pub fn process_latest_recording<R: ReportRenderer>(
    config: &AnalysisConfig,
    renderer: &mut R,
) -> Result<ReportSummary, Box<dyn Error>> {
    let path = latest_recording(&config.input_folder)?;
    info!("Processing '{}'", path.display());

    let recording = parse_log_file(&path)?;
    let derived = DerivedSignals::from_recording(&recording)?;
    generate_report(&recording, &derived, config, renderer)
}

// src/report/mod.rs
