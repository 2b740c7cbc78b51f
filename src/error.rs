// src/error.rs

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum LogParseError {
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
    #[error("file is {len} bytes, too short for the {expected}-byte start timestamp")]
    TruncatedHeader { len: usize, expected: usize },
    #[error("record {record}: expected {expected} fields, found {found}")]
    FieldCount {
        record: usize,
        expected: usize,
        found: usize,
    },
    #[error("record {record}: cannot parse {field} value '{value}' as a number")]
    InvalidField {
        record: usize,
        field: &'static str,
        value: String,
    },
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterDesignError {
    #[error("filter order must be at least 1")]
    ZeroOrder,
    #[error("normalized cutoff {0} must lie strictly between 0 and 1")]
    InvalidCutoff(f64),
}

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("no recordings found in {}", folder.display())]
    NoRecordings { folder: PathBuf },
    #[error("recording {} contains no samples", path.display())]
    EmptyRecording { path: PathBuf },
    #[error("cannot expand path '{path}': {source}")]
    PathExpansion {
        path: String,
        source: shellexpand::LookupError<std::env::VarError>,
    },
    #[error("path {} has no file name", path.display())]
    NoFileName { path: PathBuf },
}

// src/error.rs
