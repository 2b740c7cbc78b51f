// src/config.rs

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_INPUT_FOLDER, DEFAULT_OUTPUT_FOLDER, DEFAULT_WINDOW_SIZE};
use crate::error::ReportError;

/// Where recordings are read from, where reports go, and how they are paginated.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    /// Samples per report page.
    pub window_size: usize,
}

impl AnalysisConfig {
    /// Builds a config from user-supplied paths, expanding `~` and `$VAR`.
    pub fn new(input_folder: &str, output_folder: &str, window_size: usize) -> Result<Self, ReportError> {
        Ok(AnalysisConfig {
            input_folder: expand_path(input_folder)?,
            output_folder: expand_path(output_folder)?,
            window_size,
        })
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            input_folder: PathBuf::from(shellexpand::tilde(DEFAULT_INPUT_FOLDER).as_ref()),
            output_folder: PathBuf::from(shellexpand::tilde(DEFAULT_OUTPUT_FOLDER).as_ref()),
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

pub fn expand_path(path: &str) -> Result<PathBuf, ReportError> {
    let expanded = shellexpand::full(path).map_err(|source| ReportError::PathExpansion {
        path: path.to_string(),
        source,
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// The recording whose file name sorts last. Recordings are named by start time,
/// so this is the most recent one. Folders and hidden files are skipped.
pub fn latest_recording(folder: &Path) -> Result<PathBuf, ReportError> {
    let mut latest: Option<PathBuf> = None;
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if latest.as_ref().map_or(true, |best| path.file_name() > best.file_name()) {
            latest = Some(path);
        }
    }
    let latest = latest.ok_or_else(|| ReportError::NoRecordings {
        folder: folder.to_path_buf(),
    })?;
    debug!("Latest recording in '{}': '{}'", folder.display(), latest.display());
    Ok(latest)
}


// src/config.rs
