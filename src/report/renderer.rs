// src/report/renderer.rs

use std::error::Error;
use std::path::Path;

use crate::plot_functions::plot_sample_intervals::plot_sample_intervals;
use crate::plot_functions::plot_window::plot_window;
use crate::report::pagination::WindowData;

/// Draws the report images. Each method writes one image to `output_file` and
/// returns its size in pixels.
pub trait ReportRenderer {
    fn render_sample_intervals(
        &mut self,
        elapsed: &[f64],
        intervals: &[f64],
        output_file: &Path,
    ) -> Result<(u32, u32), Box<dyn Error>>;

    fn render_window(
        &mut self,
        window: &WindowData,
        output_file: &Path,
    ) -> Result<(u32, u32), Box<dyn Error>>;
}

/// PNG output through the plotters bitmap backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct BitmapRenderer;

impl ReportRenderer for BitmapRenderer {
    fn render_sample_intervals(
        &mut self,
        elapsed: &[f64],
        intervals: &[f64],
        output_file: &Path,
    ) -> Result<(u32, u32), Box<dyn Error>> {
        plot_sample_intervals(elapsed, intervals, output_file)
    }

    fn render_window(
        &mut self,
        window: &WindowData,
        output_file: &Path,
    ) -> Result<(u32, u32), Box<dyn Error>> {
        plot_window(window, output_file)
    }
}

// src/report/renderer.rs
