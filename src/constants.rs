// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREEN, ORANGE};
use plotters::style::RGBColor;

// --- Input format ---

/// Extension of the binary log format. Everything else is parsed as comma-delimited text.
pub const BINARY_LOG_EXTENSION: &str = "dat";

/// Number of parallel channels in every sample (timestamp + ten measurements).
pub const CHANNEL_COUNT: usize = 11;

// Binary layout: i64 start timestamp (ms), then records of one i64 timestamp (ns)
// followed by CHANNEL_COUNT - 1 big-endian f32 values.
pub const BINARY_HEADER_SIZE: usize = 8;
pub const BINARY_RECORD_SIZE: usize = 8 + (CHANNEL_COUNT - 1) * 4;

pub const NANOS_PER_SECOND: f64 = 1.0e9;
pub const NANOS_PER_MILLI: f64 = 1.0e6;

// --- Signal derivation ---

pub const FILTER_ORDER: usize = 3;
// Cutoffs are normalized to the Nyquist frequency.
pub const POSITION_LOW_PASS_CUTOFF: f64 = 0.1;
pub const POSITION_HIGH_PASS_CUTOFF: f64 = 0.3;
pub const THERMISTOR_LOW_PASS_CUTOFF: f64 = 0.15;
pub const THERMISTOR_SCALE: f64 = 0.02;

// --- Report layout ---

pub const DEFAULT_INPUT_FOLDER: &str = "~/SleepData";
pub const DEFAULT_OUTPUT_FOLDER: &str = "~/SleepData/plots";
pub const DEFAULT_WINDOW_SIZE: usize = 1000;
pub const RESOURCE_FOLDER_NAME: &str = "resources";
pub const RESOURCE_PREFIX: &str = "res_";
pub const REPORT_EXTENSION: &str = "html";

// Plot dimensions. One panel is PLOT_WIDTH x PANEL_HEIGHT; window plots stack three.
pub const PLOT_WIDTH: u32 = 1800;
pub const PANEL_HEIGHT: u32 = 300;
pub const WINDOW_PANEL_COUNT: usize = 3;
pub const WINDOW_PLOT_HEIGHT: u32 = PANEL_HEIGHT * WINDOW_PANEL_COUNT as u32;

// Fixed axis limits for the breathing panel.
pub const BREATHING_Y_MIN: f64 = -0.2;
pub const BREATHING_Y_MAX: f64 = 0.3;
pub const ANGLE_Y_MIN: f64 = -180.0;
pub const ANGLE_Y_MAX: f64 = 180.0;

// Non-zero autoscale: pad by this fraction of max(span, MIN_AUTOSCALE_SPAN).
pub const AUTOSCALE_MARGIN_FRACTION: f64 = 0.05;
pub const MIN_AUTOSCALE_SPAN: f64 = 0.1;

// --- Fonts ---
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 18;

// --- Plot Color Assignments ---
pub const COLOR_PRIMARY: &RGBColor = &BLUE;
pub const COLOR_SECONDARY: &RGBColor = &GREEN;
pub const COLOR_AIRFLOW: &RGBColor = &ORANGE;
pub const COLOR_ROLL: RGBColor = RGBColor(0xe6, 0xa8, 0x00);
pub const COLOR_SAMPLE_INTERVAL: &RGBColor = &BLUE;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// src/constants.rs
