// src/report/pagination.rs

use chrono::{DateTime, TimeZone, Utc};
use ndarray::Array1;
use std::fmt::Display;
use std::ops::Range;

use crate::data_analysis::derived_signals::DerivedSignals;
use crate::data_input::log_data::Recording;

/// Splits `len` samples into consecutive windows of `window_size`; the last may be shorter.
pub fn paginate(len: usize, window_size: usize) -> Vec<Range<usize>> {
    if window_size == 0 {
        return Vec::new();
    }
    (0..len)
        .step_by(window_size)
        .map(|start| start..(start + window_size).min(len))
        .collect()
}

/// Wall-clock time of a window start: recording start plus the window's elapsed offset.
pub fn window_start_time(start_ms: f64, elapsed_s: f64) -> Option<DateTime<Utc>> {
    let micros = (start_ms * 1.0e3 + elapsed_s * 1.0e6).round();
    if !micros.is_finite() {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

/// `YYYY-MM-DD HH:MM:SS`, with microseconds appended only when non-zero.
pub fn format_window_title<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    if time.timestamp_subsec_micros() == 0 {
        time.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        time.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

/// Whole-recording series in the form the report plots them.
#[derive(Debug, Clone)]
pub struct ReportSignals {
    pub elapsed: Array1<f64>,
    /// Positions negated so that inhaling plots upwards.
    pub stomach: Array1<f64>,
    pub thermistor_low_pass: Array1<f64>,
    pub pitch_deg: Array1<f64>,
    pub roll_deg: Array1<f64>,
    pub spo2: Array1<f64>,
    pub pulse_rate: Array1<f64>,
    pub perfusion_index: Array1<f64>,
    pub mean_spo2_wave: Array1<f64>,
}

impl ReportSignals {
    pub fn new(recording: &Recording, derived: &DerivedSignals) -> Self {
        ReportSignals {
            elapsed: derived.elapsed.clone(),
            stomach: recording.positions.mapv(|p| -p),
            thermistor_low_pass: derived.thermistor_low_pass.clone(),
            pitch_deg: recording.pitch.mapv(f64::to_degrees),
            roll_deg: recording.roll.mapv(f64::to_degrees),
            spo2: recording.spo2.clone(),
            pulse_rate: recording.pulse_rate.clone(),
            perfusion_index: recording.perfusion_index.clone(),
            mean_spo2_wave: recording.mean_spo2_wave.clone(),
        }
    }

    /// Borrows the samples of one window.
    pub fn window(&self, index: usize, range: &Range<usize>, title: String) -> WindowData<'_> {
        WindowData {
            index,
            title,
            elapsed: window_slice(&self.elapsed, range),
            stomach: window_slice(&self.stomach, range),
            thermistor_low_pass: window_slice(&self.thermistor_low_pass, range),
            pitch_deg: window_slice(&self.pitch_deg, range),
            roll_deg: window_slice(&self.roll_deg, range),
            spo2: window_slice(&self.spo2, range),
            pulse_rate: window_slice(&self.pulse_rate, range),
            perfusion_index: window_slice(&self.perfusion_index, range),
            mean_spo2_wave: window_slice(&self.mean_spo2_wave, range),
        }
    }
}

fn window_slice<'a>(values: &'a Array1<f64>, range: &Range<usize>) -> &'a [f64] {
    let all = values.as_slice().unwrap_or(&[]);
    &all[range.start.min(all.len())..range.end.min(all.len())]
}

/// Everything needed to draw one report page.
#[derive(Debug, Clone)]
pub struct WindowData<'a> {
    pub index: usize,
    pub title: String,
    pub elapsed: &'a [f64],
    pub stomach: &'a [f64],
    pub thermistor_low_pass: &'a [f64],
    pub pitch_deg: &'a [f64],
    pub roll_deg: &'a [f64],
    pub spo2: &'a [f64],
    pub pulse_rate: &'a [f64],
    pub perfusion_index: &'a [f64],
    pub mean_spo2_wave: &'a [f64],
}


// src/report/pagination.rs
