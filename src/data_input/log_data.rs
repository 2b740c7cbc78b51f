// src/data_input/log_data.rs

use ndarray::Array1;
use std::path::PathBuf;

use crate::constants::{CHANNEL_COUNT, NANOS_PER_MILLI};

/// One sample as stored in the log: timestamp (ns) followed by ten measurements.
pub type Sample = [f64; CHANNEL_COUNT];

/// A fully loaded recording. Every channel has the same length and samples are in
/// acquisition order.
#[derive(Debug, Clone)]
pub struct Recording {
    pub path: PathBuf,
    /// Recording start in milliseconds since the Unix epoch, when the log carries one.
    pub start_timestamp_ms: Option<i64>,
    pub timestamps: Array1<f64>,      // Sample timestamp (ns).
    pub positions: Array1<f64>,       // Stomach acceleration measure.
    pub angles: Array1<f64>,
    pub azimuth: Array1<f64>,         // Orientation (rad).
    pub pitch: Array1<f64>,           // Orientation (rad).
    pub roll: Array1<f64>,            // Orientation (rad).
    pub thermistor: Array1<f64>,      // Raw airflow thermistor reading.
    pub spo2: Array1<f64>,
    pub pulse_rate: Array1<f64>,      // BPM.
    pub perfusion_index: Array1<f64>,
    pub mean_spo2_wave: Array1<f64>,
}

impl Recording {
    /// Splits row-oriented samples into channels.
    pub fn from_samples(path: PathBuf, start_timestamp_ms: Option<i64>, samples: &[Sample]) -> Self {
        let column = |idx: usize| samples.iter().map(|s| s[idx]).collect::<Array1<f64>>();
        Recording {
            path,
            start_timestamp_ms,
            timestamps: column(0),
            positions: column(1),
            angles: column(2),
            azimuth: column(3),
            pitch: column(4),
            roll: column(5),
            thermistor: column(6),
            spo2: column(7),
            pulse_rate: column(8),
            perfusion_index: column(9),
            mean_spo2_wave: column(10),
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Start of the recording in ms. Text logs have no header, so the first sample stands in.
    pub fn start_ms(&self) -> Option<f64> {
        self.start_timestamp_ms
            .map(|ms| ms as f64)
            .or_else(|| self.timestamps.first().map(|ns| ns / NANOS_PER_MILLI))
    }
}


// src/data_input/log_data.rs
