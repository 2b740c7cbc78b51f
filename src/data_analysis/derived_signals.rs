// src/data_analysis/derived_signals.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::constants::{
    FILTER_ORDER, NANOS_PER_SECOND, POSITION_HIGH_PASS_CUTOFF, POSITION_LOW_PASS_CUTOFF,
    THERMISTOR_LOW_PASS_CUTOFF, THERMISTOR_SCALE,
};
use crate::data_analysis::butterworth::{butter, filter_with_initial_steady_state, FilterKind};
use crate::data_input::log_data::Recording;
use crate::error::FilterDesignError;

/// Signals computed once from a recording at load time.
#[derive(Debug, Clone)]
pub struct DerivedSignals {
    /// Seconds since the first sample.
    pub elapsed: Array1<f64>,
    /// Mean-centered, scaled thermistor.
    pub thermistor: Array1<f64>,
    pub low_pass: Array1<f64>,
    pub high_pass: Array1<f64>,
    pub thermistor_low_pass: Array1<f64>,
}

impl DerivedSignals {
    pub fn from_recording(recording: &Recording) -> Result<Self, FilterDesignError> {
        let elapsed = elapsed_seconds(&recording.timestamps);
        let thermistor = normalize_thermistor(&recording.thermistor);

        let low_pass = apply_filter(&recording.positions, POSITION_LOW_PASS_CUTOFF, FilterKind::LowPass)?;
        let high_pass = apply_filter(&recording.positions, POSITION_HIGH_PASS_CUTOFF, FilterKind::HighPass)?;
        let thermistor_low_pass = apply_filter(&thermistor, THERMISTOR_LOW_PASS_CUTOFF, FilterKind::LowPass)?;

        Ok(DerivedSignals {
            elapsed,
            thermistor,
            low_pass,
            high_pass,
            thermistor_low_pass,
        })
    }
}

/// `t / 1e9 - t0 / 1e9`, so the first value is exactly zero.
pub fn elapsed_seconds(timestamps_ns: &Array1<f64>) -> Array1<f64> {
    let Some(&first) = timestamps_ns.first() else {
        return Array1::zeros(0);
    };
    let first_s = first / NANOS_PER_SECOND;
    timestamps_ns.mapv(|t| t / NANOS_PER_SECOND - first_s)
}

pub fn normalize_thermistor(thermistor: &Array1<f64>) -> Array1<f64> {
    match thermistor.mean() {
        Some(mean) => thermistor.mapv(|v| (v - mean) * THERMISTOR_SCALE),
        None => Array1::zeros(0),
    }
}

fn apply_filter(
    signal: &Array1<f64>,
    cutoff: f64,
    kind: FilterKind,
) -> Result<Array1<f64>, FilterDesignError> {
    let coeffs = butter(FILTER_ORDER, cutoff, kind)?;
    let input = signal.to_vec();
    Ok(Array1::from(filter_with_initial_steady_state(&coeffs, &input)))
}

/// Time between successive readings, one element shorter than `elapsed`.
pub fn sample_intervals(elapsed: &[f64]) -> Vec<f64> {
    elapsed.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Point count and range of a channel, printed at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
}

impl ChannelSummary {
    pub fn of(values: &Array1<f64>) -> Option<Self> {
        let min = *values.min().ok()?;
        let max = *values.max().ok()?;
        Some(ChannelSummary {
            count: values.len(),
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::log_data::Sample;
    use std::path::PathBuf;

    fn recording(n: usize) -> Recording {
        let start_ns = 1_700_000_000_000_000_000.0;
        let samples: Vec<Sample> = (0..n)
            .map(|i| {
                let t = start_ns + i as f64 * 40_000_000.0;
                let pos = (i as f64 * 0.2).sin() * 0.1;
                [t, pos, 0.0, 0.0, 0.1, -0.1, 500.0 + (i % 7) as f64, 97.0, 60.0, 2.0, 0.5]
            })
            .collect();
        Recording::from_samples(PathBuf::from("r.dat"), Some(1_700_000_000_000), &samples)
    }

    #[test]
    fn test_elapsed_starts_at_zero_and_is_monotonic() {
        let rec = recording(300);
        let elapsed = elapsed_seconds(&rec.timestamps);
        assert_eq!(elapsed[0], 0.0);
        for w in elapsed.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert!((elapsed[299] - 299.0 * 0.04).abs() < 1e-5);
    }

    #[test]
    fn test_elapsed_matches_reference_expression() {
        let ts = Array1::from(vec![1.5e18, 1.5e18 + 123_456_789.0]);
        let elapsed = elapsed_seconds(&ts);
        assert_eq!(elapsed[1], ts[1] / 1.0e9 - ts[0] / 1.0e9);
    }

    #[test]
    fn test_thermistor_normalization() {
        let raw = Array1::from(vec![10.0, 20.0, 30.0]);
        let norm = normalize_thermistor(&raw);
        assert_eq!(norm.to_vec(), vec![-0.2, 0.0, 0.2]);
    }

    #[test]
    fn test_derived_lengths_match_input() {
        let rec = recording(257);
        let derived = DerivedSignals::from_recording(&rec).unwrap();
        assert_eq!(derived.elapsed.len(), 257);
        assert_eq!(derived.low_pass.len(), 257);
        assert_eq!(derived.high_pass.len(), 257);
        assert_eq!(derived.thermistor_low_pass.len(), 257);
    }

    #[test]
    fn test_empty_recording_derives_empty_signals() {
        let rec = Recording::from_samples(PathBuf::from("e.dat"), Some(0), &[]);
        let derived = DerivedSignals::from_recording(&rec).unwrap();
        assert!(derived.elapsed.is_empty());
        assert!(derived.thermistor_low_pass.is_empty());
    }

    #[test]
    fn test_sample_intervals() {
        assert_eq!(sample_intervals(&[0.0, 0.5, 1.5]), vec![0.5, 1.0]);
        assert!(sample_intervals(&[0.0]).is_empty());
    }

    #[test]
    fn test_channel_summary() {
        let s = ChannelSummary::of(&Array1::from(vec![3.0, -1.0, 2.0])).unwrap();
        assert_eq!(s, ChannelSummary { count: 3, min: -1.0, max: 3.0 });
        assert!(ChannelSummary::of(&Array1::zeros(0)).is_none());
    }
}

// src/data_analysis/derived_signals.rs
