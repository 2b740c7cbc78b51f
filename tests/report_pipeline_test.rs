// tests/report_pipeline_test.rs

use byteorder::{BigEndian, WriteBytesExt};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use sleep_log_render::config::AnalysisConfig;
use sleep_log_render::error::{LogParseError, ReportError};
use sleep_log_render::report::pagination::WindowData;
use sleep_log_render::report::process_latest_recording;
use sleep_log_render::report::renderer::{BitmapRenderer, ReportRenderer};

/// Writes empty image files and remembers what it was asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    interval_points: Option<usize>,
    windows: Vec<(usize, usize, PathBuf)>,
}

impl ReportRenderer for RecordingRenderer {
    fn render_sample_intervals(
        &mut self,
        elapsed: &[f64],
        intervals: &[f64],
        output_file: &Path,
    ) -> Result<(u32, u32), Box<dyn Error>> {
        assert_eq!(intervals.len() + 1, elapsed.len());
        self.interval_points = Some(intervals.len());
        fs::write(output_file, b"")?;
        Ok((1800, 300))
    }

    fn render_window(
        &mut self,
        window: &WindowData,
        output_file: &Path,
    ) -> Result<(u32, u32), Box<dyn Error>> {
        assert!(!window.title.is_empty());
        assert_eq!(window.stomach.len(), window.elapsed.len());
        self.windows
            .push((window.index, window.elapsed.len(), output_file.to_path_buf()));
        fs::write(output_file, b"")?;
        Ok((1800, 900))
    }
}

fn write_binary_recording(path: &Path, samples: usize) {
    let mut buf = Vec::new();
    buf.write_i64::<BigEndian>(1_700_000_000_000).unwrap();
    for i in 0..samples {
        buf.write_i64::<BigEndian>(1_700_000_000_000_000_000 + i as i64 * 40_000_000)
            .unwrap();
        let t = i as f32 * 0.04;
        let values = [
            (t * 1.5).sin() * 0.1, // position
            0.0,
            0.0,
            0.1,
            -0.2,
            500.0 + (t * 1.5).cos() * 20.0, // thermistor
            97.0,
            62.0,
            1.3,
            0.0,
        ];
        for v in values {
            buf.write_f32::<BigEndian>(v).unwrap();
        }
    }
    fs::write(path, buf).unwrap();
}

fn config_for(input: &Path, output: &Path) -> AnalysisConfig {
    AnalysisConfig {
        input_folder: input.to_path_buf(),
        output_folder: output.to_path_buf(),
        window_size: 1000,
    }
}

#[test]
fn test_latest_binary_recording_is_paginated() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_binary_recording(&input.path().join("2024-01-01.dat"), 10);
    write_binary_recording(&input.path().join("2024-01-02.dat"), 2500);

    let mut renderer = RecordingRenderer::default();
    let summary = process_latest_recording(&config_for(input.path(), output.path()), &mut renderer).unwrap();

    let report_folder = output.path().join("2024-01-02.dat");
    assert_eq!(summary.report_path, report_folder.join("2024-01-02.dat.html"));
    assert_eq!(summary.windows, 3);
    assert_eq!(renderer.interval_points, Some(2499));

    let sizes: Vec<usize> = renderer.windows.iter().map(|(_, len, _)| *len).collect();
    assert_eq!(sizes, vec![1000, 1000, 500]);
    let indices: Vec<usize> = renderer.windows.iter().map(|(index, _, _)| *index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    for (_, _, file) in &renderer.windows {
        assert!(file.starts_with(report_folder.join("resources")));
        assert!(file.is_file());
    }

    let html = fs::read_to_string(&summary.report_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<img src=\"./resources/res_0.png\" width=\"1800\" height=\"300\">"));
    for n in 1..=3 {
        assert!(html.contains(&format!("<img src=\"./resources/res_{}.png\" width=\"1800\" height=\"900\">", n)));
    }
    assert_eq!(html.matches("<tr>").count(), 3);
    assert!(!html.contains("res_4.png"));
}

#[test]
fn test_text_recording_is_rendered() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let mut text = String::new();
    for i in 0..5 {
        text.push_str(&format!(
            "{},0.01,0,0,0.1,0.2,500,97,60,1.1,0\n",
            1_700_000_000_000_000_000_i64 + i * 40_000_000
        ));
    }
    fs::write(input.path().join("night.csv"), text).unwrap();

    let mut renderer = RecordingRenderer::default();
    let summary = process_latest_recording(&config_for(input.path(), output.path()), &mut renderer).unwrap();
    assert_eq!(summary.windows, 1);
    assert_eq!(renderer.windows[0].1, 5);
}

#[test]
fn test_text_parse_error_names_record() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join("broken.csv"),
        "0,0,0,0,0,0,500,97,60,1,0\n40000000,0,0,0,0,0,warm,97,60,1,0\n",
    )
    .unwrap();

    let mut renderer = RecordingRenderer::default();
    let err = process_latest_recording(&config_for(input.path(), output.path()), &mut renderer).unwrap_err();
    match err.downcast_ref::<LogParseError>() {
        Some(LogParseError::InvalidField { record, field, value }) => {
            assert_eq!(*record, 1);
            assert_eq!(*field, "thermistor");
            assert_eq!(value, "warm");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(renderer.windows.is_empty());
}

#[test]
fn test_empty_recording_is_rejected() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_binary_recording(&input.path().join("empty.dat"), 0);

    let mut renderer = RecordingRenderer::default();
    let err = process_latest_recording(&config_for(input.path(), output.path()), &mut renderer).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReportError>(),
        Some(ReportError::EmptyRecording { .. })
    ));
}

#[test]
fn test_missing_recordings_are_reported() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut renderer = RecordingRenderer::default();
    let err = process_latest_recording(&config_for(input.path(), output.path()), &mut renderer).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ReportError>(),
        Some(ReportError::NoRecordings { .. })
    ));
}

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{} is not a PNG", path.display());
}

#[test]
fn test_bitmap_renderer_writes_png_resources() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_binary_recording(&input.path().join("night.dat"), 2500);

    let summary = process_latest_recording(&config_for(input.path(), output.path()), &mut BitmapRenderer).unwrap();
    assert_eq!(summary.windows, 3);

    let resources = output.path().join("night.dat").join("resources");
    for n in 0..=3 {
        assert_png(&resources.join(format!("res_{}.png", n)));
    }
    assert!(!resources.join("res_4.png").exists());
}

#[test]
fn test_bitmap_renderer_single_sample_recording() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_binary_recording(&input.path().join("short.dat"), 1);

    let summary = process_latest_recording(&config_for(input.path(), output.path()), &mut BitmapRenderer).unwrap();
    assert_eq!(summary.windows, 1);

    let resources = output.path().join("short.dat").join("resources");
    assert_png(&resources.join("res_0.png"));
    assert_png(&resources.join("res_1.png"));
}
