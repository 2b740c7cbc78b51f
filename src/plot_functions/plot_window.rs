// src/plot_functions/plot_window.rs

use log::debug;
use plotters::backend::BitMapBackend;
use plotters::drawing::IntoDrawingArea;
use plotters::style::colors::WHITE;
use std::error::Error;
use std::path::Path;

use crate::constants::{
    ANGLE_Y_MAX, ANGLE_Y_MIN, BREATHING_Y_MAX, BREATHING_Y_MIN, COLOR_AIRFLOW, COLOR_PRIMARY,
    COLOR_ROLL, COLOR_SECONDARY, LINE_WIDTH_PLOT, PLOT_WIDTH, WINDOW_PANEL_COUNT,
    WINDOW_PLOT_HEIGHT,
};
use crate::plot_framework::{
    draw_panel, non_zero_y_limits, time_range, AxisConfig, PanelConfig, PlotSeries,
};
use crate::report::pagination::WindowData;

const X_LABEL: &str = "Elapsed (s)";

/// Breathing panel: stomach movement and airflow, with body angles on the right axis.
fn breathing_panel(window: &WindowData) -> PanelConfig {
    let x = window.elapsed;
    PanelConfig {
        title: window.title.clone(),
        x_label: X_LABEL.to_string(),
        x_range: time_range(x),
        primary: AxisConfig {
            label: "Acceleration Measure".to_string(),
            range: BREATHING_Y_MIN..BREATHING_Y_MAX,
            series: vec![
                PlotSeries::from_xy(x, window.stomach, "Stomach", *COLOR_PRIMARY, LINE_WIDTH_PLOT),
                PlotSeries::from_xy(x, window.thermistor_low_pass, "Airflow", *COLOR_AIRFLOW, LINE_WIDTH_PLOT),
            ],
        },
        secondary: Some(AxisConfig {
            label: "Pitch (Green), Roll (Orange)".to_string(),
            range: ANGLE_Y_MIN..ANGLE_Y_MAX,
            series: vec![
                PlotSeries::from_xy(x, window.pitch_deg, "", *COLOR_SECONDARY, LINE_WIDTH_PLOT),
                PlotSeries::from_xy(x, window.roll_deg, "", COLOR_ROLL, LINE_WIDTH_PLOT),
            ],
        }),
    }
}

/// Two oximeter channels, each autoscaled on its non-zero samples.
fn oximeter_panel(
    x: &[f64],
    primary: (&[f64], &str),
    secondary: (&[f64], &str),
) -> PanelConfig {
    let (lo, hi) = non_zero_y_limits(primary.0);
    let (lo2, hi2) = non_zero_y_limits(secondary.0);
    PanelConfig {
        title: String::new(),
        x_label: X_LABEL.to_string(),
        x_range: time_range(x),
        primary: AxisConfig {
            label: primary.1.to_string(),
            range: lo..hi,
            series: vec![PlotSeries::from_xy(x, primary.0, "", *COLOR_PRIMARY, LINE_WIDTH_PLOT)],
        },
        secondary: Some(AxisConfig {
            label: secondary.1.to_string(),
            range: lo2..hi2,
            series: vec![PlotSeries::from_xy(x, secondary.0, "", *COLOR_SECONDARY, LINE_WIDTH_PLOT)],
        }),
    }
}

/// The three panels of one report page, top to bottom.
pub fn window_panels(window: &WindowData) -> [PanelConfig; WINDOW_PANEL_COUNT] {
    [
        breathing_panel(window),
        oximeter_panel(
            window.elapsed,
            (window.pulse_rate, "Pulse Rate (BPM) (blue)"),
            (window.spo2, "SpO2 (green)"),
        ),
        oximeter_panel(
            window.elapsed,
            (window.perfusion_index, "Perfusion Index (blue)"),
            (window.mean_spo2_wave, "Mean SpO2 Wave (green)"),
        ),
    ]
}

/// Renders one window as a PNG of three stacked panels and returns its pixel size.
pub fn plot_window(window: &WindowData, output_file: &Path) -> Result<(u32, u32), Box<dyn Error>> {
    let root_area =
        BitMapBackend::new(output_file, (PLOT_WIDTH, WINDOW_PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let sub_plot_areas = root_area.split_evenly((WINDOW_PANEL_COUNT, 1));

    for (area, panel) in sub_plot_areas.iter().zip(window_panels(window).iter()) {
        draw_panel(area, panel)?;
    }

    root_area.present()?;
    debug!(
        "  Window {} ({} samples) saved as '{}'.",
        window.index,
        window.elapsed.len(),
        output_file.display()
    );
    Ok((PLOT_WIDTH, WINDOW_PLOT_HEIGHT))
}


// src/plot_functions/plot_window.rs
