// src/plot_functions/plot_sample_intervals.rs

use log::debug;
use plotters::backend::BitMapBackend;
use plotters::drawing::IntoDrawingArea;
use plotters::style::colors::WHITE;
use std::error::Error;
use std::path::Path;

use crate::constants::{COLOR_SAMPLE_INTERVAL, LINE_WIDTH_PLOT, PANEL_HEIGHT, PLOT_WIDTH};
use crate::plot_framework::{draw_panel, time_range, AxisConfig, PanelConfig, PlotSeries};

/// Panel showing how far apart successive sensor readings are, which exposes dropouts.
pub fn sample_interval_panel(elapsed: &[f64], intervals: &[f64]) -> PanelConfig {
    let x = &elapsed[..intervals.len().min(elapsed.len())];
    let (min, max) = intervals
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let y_range = if min > max {
        0.0..1.0
    } else {
        let padding = ((max - min) * 0.05).max(1e-3);
        (min - padding)..(max + padding)
    };

    PanelConfig {
        title: "Time Between Sensor Readings".to_string(),
        x_label: "Elapsed Time (s)".to_string(),
        x_range: time_range(x),
        primary: AxisConfig {
            label: "Diff (s)".to_string(),
            range: y_range,
            series: vec![PlotSeries::from_xy(x, intervals, "", *COLOR_SAMPLE_INTERVAL, LINE_WIDTH_PLOT)],
        },
        secondary: None,
    }
}

/// Renders the sample interval overview and returns its pixel size.
pub fn plot_sample_intervals(
    elapsed: &[f64],
    intervals: &[f64],
    output_file: &Path,
) -> Result<(u32, u32), Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_file, (PLOT_WIDTH, PANEL_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    draw_panel(&root_area, &sample_interval_panel(elapsed, intervals))?;
    root_area.present()?;
    debug!("  Sample interval plot saved as '{}'.", output_file.display());
    Ok((PLOT_WIDTH, PANEL_HEIGHT))
}


// src/plot_functions/plot_sample_intervals.rs
