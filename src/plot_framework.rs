// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, ChartContext, SeriesLabelPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::{PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{
    AUTOSCALE_MARGIN_FRACTION, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, MIN_AUTOSCALE_SPAN,
};
use crate::font_config::{FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MESSAGE};

pub type PlotArea<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Y limits that ignore zero samples, which the oximeter reports while it has no reading.
///
/// All-zero input yields `(0, 1)`. Otherwise the non-zero range is padded on both
/// sides by 5% of the larger of its span and 0.1.
pub fn non_zero_y_limits(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .filter(|v| **v != 0.0 && v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if min > max {
        return (0.0, 1.0);
    }
    let margin = (max - min).max(MIN_AUTOSCALE_SPAN) * AUTOSCALE_MARGIN_FRACTION;
    (min - margin, max + margin)
}

/// X range spanning first to last sample. A single sample is widened so the range stays non-empty.
pub fn time_range(x: &[f64]) -> Range<f64> {
    match (x.first(), x.last()) {
        (Some(&first), Some(&last)) if last > first => first..last,
        (Some(&first), _) => (first - 0.5)..(first + 0.5),
        _ => 0.0..1.0,
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &PlotArea,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{plot_type} Data Unavailable: {reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_text_width = (message.len() as i32).saturating_mul(estimated_char_width);
    let center_x = width / 2 - estimated_text_width / 2;
    let center_y = height / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

impl PlotSeries {
    pub fn from_xy(x: &[f64], y: &[f64], label: &str, color: RGBColor, stroke_width: u32) -> Self {
        PlotSeries {
            data: x.iter().copied().zip(y.iter().copied()).collect(),
            label: label.to_string(),
            color,
            stroke_width,
        }
    }
}

/// One y axis: its description, limits and the series drawn against it.
#[derive(Clone)]
pub struct AxisConfig {
    pub label: String,
    pub range: Range<f64>,
    pub series: Vec<PlotSeries>,
}

#[derive(Clone)]
pub struct PanelConfig {
    pub title: String,
    pub x_label: String,
    pub x_range: Range<f64>,
    pub primary: AxisConfig,
    /// Drawn against a right-hand y axis sharing the x range.
    pub secondary: Option<AxisConfig>,
}

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Draws series against the primary axes. Returns whether any of them carries a legend label.
fn draw_primary_series(chart: &mut Chart<'_, '_>, series: &[PlotSeries]) -> Result<bool, Box<dyn Error>> {
    let mut labelled = false;
    for s in series {
        let color = s.color;
        let anno = chart.draw_series(LineSeries::new(
            s.data.iter().copied(),
            color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            anno.label(&s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            labelled = true;
        }
    }
    Ok(labelled)
}

fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>) -> Result<(), Box<dyn Error>> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(FONT_TUPLE_LEGEND)
        .draw()?;
    Ok(())
}

fn valid_range(range: &Range<f64>) -> bool {
    range.start.is_finite() && range.end.is_finite() && range.end > range.start
}

/// Draws one chart, with an optional secondary y axis on the right.
pub fn draw_panel(area: &PlotArea, panel: &PanelConfig) -> Result<(), Box<dyn Error>> {
    let has_data = panel.primary.series.iter().any(|s| !s.data.is_empty());
    if !has_data {
        return draw_unavailable_message(area, &panel.title, "No data points");
    }
    let ranges_ok = valid_range(&panel.x_range)
        && valid_range(&panel.primary.range)
        && panel.secondary.as_ref().map_or(true, |s| valid_range(&s.range));
    if !ranges_ok {
        return draw_unavailable_message(area, &panel.title, "Invalid ranges");
    }

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(60);
    if !panel.title.is_empty() {
        builder.caption(&panel.title, FONT_TUPLE_CHART_TITLE);
    }

    let Some(secondary) = &panel.secondary else {
        let mut chart =
            builder.build_cartesian_2d(panel.x_range.clone(), panel.primary.range.clone())?;
        chart
            .configure_mesh()
            .x_desc(&panel.x_label)
            .y_desc(&panel.primary.label)
            .light_line_style(WHITE.mix(0.7))
            .label_style(FONT_TUPLE_AXIS_LABEL)
            .draw()?;

        if draw_primary_series(&mut chart, &panel.primary.series)? {
            draw_legend(&mut chart)?;
        }
        return Ok(());
    };

    let mut chart = builder
        .right_y_label_area_size(60)
        .build_cartesian_2d(panel.x_range.clone(), panel.primary.range.clone())?
        .set_secondary_coord(panel.x_range.clone(), secondary.range.clone());

    chart
        .configure_mesh()
        .x_desc(&panel.x_label)
        .y_desc(&panel.primary.label)
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc(&secondary.label)
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let labelled = draw_primary_series(&mut chart, &panel.primary.series)?;
    for s in &secondary.series {
        chart.draw_secondary_series(LineSeries::new(
            s.data.iter().copied(),
            s.color.stroke_width(s.stroke_width),
        ))?;
    }
    if labelled {
        draw_legend(&mut chart)?;
    }
    Ok(())
}


// src/plot_framework.rs
