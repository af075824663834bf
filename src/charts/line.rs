//! Line charts: scaling curves, bucketed time series, CDFs

use super::{ensure_parent_dir, render_err, series_color, ChartStyle};
use crate::stats;
use crate::types::{AppError, ImageFormat, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// One line in a line chart
#[derive(Debug, Clone)]
pub struct LineSeriesSpec {
    /// Legend label
    pub label: String,
    /// (x, y) points in display units, in x order
    pub points: Vec<(f64, f64)>,
}

/// Full line-chart specification
#[derive(Debug, Clone)]
pub struct LineChartSpec {
    /// Lines to draw
    pub series: Vec<LineSeriesSpec>,
    /// X-axis description
    pub x_desc: String,
    /// Y-axis description
    pub y_desc: String,
    /// Draw circle markers at every point
    pub markers: bool,
}

impl LineChartSpec {
    fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            return Err(AppError::render("Line chart has no series"));
        }
        if self.series.iter().all(|s| s.points.is_empty()) {
            return Err(AppError::render("Line chart series hold no points"));
        }
        Ok(())
    }

    fn x_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in self.series.iter().flat_map(|s| &s.points) {
            min = min.min(point.0);
            max = max.max(point.0);
        }
        if min >= max {
            // Single x value: pad so the axis has extent.
            (min - 0.5, min + 0.5)
        } else {
            (min, max)
        }
    }

    fn y_data_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| &s.points)
            .map(|p| p.1)
            .fold(0.0, f64::max)
    }
}

/// Render a multi-series line chart to `path` (.svg or .png)
pub fn render_lines(spec: &LineChartSpec, path: &Path, style: &ChartStyle) -> Result<()> {
    spec.validate()?;
    ensure_parent_dir(path)?;

    match ImageFormat::from_path(path)? {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
            draw(&root, spec, style)
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
            draw(&root, spec, style)
        }
    }
}

/// Render per-series empirical CDFs.
///
/// Samples arrive in display units; the y axis is the cumulative
/// percentage of requests.
pub fn render_cdf(
    series: &[(String, Vec<f64>)],
    x_desc: &str,
    path: &Path,
    style: &ChartStyle,
) -> Result<()> {
    if series.is_empty() || series.iter().all(|(_, samples)| samples.is_empty()) {
        return Err(AppError::render("CDF chart has no samples"));
    }

    let spec = LineChartSpec {
        series: series
            .iter()
            .map(|(label, samples)| LineSeriesSpec {
                label: label.clone(),
                points: stats::cdf(samples)
                    .into_iter()
                    .map(|(x, fraction)| (x, fraction * 100.0))
                    .collect(),
            })
            .collect(),
        x_desc: x_desc.to_string(),
        y_desc: "CDF (%)".to_string(),
        markers: false,
    };

    let style = style.clone().with_y_max(Some(100.0));
    render_lines(&spec, path, &style)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &LineChartSpec,
    style: &ChartStyle,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let (x_min, x_max) = spec.x_range();
    let y_max = style.resolve_y_max(spec.y_data_max());

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(10)
        .margin_top(40)
        .x_label_area_size(40)
        .y_label_area_size(50);
    if let Some(title) = &style.title {
        builder.caption(title, ("sans-serif", style.font_size + 4).into_font());
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .x_labels(8)
        .y_labels(6)
        .x_label_style(("sans-serif", style.font_size).into_font())
        .y_label_style(("sans-serif", style.font_size).into_font())
        .x_desc(spec.x_desc.clone())
        .y_desc(spec.y_desc.clone())
        .axis_desc_style(("sans-serif", style.font_size).into_font())
        .draw()
        .map_err(render_err)?;

    for (series_idx, series) in spec.series.iter().enumerate() {
        let color = series_color(series_idx);

        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(style.stroke_width),
            ))
            .map_err(render_err)?;

        if spec.markers {
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                )
                .map_err(render_err)?;
        }
    }

    // Legend boxes along the top edge
    let legend_style = TextStyle::from(("sans-serif", style.font_size).into_font())
        .pos(Pos::new(HPos::Left, VPos::Top));
    let mut legend_x = 10i32;
    for (series_idx, series) in spec.series.iter().enumerate() {
        root.draw(&Rectangle::new(
            [(legend_x, 8), (legend_x + 14, 22)],
            series_color(series_idx).filled(),
        ))
        .map_err(render_err)?;
        root.draw(&Text::new(
            series.label.clone(),
            (legend_x + 20, 8),
            legend_style.clone(),
        ))
        .map_err(render_err)?;
        legend_x += 20 + 9 * series.label.len() as i32 + 20;
    }

    root.present().map_err(render_err)
}
