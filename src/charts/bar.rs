//! Grouped bar charts with percentile whiskers
//!
//! The op-stats figure: one group per operation, one bar per system,
//! median heights, p5/p95 whiskers, numeric labels over each bar and an
//! "N/A" marker where a system has no measurement for a group.

use super::{ensure_parent_dir, render_err, series_color, ChartStyle};
use crate::types::{AppError, ImageFormat, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// One bar: height and asymmetric whisker extents, all in display units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarValue {
    /// Bar height (the median)
    pub value: f64,
    /// Whisker extent below the bar top
    pub err_low: f64,
    /// Whisker extent above the bar top
    pub err_high: f64,
}

/// One system's bars across all groups
#[derive(Debug, Clone)]
pub struct BarSeries {
    /// Legend label
    pub label: String,
    /// One entry per group; `None` renders an "N/A" marker
    pub values: Vec<Option<BarValue>>,
}

/// Full grouped-bar figure specification
#[derive(Debug, Clone)]
pub struct BarChartSpec {
    /// Group labels along the x axis (operations)
    pub groups: Vec<String>,
    /// Bar series (systems)
    pub series: Vec<BarSeries>,
    /// Y-axis description, e.g. "Time (ms)"
    pub y_desc: String,
}

impl BarChartSpec {
    fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(AppError::render("Bar chart has no groups"));
        }
        if self.series.is_empty() {
            return Err(AppError::render("Bar chart has no series"));
        }
        for series in &self.series {
            if series.values.len() != self.groups.len() {
                return Err(AppError::render(format!(
                    "Series '{}' has {} values but the chart has {} groups",
                    series.label,
                    series.values.len(),
                    self.groups.len()
                )));
            }
        }
        Ok(())
    }

    fn data_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .map(|v| v.value + v.err_high)
            .fold(0.0, f64::max)
    }
}

/// Render a grouped bar chart to `path` (.svg or .png)
pub fn render_grouped_bars(spec: &BarChartSpec, path: &Path, style: &ChartStyle) -> Result<()> {
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

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &BarChartSpec,
    style: &ChartStyle,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let n_groups = spec.groups.len();
    let n_series = spec.series.len();
    let y_max = style.resolve_y_max(spec.data_max());
    let x_range = -0.5f64..(n_groups as f64 - 0.5);

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
        .build_cartesian_2d(x_range, 0f64..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .x_label_formatter(&|_| String::new())
        .y_labels(6)
        .y_label_style(("sans-serif", style.font_size).into_font())
        .y_desc(spec.y_desc.clone())
        .axis_desc_style(("sans-serif", style.font_size).into_font())
        .draw()
        .map_err(render_err)?;

    // Bars are laid out inside [center - 0.4, center + 0.4] of each group.
    let slot = 0.8 / n_series as f64;
    let bar_center = |group: usize, series: usize| -> f64 {
        group as f64 - 0.4 + (series as f64 + 0.5) * slot
    };

    for (series_idx, series) in spec.series.iter().enumerate() {
        let color = series_color(series_idx);

        chart
            .draw_series(
                series
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(group, value)| value.map(|v| (group, v)))
                    .map(|(group, v)| {
                        let cx = bar_center(group, series_idx);
                        let half = slot * 0.45;
                        Rectangle::new([(cx - half, 0.0), (cx + half, v.value)], color.filled())
                    }),
            )
            .map_err(render_err)?;

        // p5/p95 whiskers
        for (group, value) in series.values.iter().enumerate() {
            let Some(v) = value else { continue };
            if v.err_low <= 0.0 && v.err_high <= 0.0 {
                continue;
            }

            let cx = bar_center(group, series_idx);
            let cap = slot * 0.15;
            let low = (v.value - v.err_low).max(0.0);
            let high = v.value + v.err_high;

            chart
                .plotting_area()
                .draw(&PathElement::new(vec![(cx, low), (cx, high)], BLACK))
                .map_err(render_err)?;
            chart
                .plotting_area()
                .draw(&PathElement::new(
                    vec![(cx - cap, low), (cx + cap, low)],
                    BLACK,
                ))
                .map_err(render_err)?;
            chart
                .plotting_area()
                .draw(&PathElement::new(
                    vec![(cx - cap, high), (cx + cap, high)],
                    BLACK,
                ))
                .map_err(render_err)?;
        }

        // Value labels over the bars, "N/A" where the system has no bar
        let label_style = TextStyle::from(("sans-serif", style.font_size - 4).into_font())
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Bottom));

        for (group, value) in series.values.iter().enumerate() {
            let cx = bar_center(group, series_idx);
            match value {
                Some(v) => {
                    let y = (v.value + v.err_high + y_max * 0.02).min(y_max * 0.98);
                    chart
                        .plotting_area()
                        .draw(&Text::new(format!("{:.1}", v.value), (cx, y), label_style.clone()))
                        .map_err(render_err)?;
                }
                None => {
                    chart
                        .plotting_area()
                        .draw(&Text::new("N/A".to_string(), (cx, y_max * 0.03), label_style.clone()))
                        .map_err(render_err)?;
                }
            }
        }
    }

    // Group labels drawn manually under the x axis
    let group_style = TextStyle::from(("sans-serif", style.font_size).into_font())
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (group, label) in spec.groups.iter().enumerate() {
        let (px, py) = chart
            .plotting_area()
            .map_coordinate(&(group as f64, 0.0));
        root.draw(&Text::new(label.clone(), (px, py + 8), group_style.clone()))
            .map_err(render_err)?;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> BarChartSpec {
        BarChartSpec {
            groups: vec!["Delete Account".to_string(), "Restore Deleted Account".to_string()],
            series: vec![
                BarSeries {
                    label: "Manual (baseline)".to_string(),
                    values: vec![
                        Some(BarValue {
                            value: 10.0,
                            err_low: 2.0,
                            err_high: 3.0,
                        }),
                        None,
                    ],
                },
                BarSeries {
                    label: "Disguised".to_string(),
                    values: vec![
                        Some(BarValue {
                            value: 12.0,
                            err_low: 1.0,
                            err_high: 4.0,
                        }),
                        Some(BarValue {
                            value: 20.0,
                            err_low: 5.0,
                            err_high: 5.0,
                        }),
                    ],
                },
            ],
            y_desc: "Time (ms)".to_string(),
        }
    }

    #[test]
    fn test_validate_mismatched_lengths() {
        let mut spec = sample_spec();
        spec.series[0].values.pop();
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_empty() {
        let spec = BarChartSpec {
            groups: vec![],
            series: vec![],
            y_desc: String::new(),
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_data_max_includes_whisker() {
        let spec = sample_spec();
        assert_eq!(spec.data_max(), 25.0);
    }

    #[test]
    fn test_render_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("op_stats.svg");
        render_grouped_bars(&sample_spec(), &path, &ChartStyle::default()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<svg"));
        assert!(written.contains("N/A"));
    }

    #[test]
    fn test_render_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("op_stats.png");
        render_grouped_bars(&sample_spec(), &path, &ChartStyle::default()).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_render_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("op_stats.pdf");
        assert!(render_grouped_bars(&sample_spec(), &path, &ChartStyle::default()).is_err());
    }

    #[test]
    fn test_render_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots/nested/op_stats.svg");
        render_grouped_bars(&sample_spec(), &path, &ChartStyle::default()).unwrap();
        assert!(path.exists());
    }
}
