//! Latency histograms

use super::{ensure_parent_dir, render_err, series_color, ChartStyle};
use crate::types::{AppError, ImageFormat, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Histogram specification
#[derive(Debug, Clone)]
pub struct HistogramSpec {
    /// Sample values in display units
    pub values: Vec<f64>,
    /// Number of equal-width bins
    pub bins: usize,
    /// X-axis description
    pub x_desc: String,
    /// Y-axis description
    pub y_desc: String,
}

impl HistogramSpec {
    fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(AppError::render("Histogram has no samples"));
        }
        if self.bins == 0 {
            return Err(AppError::render("Histogram needs at least one bin"));
        }
        Ok(())
    }

    /// Equal-width bin boundaries and counts
    fn bin_counts(&self) -> (f64, f64, Vec<usize>) {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Degenerate distribution: a single bin of nominal width.
        if max <= min {
            return (min, min + 1.0, vec![self.values.len()]);
        }

        let width = (max - min) / self.bins as f64;
        let mut counts = vec![0usize; self.bins];
        for &value in &self.values {
            let mut bin = ((value - min) / width).floor() as usize;
            if bin >= self.bins {
                bin = self.bins - 1;
            }
            counts[bin] += 1;
        }
        (min, max, counts)
    }
}

/// Render a histogram to `path` (.svg or .png)
pub fn render_histogram(spec: &HistogramSpec, path: &Path, style: &ChartStyle) -> Result<()> {
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
    spec: &HistogramSpec,
    style: &ChartStyle,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let (min, max, counts) = spec.bin_counts();
    let bin_width = (max - min) / counts.len() as f64;
    let count_max = counts.iter().copied().max().unwrap_or(0) as f64;
    let y_max = style.resolve_y_max(count_max);

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(10)
        .margin_top(20)
        .x_label_area_size(40)
        .y_label_area_size(50);
    if let Some(title) = &style.title {
        builder.caption(title, ("sans-serif", style.font_size + 4).into_font());
    }
    let mut chart = builder
        .build_cartesian_2d(min..max, 0f64..y_max)
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

    let color = series_color(0);
    chart
        .draw_series(counts.iter().enumerate().map(|(bin, &count)| {
            let x0 = min + bin as f64 * bin_width;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0.0), (x1, count as f64)], color.filled())
        }))
        .map_err(render_err)?;

    // Outline the bars so adjacent bins stay distinguishable
    chart
        .draw_series(counts.iter().enumerate().map(|(bin, &count)| {
            let x0 = min + bin as f64 * bin_width;
            let x1 = x0 + bin_width;
            PathElement::new(
                vec![(x0, 0.0), (x0, count as f64), (x1, count as f64), (x1, 0.0)],
                BLACK,
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> HistogramSpec {
        HistogramSpec {
            values: vec![1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 9.0],
            bins: 4,
            x_desc: "Request Completion Time (s)".to_string(),
            y_desc: "Number of Requests".to_string(),
        }
    }

    #[test]
    fn test_bin_counts() {
        let spec = sample_spec();
        let (min, max, counts) = spec.bin_counts();
        assert_eq!(min, 1.0);
        assert_eq!(max, 9.0);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts.iter().sum::<usize>(), spec.values.len());
        // Max value lands in the last bin, not out of range.
        assert_eq!(counts[3], 1);
    }

    #[test]
    fn test_bin_counts_degenerate() {
        let spec = HistogramSpec {
            values: vec![5.0, 5.0],
            bins: 10,
            x_desc: String::new(),
            y_desc: String::new(),
        };
        let (min, max, counts) = spec.bin_counts();
        assert_eq!((min, max), (5.0, 6.0));
        assert_eq!(counts, vec![2]);
    }

    #[test]
    fn test_validate() {
        let mut spec = sample_spec();
        spec.bins = 0;
        assert!(spec.validate().is_err());

        let empty = HistogramSpec {
            values: vec![],
            bins: 5,
            x_desc: String::new(),
            y_desc: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_render_histogram_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.svg");
        render_histogram(&sample_spec(), &path, &ChartStyle::default()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
