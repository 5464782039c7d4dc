//! PNG rendering of the chart models with [`plotters`]
//!
//! Bitmap backend only, so rendering works in headless environments.

use crate::chart::{BoxPlot, Histogram};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const CHART_SIZE: (u32, u32) = (1000, 700);
const FONT: &str = "sans-serif";
const BOX_HALF_WIDTH: f64 = 0.3;

/// Seaborn "deep" colors
const PALETTE: [RGBColor; 10] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
    RGBColor(218, 139, 195),
    RGBColor(140, 140, 140),
    RGBColor(204, 185, 116),
    RGBColor(100, 181, 205),
];

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = std::result::Result<T, PlotError>;

fn drawing<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Pad a value range so that it is never empty
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if hi - lo <= f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

impl Histogram {
    /// Bars, density curve, legend and the measures text block
    pub fn render(&self, output_path: &Path) -> Result<()> {
        let bins = self.bins();
        let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
            return Err(PlotError::InvalidData(format!(
                "histogram '{}' has no values",
                self.name
            )));
        };

        let kde = self.kde();
        let y_top = bins
            .iter()
            .map(|b| b.2 as f64)
            .chain(kde.iter().map(|p| p.1))
            .fold(0.0, f64::max);
        let x_lo = kde.first().map_or(first.0, |p| p.0.min(first.0));
        let x_hi = kde.last().map_or(last.1, |p| p.0.max(last.1));

        let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.name, (FONT, 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_lo..x_hi, 0.0..y_top * 1.1 + 1.0)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(&self.column)
            .y_desc("Count")
            .label_style((FONT, 16))
            .draw()
            .map_err(drawing)?;

        let bar = PALETTE[0].mix(0.5).filled();
        chart
            .draw_series(
                bins.iter()
                    .map(|&(start, end, count)| Rectangle::new([(start, 0.0), (end, count as f64)], bar)),
            )
            .map_err(drawing)?
            .label(&self.name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], bar));

        chart
            .draw_series(bins.iter().map(|&(start, end, count)| {
                Rectangle::new([(start, 0.0), (end, count as f64)], PALETTE[0].stroke_width(1))
            }))
            .map_err(drawing)?;

        if !kde.is_empty() {
            chart
                .draw_series(LineSeries::new(kde, PALETTE[0].stroke_width(2)))
                .map_err(drawing)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, 16))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing)?;

        let x = CHART_SIZE.0 as i32 * 3 / 4;
        for (i, line) in self.annotations().into_iter().enumerate() {
            root.draw(&Text::new(line, (x, 90 + i as i32 * 26), (FONT, 18).into_font()))
                .map_err(drawing)?;
        }

        root.present().map_err(drawing)?;
        Ok(())
    }
}

impl BoxPlot {
    /// One box per series with whiskers, median line and fliers
    pub fn render(&self, output_path: &Path) -> Result<()> {
        if self.series.is_empty() {
            return Err(PlotError::InvalidData("box plot has no series".to_string()));
        }

        let (lo, hi) = self
            .series
            .iter()
            .map(|s| s.stats.extent())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (l, h)| {
                (lo.min(l), hi.max(h))
            });
        let (y_lo, y_hi) = padded(lo, hi);
        let n = self.series.len();

        let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_lo..y_hi)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        let labels: Vec<&str> = self.series.iter().map(|s| s.label.as_str()).collect();
        let x_formatter = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).map(|l| l.to_string()).unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.max(2) * 2 + 1)
            .x_label_formatter(&x_formatter)
            .x_desc(&self.x_label)
            .y_desc(&self.y_label)
            .label_style((FONT, 16))
            .draw()
            .map_err(drawing)?;

        for (i, series) in self.series.iter().enumerate() {
            let x = i as f64;
            let s = &series.stats;
            let color = PALETTE[i % PALETTE.len()];
            let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);
            let cap = BOX_HALF_WIDTH / 2.0;

            chart
                .draw_series([
                    Rectangle::new([(left, s.q1), (right, s.q3)], color.filled()),
                    Rectangle::new([(left, s.q1), (right, s.q3)], BLACK.stroke_width(1)),
                ])
                .map_err(drawing)?;

            chart
                .draw_series([
                    PathElement::new(vec![(left, s.median), (right, s.median)], BLACK.stroke_width(2)),
                    PathElement::new(vec![(x, s.q3), (x, s.whisker_high)], BLACK.stroke_width(1)),
                    PathElement::new(vec![(x, s.q1), (x, s.whisker_low)], BLACK.stroke_width(1)),
                    PathElement::new(
                        vec![(x - cap, s.whisker_high), (x + cap, s.whisker_high)],
                        BLACK.stroke_width(1),
                    ),
                    PathElement::new(
                        vec![(x - cap, s.whisker_low), (x + cap, s.whisker_low)],
                        BLACK.stroke_width(1),
                    ),
                ])
                .map_err(drawing)?;

            chart
                .draw_series(
                    s.fliers
                        .iter()
                        .map(|&v| Circle::new((x, v), 3, BLACK.stroke_width(1))),
                )
                .map_err(drawing)?;
        }

        root.present().map_err(drawing)?;
        Ok(())
    }
}
