//! Chart geometry
//!
//! Maps an ordered series of `{label, value}` samples onto a plot area as a
//! line or as bars, with horizontal grid lines and axis labels. Rendering is
//! pure: the same samples and config always produce the same [`Chart`].
//!
//! # Scaling
//!
//! - Line mode maps `[min, max]` onto the full plot height. A flat series
//!   uses a range of 1.
//! - Bar mode anchors the scale at zero and maps `[0, max]`.
//!
//! Grid labels run from the top of the scale to the bottom and are formatted
//! with [`compact_number`].

use app_core::format::compact_number;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::tokens::chart;

/// One plotted value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSample {
    /// X axis label
    pub label: String,
    /// Value
    pub value: f64,
}

impl ChartSample {
    /// Create a sample
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// How samples are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartMode {
    /// Polyline with point markers
    Line,
    /// Bars anchored at zero
    Bar,
}

impl Default for ChartMode {
    fn default() -> Self {
        ChartMode::Line
    }
}

impl ChartMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ChartMode::Line => ChartMode::Bar,
            ChartMode::Bar => ChartMode::Line,
        }
    }
}

/// Chart size and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Total width
    pub width: f64,
    /// Total height
    pub height: f64,
    /// Space above the plot
    pub padding_top: f64,
    /// Space right of the plot
    pub padding_right: f64,
    /// Space below the plot
    pub padding_bottom: f64,
    /// Space left of the plot
    pub padding_left: f64,
    /// Number of horizontal grid lines
    pub grid_lines: usize,
    /// Bar width as a share of its slot
    pub bar_width_ratio: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 350.0,
            height: chart::HEIGHT,
            padding_top: chart::PADDING_TOP,
            padding_right: chart::PADDING_RIGHT,
            padding_bottom: chart::PADDING_BOTTOM,
            padding_left: chart::PADDING_LEFT,
            grid_lines: chart::GRID_LINES,
            bar_width_ratio: chart::BAR_WIDTH_RATIO,
        }
    }
}

impl ChartConfig {
    /// Set the total size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set all four paddings
    pub fn with_padding(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.padding_top = top;
        self.padding_right = right;
        self.padding_bottom = bottom;
        self.padding_left = left;
        self
    }

    /// Set the grid line count
    pub fn with_grid_lines(mut self, grid_lines: usize) -> Self {
        self.grid_lines = grid_lines;
        self
    }

    /// Set the bar width ratio
    pub fn with_bar_width_ratio(mut self, ratio: f64) -> Self {
        self.bar_width_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// The plot rectangle inside the padding
    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            left: self.padding_left,
            top: self.padding_top,
            width: (self.width - self.padding_left - self.padding_right).max(0.0),
            height: (self.height - self.padding_top - self.padding_bottom).max(0.0),
        }
    }
}

/// The rectangle values are plotted in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl PlotArea {
    /// Bottom edge, the baseline
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// A point in output coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X
    pub x: f64,
    /// Y, growing downwards
    pub y: f64,
}

/// A horizontal grid line with its Y label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    /// Y position
    pub y: f64,
    /// Left end
    pub x1: f64,
    /// Right end
    pub x2: f64,
    /// Scale value at this line
    pub value: f64,
    /// Formatted value
    pub label: String,
}

/// A text label anchored at a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    /// Anchor X
    pub x: f64,
    /// Anchor Y
    pub y: f64,
    /// Text
    pub text: String,
}

/// One bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height above the baseline
    pub height: f64,
    /// Sample value
    pub value: f64,
}

/// Plotted samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum Series {
    /// A polyline with markers at `points`
    Line {
        /// Markers, one per sample
        points: Vec<Point>,
        /// SVG path through the points (`M x y L x y ...`)
        path: String,
    },
    /// Bars, one per sample
    Bars {
        /// Bars in sample order
        bars: Vec<Bar>,
    },
}

/// Complete chart geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Total width
    pub width: f64,
    /// Total height
    pub height: f64,
    /// Plot rectangle
    pub plot: PlotArea,
    /// Grid lines from top to bottom
    pub grid: Vec<GridLine>,
    /// Plotted samples
    pub series: Series,
    /// X axis labels in sample order
    pub x_labels: Vec<AxisLabel>,
}

/// Render samples as chart geometry
pub fn render(samples: &[ChartSample], mode: ChartMode, config: &ChartConfig) -> Chart {
    let plot = config.plot_area();
    let max = samples.iter().map(|s| s.value).fold(f64::NEG_INFINITY, f64::max);
    let min = samples.iter().map(|s| s.value).fold(f64::INFINITY, f64::min);
    let (max, min) = if samples.is_empty() { (0.0, 0.0) } else { (max, min) };

    let (scale_top, scale_bottom) = match mode {
        ChartMode::Line => (max, min),
        ChartMode::Bar => (max.max(0.0), 0.0),
    };
    let grid = grid_lines(&plot, config.grid_lines, scale_top, scale_bottom);

    let (series, anchors) = match mode {
        ChartMode::Line => {
            let points = line_points(samples, &plot, min, max);
            let anchors = points.iter().map(|p| p.x).collect::<Vec<_>>();
            let path = svg_path(&points);
            (Series::Line { points, path }, anchors)
        }
        ChartMode::Bar => {
            let bars = bar_rects(samples, &plot, scale_top, config.bar_width_ratio);
            let anchors = bars.iter().map(|b| b.x + b.width / 2.0).collect::<Vec<_>>();
            (Series::Bars { bars }, anchors)
        }
    };

    let label_y = plot.bottom() + config.padding_bottom / 2.0;
    let x_labels = samples
        .iter()
        .zip(anchors)
        .map(|(sample, x)| AxisLabel {
            x,
            y: label_y,
            text: sample.label.clone(),
        })
        .collect();

    Chart {
        width: config.width,
        height: config.height,
        plot,
        grid,
        series,
        x_labels,
    }
}

fn grid_lines(plot: &PlotArea, count: usize, top_value: f64, bottom_value: f64) -> Vec<GridLine> {
    let steps = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| {
            let fraction = i as f64 / steps;
            let value = top_value - (top_value - bottom_value) * fraction;
            GridLine {
                y: plot.top + plot.height * fraction,
                x1: plot.left,
                x2: plot.right(),
                value,
                label: compact_number(value),
            }
        })
        .collect()
}

fn line_points(samples: &[ChartSample], plot: &PlotArea, min: f64, max: f64) -> Vec<Point> {
    let range = if max == min { 1.0 } else { max - min };
    let step = if samples.len() > 1 {
        plot.width / (samples.len() - 1) as f64
    } else {
        0.0
    };

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let x = if samples.len() == 1 {
                plot.left + plot.width / 2.0
            } else {
                plot.left + step * i as f64
            };
            let y = plot.bottom() - (sample.value - min) / range * plot.height;
            Point { x, y }
        })
        .collect()
}

fn bar_rects(samples: &[ChartSample], plot: &PlotArea, max: f64, ratio: f64) -> Vec<Bar> {
    if samples.is_empty() {
        return Vec::new();
    }
    let slot = plot.width / samples.len() as f64;
    let width = slot * ratio;

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let height = if max > 0.0 {
                (sample.value.max(0.0) / max) * plot.height
            } else {
                0.0
            };
            Bar {
                x: plot.left + slot * i as f64 + (slot - width) / 2.0,
                y: plot.bottom() - height,
                width,
                height,
                value: sample.value,
            }
        })
        .collect()
}

fn svg_path(points: &[Point]) -> String {
    let mut path = String::new();
    for (i, point) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            path.push(' ');
        }
        let _ = write!(path, "{} {:.2} {:.2}", command, point.x, point.y);
    }
    path
}
