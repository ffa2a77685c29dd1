// File: crates/lumen-core/src/plots/mod.rs
// Summary: Chart renderers (one module per chart type) and the drawing helpers they share.

pub mod bar;
pub mod bubble;
pub mod dot;
pub mod legend;
pub mod line;
pub mod map;
pub mod radial;
pub mod time_series;

use skia_safe as skia;

use crate::axis::AxesProperties;
use crate::color::{fill_paint, stroke_paint};
use crate::error::Result;
use crate::record::Dataset;
use crate::scale::map_value;
use crate::surface::Viewport;
use crate::types::CanvasPoint;

pub use bar::{category_counts, draw_bar_plot};
pub use bubble::{draw_bubble_plot, BubbleOptions};
pub use dot::draw_dot_plot;
pub use legend::draw_circle_legend;
pub use line::{draw_line_plot, polyline};
pub use map::{
    draw_color_reference, draw_heat_map, draw_interactive_bubble_map, draw_map, draw_map_bubble_plot,
    draw_map_dot_plot, BubbleMapFilters, BubbleMapOptions, HeatMapOptions, InteractiveBubbleMap, MapStyle,
    RenderedBubbleMap, SizeRange, SizeReference,
};
pub use radial::{draw_radial_time_series, radial_points, RadialOptions};
pub use time_series::{
    draw_events, draw_time_series, parse_date_millis, Curve, RenderedTimeSeries, TimeEvent, TimeSeriesOptions,
};

/// Marker appearance for point charts.
#[derive(Clone, Debug, PartialEq)]
pub struct PointStyle {
    pub color: String,
    pub filled: bool,
    pub radius: f64,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self { color: "black".to_string(), filled: false, radius: 5.0 }
    }
}

/// Options shared by the dot, line and time-series renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct XyOptions {
    pub info_columns: Vec<String>,
    pub style: PointStyle,
    /// Stroke width of the connecting line (line and time-series charts).
    pub line_width: f64,
    /// Defaults to 2% of the canvas width.
    pub padding: Option<f64>,
    pub axes: Option<AxesProperties>,
}

impl Default for XyOptions {
    fn default() -> Self {
        Self {
            info_columns: Vec::new(),
            style: PointStyle::default(),
            line_width: 1.0,
            padding: None,
            axes: None,
        }
    }
}

pub(crate) fn padding_or_default(vp: &Viewport, padding: Option<f64>) -> f64 {
    padding.unwrap_or_else(|| vp.default_padding())
}

/// Map `x_col`/`y_col` of every record onto the padded canvas, each against
/// the observed extent of its own column.
pub fn map_xy(
    data: &Dataset,
    x_col: &str,
    y_col: &str,
    width: f64,
    height: f64,
    padding: f64,
) -> Result<Vec<CanvasPoint>> {
    let xs = data.numbers(x_col)?;
    let ys = data.numbers(y_col)?;
    Ok(data
        .iter()
        .zip(xs.iter().zip(&ys))
        .map(|(r, (&x, &y))| {
            CanvasPoint::new(
                r.clone(),
                map_value(x, padding, width - 2.0 * padding, &xs),
                map_value(y, padding, height - 2.0 * padding, &ys),
            )
        })
        .collect())
}

/// Circles of `radius` at every point; always stroked, optionally filled.
pub fn draw_points(vp: &mut Viewport, points: &[CanvasPoint], color: skia::Color, filled: bool, radius: f64) {
    let fill = fill_paint(color);
    let stroke = stroke_paint(color, 1.0);
    let canvas = vp.canvas();
    for p in points {
        let center = p.position().to_skia();
        if filled {
            canvas.draw_circle(center, radius as f32, &fill);
        }
        canvas.draw_circle(center, radius as f32, &stroke);
    }
}

/// Filled circles sized by each point's `size_canvas`.
pub fn draw_bubbles(vp: &mut Viewport, points: &[CanvasPoint], color: skia::Color) {
    let fill = fill_paint(color);
    let canvas = vp.canvas();
    for p in points {
        let r = p.size_canvas.unwrap_or(0.0).max(0.0);
        canvas.draw_circle(p.position().to_skia(), r as f32, &fill);
    }
}
