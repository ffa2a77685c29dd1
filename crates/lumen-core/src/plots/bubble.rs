// File: crates/lumen-core/src/plots/bubble.rs
// Summary: Bubble plot renderer: position from two columns, radius from a third.

use tracing::debug;

use super::{draw_bubbles, padding_or_default};
use crate::axis::{draw_axes, AxesProperties, TickFormat};
use crate::color::parse_color;
use crate::error::Result;
use crate::hover::PointHover;
use crate::record::Dataset;
use crate::scale::map_value;
use crate::surface::Viewport;
use crate::types::CanvasPoint;

#[derive(Clone, Debug, PartialEq)]
pub struct BubbleOptions {
    pub info_columns: Vec<String>,
    pub color: String,
    /// Radius given to the smallest size value.
    pub min_size: f64,
    /// Radius given to the largest size value.
    pub max_size: f64,
    pub padding: Option<f64>,
    pub axes: Option<AxesProperties>,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        Self {
            info_columns: Vec::new(),
            color: "black".to_string(),
            min_size: 1.0,
            max_size: 5.0,
            padding: None,
            axes: None,
        }
    }
}

/// Map x, y and size of each record against the given reference domains.
///
/// Radii span `[min_size, max_size]`: the size range is `max_size - min_size`.
pub(crate) fn map_bubbles(
    data: &Dataset,
    columns: (&str, &str, &str),
    domains: (&[f64], &[f64], &[f64]),
    canvas: (f64, f64, f64),
    sizes: (f64, f64),
) -> Result<Vec<CanvasPoint>> {
    let (x_col, y_col, size_col) = columns;
    let (xs, ys, ss) = domains;
    let (width, height, padding) = canvas;
    let (min_size, max_size) = sizes;
    data.iter()
        .map(|r| {
            let x = map_value(r.get_number(x_col)?, padding, width - 2.0 * padding, xs);
            let y = map_value(r.get_number(y_col)?, padding, height - 2.0 * padding, ys);
            let s = map_value(r.get_number(size_col)?, min_size, max_size - min_size, ss);
            Ok(CanvasPoint::new(r.clone(), x, y).with_size(s))
        })
        .collect()
}

/// Sort by `size_col` so large bubbles are drawn last, map and draw.
pub fn draw_bubble_plot(
    vp: &mut Viewport,
    data: &Dataset,
    x_col: &str,
    y_col: &str,
    size_col: &str,
    opts: &BubbleOptions,
) -> Result<PointHover> {
    let padding = padding_or_default(vp, opts.padding);
    let color = parse_color(&opts.color)?;
    let sorted = data.sorted_by(size_col)?;
    let xs = sorted.numbers(x_col)?;
    let ys = sorted.numbers(y_col)?;
    let ss = sorted.numbers(size_col)?;

    let points = map_bubbles(
        &sorted,
        (x_col, y_col, size_col),
        (&xs, &ys, &ss),
        (vp.width() as f64, vp.height() as f64, padding),
        (opts.min_size, opts.max_size),
    )?;
    draw_bubbles(vp, &points, color);

    if let Some(axes) = &opts.axes {
        draw_axes(vp, &xs, &ys, axes, padding, TickFormat::Number)?;
    }

    debug!(bubbles = points.len(), "bubble plot drawn");
    Ok(PointHover::new(points, opts.info_columns.clone(), vp.height() as f64))
}
