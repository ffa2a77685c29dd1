// File: crates/lumen-core/src/plots/line.rs
// Summary: Line plot renderer: markers joined by a polyline.

use skia_safe as skia;
use tracing::debug;

use super::{draw_points, map_xy, padding_or_default, XyOptions};
use crate::axis::{draw_axes, TickFormat};
use crate::color::{parse_color, stroke_paint};
use crate::error::Result;
use crate::hover::PointHover;
use crate::record::Dataset;
use crate::surface::Viewport;
use crate::types::CanvasPoint;

pub fn draw_line_plot(
    vp: &mut Viewport,
    data: &Dataset,
    x_col: &str,
    y_col: &str,
    opts: &XyOptions,
) -> Result<PointHover> {
    let padding = padding_or_default(vp, opts.padding);
    let color = parse_color(&opts.style.color)?;
    let sorted = data.sorted_by(x_col)?;
    let points = map_xy(&sorted, x_col, y_col, vp.width() as f64, vp.height() as f64, padding)?;

    draw_points(vp, &points, color, opts.style.filled, opts.style.radius);
    if let Some(path) = polyline(&points) {
        vp.canvas().draw_path(&path, &stroke_paint(color, opts.line_width as f32));
    }

    if let Some(axes) = &opts.axes {
        draw_axes(vp, &sorted.numbers(x_col)?, &sorted.numbers(y_col)?, axes, padding, TickFormat::Number)?;
    }

    debug!(points = points.len(), "line plot drawn");
    Ok(PointHover::new(points, opts.info_columns.clone(), vp.height() as f64))
}

/// Open path through every point in order; `None` for an empty slice.
pub fn polyline(points: &[CanvasPoint]) -> Option<skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut path = skia::PathBuilder::new();
    path.move_to(first.position().to_skia());
    for p in rest {
        path.line_to(p.position().to_skia());
    }
    Some(path.detach())
}
