// File: crates/lumen-core/src/plots/dot.rs
// Summary: Scatter (dot) plot renderer.

use tracing::debug;

use super::{draw_points, map_xy, padding_or_default, XyOptions};
use crate::axis::{draw_axes, TickFormat};
use crate::color::parse_color;
use crate::error::Result;
use crate::hover::PointHover;
use crate::record::Dataset;
use crate::surface::Viewport;

/// Sort by `x_col`, map both columns to the canvas and draw one marker per
/// record, plus axes when configured.
pub fn draw_dot_plot(
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

    if let Some(axes) = &opts.axes {
        draw_axes(vp, &sorted.numbers(x_col)?, &sorted.numbers(y_col)?, axes, padding, TickFormat::Number)?;
    }

    debug!(points = points.len(), "dot plot drawn");
    Ok(PointHover::new(points, opts.info_columns.clone(), vp.height() as f64))
}
