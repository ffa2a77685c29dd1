// File: crates/lumen-core/src/plots/legend.rs
// Summary: Circle-and-label legend entries.

use skia_safe as skia;

use crate::color::fill_paint;
use crate::surface::Viewport;
use crate::text::Label;

/// Filled circle at `(x, y)` with `text` `x_offset` pixels to its right.
#[allow(clippy::too_many_arguments)]
pub fn draw_circle_legend(
    vp: &mut Viewport,
    radius: f64,
    color: skia::Color,
    x: f64,
    y: f64,
    x_offset: f64,
    text: &str,
    text_color: skia::Color,
) {
    vp.canvas().draw_circle((x as f32, y as f32), radius as f32, &fill_paint(color));
    vp.draw_text(text, x + x_offset, y, &Label::new(12.0, text_color));
}
