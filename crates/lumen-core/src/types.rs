// File: crates/lumen-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, canvas-mapped records).

use crate::geometry::Point;
use crate::record::Record;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Padding used when a renderer is not given one: 2% of the surface width.
#[inline]
pub fn default_padding(width: i32) -> f64 {
    width as f64 * 0.02
}

/// A record together with its pixel-space position (y-up surface coordinates).
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasPoint {
    pub record: Record,
    pub x_canvas: f64,
    pub y_canvas: f64,
    /// Radius for bubble-like charts.
    pub size_canvas: Option<f64>,
}

impl CanvasPoint {
    pub fn new(record: Record, x_canvas: f64, y_canvas: f64) -> Self {
        Self { record, x_canvas, y_canvas, size_canvas: None }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size_canvas = Some(size);
        self
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x_canvas, self.y_canvas)
    }
}
