// File: crates/lumen-core/src/axis.rs
// Summary: Axis drawing: data-driven interval axes and fixed pixel-step axes.

use chrono::DateTime;
use serde::Deserialize;
use skia_safe as skia;

use crate::color::{parse_color, stroke_paint};
use crate::error::{Error, Result};
use crate::scale::{map_value, Extent};
use crate::surface::Viewport;
use crate::text::Label;
use crate::ticks::{tick_values, IntervalMode};

const TICK_HALF: f64 = 5.0;
const LABEL_SIZE: f32 = 10.0;

/// Axis placement and tick policy shared by the XY renderers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxesProperties {
    pub x_pos: f64,
    pub y_pos: f64,
    /// Counter-clockwise rotation of X labels, in degrees.
    pub x_label_angle: f32,
    pub color: String,
    pub x_label_space: f64,
    pub y_label_space: f64,
    pub x_mode: IntervalMode,
    pub y_mode: IntervalMode,
}

impl Default for AxesProperties {
    fn default() -> Self {
        Self {
            x_pos: 50.0,
            y_pos: 50.0,
            x_label_angle: 0.0,
            color: "black".to_string(),
            x_label_space: 20.0,
            y_label_space: 20.0,
            x_mode: IntervalMode::Every,
            y_mode: IntervalMode::Every,
        }
    }
}

/// How tick values become label text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TickFormat {
    #[default]
    Number,
    /// Values are UTC milliseconds, shown as `YYYY/MM/DD`.
    Date,
}

impl TickFormat {
    pub fn label(&self, value: f64) -> String {
        match self {
            TickFormat::Number => format_number(value),
            TickFormat::Date => DateTime::from_timestamp_millis(value as i64)
                .map(|d| d.format("%Y/%m/%d").to_string())
                .unwrap_or_else(|| format_number(value)),
        }
    }
}

/// Shortest plain rendering of a number (`3`, `13.5`).
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// X axis whose ticks come from `values` under `props.x_mode`.
///
/// The axis starts at `(x_pos + padding, y_pos + padding)` and is as long as
/// the mapped span of the ticks. Returns the tick values drawn.
pub fn draw_x_axis_with_intervals(
    vp: &mut Viewport,
    values: &[f64],
    props: &AxesProperties,
    padding: f64,
    format: TickFormat,
) -> Result<Vec<f64>> {
    let color = parse_color(&props.color)?;
    let span = vp.width() as f64 - 2.0 * padding;
    let ticks = tick_values(props.x_mode, values)?;
    let mapped = ticks.iter().map(|&t| map_value(t, padding, span, values)).collect::<Vec<_>>();
    let Some(extent) = Extent::of(&mapped) else {
        return Ok(ticks);
    };

    let origin_x = props.x_pos + padding;
    let axis_y = props.y_pos + padding;
    let paint = stroke_paint(color, 1.0);
    vp.canvas().draw_line(
        (origin_x as f32, axis_y as f32),
        ((origin_x + extent.span()) as f32, axis_y as f32),
        &paint,
    );

    let label = Label::new(LABEL_SIZE, color).rotated(props.x_label_angle);
    for (&tick, &px) in ticks.iter().zip(&mapped) {
        let tick_x = origin_x + (px - extent.min);
        vp.canvas().draw_line(
            (tick_x as f32, (axis_y - TICK_HALF) as f32),
            (tick_x as f32, (axis_y + TICK_HALF) as f32),
            &paint,
        );
        vp.draw_text(&format.label(tick), tick_x - 5.0, props.y_pos + props.x_label_space, &label);
    }
    Ok(ticks)
}

/// Y axis counterpart of [`draw_x_axis_with_intervals`]; labels sit
/// `y_label_space` left of `x_pos` and are never rotated.
pub fn draw_y_axis_with_intervals(
    vp: &mut Viewport,
    values: &[f64],
    props: &AxesProperties,
    padding: f64,
) -> Result<Vec<f64>> {
    let color = parse_color(&props.color)?;
    let span = vp.height() as f64 - 2.0 * padding;
    let ticks = tick_values(props.y_mode, values)?;
    let mapped = ticks.iter().map(|&t| map_value(t, padding, span, values)).collect::<Vec<_>>();
    let Some(extent) = Extent::of(&mapped) else {
        return Ok(ticks);
    };

    let axis_x = props.x_pos + padding;
    let origin_y = props.y_pos + padding;
    let paint = stroke_paint(color, 1.0);
    vp.canvas().draw_line(
        (axis_x as f32, origin_y as f32),
        (axis_x as f32, (origin_y + extent.span()) as f32),
        &paint,
    );

    let label = Label::new(LABEL_SIZE, color);
    for (&tick, &px) in ticks.iter().zip(&mapped) {
        let tick_y = origin_y + (px - extent.min);
        vp.canvas().draw_line(
            ((axis_x - TICK_HALF) as f32, tick_y as f32),
            ((axis_x + TICK_HALF) as f32, tick_y as f32),
            &paint,
        );
        vp.draw_text(&format_number(tick), props.x_pos - props.y_label_space, tick_y, &label);
    }
    Ok(ticks)
}

/// Both interval axes, as the XY renderers draw them.
pub fn draw_axes(
    vp: &mut Viewport,
    x_values: &[f64],
    y_values: &[f64],
    props: &AxesProperties,
    padding: f64,
    x_format: TickFormat,
) -> Result<()> {
    draw_x_axis_with_intervals(vp, x_values, props, padding, x_format)?;
    draw_y_axis_with_intervals(vp, y_values, props, padding)?;
    Ok(())
}

/// Pixel-step axis geometry: ticks every `step` pixels from `start` to `end`
/// along the axis, labelled with their pixel offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelAxis {
    pub start: f64,
    pub end: f64,
    pub x_pos: f64,
    pub y_pos: f64,
    pub step: f64,
    pub color: skia::Color,
    pub label_space: f64,
}

impl PixelAxis {
    /// Offsets `start, start + step, ...` up to and including `end`.
    pub fn offsets(&self) -> Result<Vec<f64>> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::InvalidInterval { interval: self.step });
        }
        let mut out = Vec::new();
        let mut k = 0u64;
        loop {
            let v = self.start + k as f64 * self.step;
            if v > self.end {
                break;
            }
            out.push(v);
            k += 1;
        }
        Ok(out)
    }
}

/// Horizontal axis line from `x_pos` to `x_pos + end` at height `y_pos`.
pub fn draw_pixel_x_axis(vp: &mut Viewport, axis: &PixelAxis) -> Result<()> {
    let offsets = axis.offsets()?;
    let paint = stroke_paint(axis.color, 1.0);
    let y = axis.y_pos as f32;
    vp.canvas().draw_line((axis.x_pos as f32, y), ((axis.end + axis.x_pos) as f32, y), &paint);

    let label = Label::new(LABEL_SIZE, skia::Color::BLACK);
    for off in offsets {
        let x = axis.x_pos + off;
        vp.canvas().draw_line(
            (x as f32, (axis.y_pos - TICK_HALF) as f32),
            (x as f32, (axis.y_pos + TICK_HALF) as f32),
            &paint,
        );
        vp.draw_text(&format_number(off), x - 5.0, axis.y_pos - axis.label_space, &label);
    }
    Ok(())
}

/// Vertical axis line from `y_pos` to `y_pos + end` at `x_pos`.
pub fn draw_pixel_y_axis(vp: &mut Viewport, axis: &PixelAxis) -> Result<()> {
    let offsets = axis.offsets()?;
    let paint = stroke_paint(axis.color, 1.0);
    let x = axis.x_pos as f32;
    vp.canvas().draw_line((x, axis.y_pos as f32), (x, (axis.end + axis.y_pos) as f32), &paint);

    let label = Label::new(LABEL_SIZE, skia::Color::BLACK);
    for off in offsets {
        let y = axis.y_pos + off;
        vp.canvas().draw_line(
            ((axis.x_pos - TICK_HALF) as f32, y as f32),
            ((axis.x_pos + TICK_HALF) as f32, y as f32),
            &paint,
        );
        vp.draw_text(&format_number(off), axis.x_pos - axis.label_space, y, &label);
    }
    Ok(())
}
