// File: crates/lumen-core/src/plots/radial.rs
// Summary: Radial time series: values on spokes around a center, closed Catmull-Rom area, reference spokes.

use skia_safe as skia;
use tracing::debug;

use super::padding_or_default;
use crate::color::{fill_paint, parse_color, stroke_paint};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::hover::PointHover;
use crate::record::Dataset;
use crate::scale::LinearScale;
use crate::spline::catmull_rom_closed;
use crate::surface::Viewport;
use crate::text::Label;
use crate::types::CanvasPoint;

/// Spokes reach this fraction past their point.
const SPOKE_EXTENSION: f64 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct RadialOptions {
    pub color: String,
    pub point_radius: f64,
    pub padding: Option<f64>,
    pub info_columns: Vec<String>,
    /// Column whose value labels each drawn spoke.
    pub label_column: String,
    /// A spoke is drawn for the first point and every n-th point after it.
    pub line_divide_factor: usize,
    pub min_value: f64,
    pub max_value: f64,
    /// Radius of the white disc holding `min_value`.
    pub inner_radius: f64,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self {
            color: "steelblue".to_string(),
            point_radius: 2.0,
            padding: None,
            info_columns: Vec::new(),
            label_column: "week".to_string(),
            line_divide_factor: 7,
            min_value: 0.0,
            max_value: 70.0,
            inner_radius: 170.0,
        }
    }
}

/// Place every record on its own angle, clockwise from 3 o'clock on screen,
/// at a radius proportional to `value_col`.
pub fn radial_points(
    data: &Dataset,
    value_col: &str,
    center: Point,
    scale: &LinearScale,
) -> Result<Vec<CanvasPoint>> {
    if data.is_empty() {
        return Err(Error::EmptyDataset { context: "radial series needs at least one record" });
    }
    let step = -(std::f64::consts::TAU / data.len() as f64);
    data.iter()
        .enumerate()
        .map(|(i, r)| {
            let angle = i as f64 * step;
            let radius = scale.map(r.get_number(value_col)?);
            Ok(CanvasPoint::new(
                r.clone(),
                angle.cos() * radius + center.x,
                angle.sin() * radius + center.y,
            ))
        })
        .collect()
}

pub fn draw_radial_time_series(
    vp: &mut Viewport,
    data: &Dataset,
    value_col: &str,
    opts: &RadialOptions,
) -> Result<PointHover> {
    let padding = padding_or_default(vp, opts.padding);
    let color = parse_color(&opts.color)?;
    let (width, height) = (vp.width() as f64, vp.height() as f64);
    let center = Point::new(width / 2.0, height / 2.0);
    let outer = width.min(height) / 2.0 - 2.0 * padding;
    let scale = LinearScale::new((opts.min_value, opts.max_value), (opts.inner_radius, outer));
    let points = radial_points(data, value_col, center, &scale)?;

    let first_spoke = stroke_paint(skia::Color::from_argb(178, 0, 0, 0), 3.0);
    let spoke = stroke_paint(skia::Color::from_argb(77, 0, 0, 0), 1.0);
    let label = Label::new(12.0, color);
    let divide = opts.line_divide_factor.max(1);
    for (i, p) in points.iter().enumerate() {
        if i != 0 && (i + 1) % divide != 0 {
            continue;
        }
        let end = Point::new(
            p.x_canvas + (p.x_canvas - center.x) * SPOKE_EXTENSION,
            p.y_canvas + (p.y_canvas - center.y) * SPOKE_EXTENSION,
        );
        let paint = if i == 0 { &first_spoke } else { &spoke };
        vp.canvas().draw_line(center.to_skia(), end.to_skia(), paint);
        let text = p.record.try_get(&opts.label_column).map(|v| v.to_string()).unwrap_or_default();
        vp.draw_text(&text, end.x + 5.0, end.y, &label);
    }

    let fill = fill_paint(color);
    let smooth = catmull_rom_closed(&points.iter().map(CanvasPoint::position).collect::<Vec<_>>());
    let canvas = vp.canvas();
    for p in &points {
        canvas.draw_circle(p.position().to_skia(), opts.point_radius as f32, &fill);
    }
    if let Some((first, rest)) = smooth.split_first() {
        let mut area = skia::PathBuilder::new();
        area.move_to(first.to_skia());
        for p in rest {
            area.line_to(p.to_skia());
        }
        area.close();
        canvas.draw_path(&area.detach(), &fill);
    }
    canvas.draw_circle(center.to_skia(), opts.inner_radius as f32, &fill_paint(skia::Color::WHITE));

    debug!(points = points.len(), "radial series drawn");
    Ok(PointHover::new(points, opts.info_columns.clone(), height))
}
