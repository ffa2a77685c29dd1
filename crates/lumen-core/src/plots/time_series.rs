// File: crates/lumen-core/src/plots/time_series.rs
// Summary: Time series renderer: date parsing, smoothed curve, date axes and event bands with title tooltips.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use skia_safe as skia;
use tracing::{debug, warn};

use super::{draw_points, map_xy, padding_or_default, XyOptions};
use crate::axis::{draw_axes, TickFormat};
use crate::color::{fill_paint, parse_color, stroke_paint};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::hover::{EventHover, PointHover, TitleBox};
use crate::record::{Dataset, Value};
use crate::scale::map_value;
use crate::spline::catmull_rom_open;
use crate::surface::Viewport;
use crate::text::Label;
use crate::types::CanvasPoint;

const TITLE_SIZE: f32 = 9.0;

/// Parse a date or timestamp to UTC milliseconds since the epoch.
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD` (midnight UTC), `YYYY-MM-DD HH:MM:SS`
/// and RFC 3339.
pub fn parse_date_millis(value: &str) -> Result<f64> {
    let s = value.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis() as f64);
            }
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc().timestamp_millis() as f64);
        }
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp_millis() as f64)
        .map_err(|_| Error::InvalidDate { value: value.to_string() })
}

/// A highlighted period drawn as a band behind the series.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TimeEvent {
    pub start_date: String,
    pub end_date: String,
    pub title: String,
    #[serde(alias = "desc")]
    pub description: String,
    pub color: String,
}

/// How consecutive points are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Curve {
    /// Cubic Bézier with both control points at the mid x.
    #[default]
    Bezier,
    /// Open Catmull-Rom spline through the points.
    CatmullRom,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeriesOptions {
    pub series: XyOptions,
    pub curve: Curve,
    pub events: Vec<TimeEvent>,
}

pub struct RenderedTimeSeries {
    pub hover: PointHover,
    pub events: EventHover,
}

/// Path through `points` with horizontal tangents at every point.
pub fn bezier_path(points: &[CanvasPoint]) -> Option<skia::Path> {
    let (first, _) = points.split_first()?;
    let mut path = skia::PathBuilder::new();
    path.move_to(first.position().to_skia());
    for pair in points.windows(2) {
        let (c, n) = (pair[0].position(), pair[1].position());
        let mid_x = c.x + (n.x - c.x) * 0.5;
        path.cubic_to(
            Point::new(mid_x, c.y).to_skia(),
            Point::new(mid_x, n.y).to_skia(),
            n.to_skia(),
        );
    }
    Some(path.detach())
}

fn catmull_rom_path(points: &[CanvasPoint]) -> Option<skia::Path> {
    let smooth = catmull_rom_open(&points.iter().map(CanvasPoint::position).collect::<Vec<_>>());
    let (first, rest) = smooth.split_first()?;
    let mut path = skia::PathBuilder::new();
    path.move_to(first.to_skia());
    for p in rest {
        path.line_to(p.to_skia());
    }
    Some(path.detach())
}

/// Parse `x_col` as dates, sort chronologically, draw markers, the curve,
/// date axes and event bands.
pub fn draw_time_series(
    vp: &mut Viewport,
    data: &Dataset,
    x_col: &str,
    y_col: &str,
    opts: &TimeSeriesOptions,
) -> Result<RenderedTimeSeries> {
    let series = &opts.series;
    let padding = padding_or_default(vp, series.padding);
    let color = parse_color(&series.style.color)?;
    let (width, height) = (vp.width() as f64, vp.height() as f64);

    let ms_col = format!("{x_col}_ms");
    let timed = data.with_column(&ms_col, |r| parse_date_millis(&r.get_string(x_col)?).map(Value::Number))?;
    let sorted = timed.sorted_by(&ms_col)?;
    let points = map_xy(&sorted, &ms_col, y_col, width, height, padding)?;
    let stamps = sorted.numbers(&ms_col)?;

    draw_points(vp, &points, color, series.style.filled, series.style.radius);
    let curve = match opts.curve {
        Curve::Bezier => bezier_path(&points),
        Curve::CatmullRom => catmull_rom_path(&points),
    };
    if let Some(path) = curve {
        vp.canvas().draw_path(&path, &stroke_paint(color, series.line_width as f32));
    }

    if let Some(axes) = &series.axes {
        draw_axes(vp, &stamps, &sorted.numbers(y_col)?, axes, padding, TickFormat::Date)?;
    }

    let events = draw_events(vp, &opts.events, &stamps, padding)?;

    debug!(points = points.len(), events = events.titles.len(), "time series drawn");
    Ok(RenderedTimeSeries { hover: PointHover::new(points, series.info_columns.clone(), height), events })
}

/// Bands spanning each event's dates in the series' time frame, with titles
/// above them. Events whose dates do not parse are skipped.
pub fn draw_events(vp: &mut Viewport, events: &[TimeEvent], stamps: &[f64], padding: f64) -> Result<EventHover> {
    let span = vp.width() as f64 - 2.0 * padding;
    let band_height = vp.height() as f64 - 2.0 * padding;
    let title_label = Label::new(TITLE_SIZE, skia::Color::BLACK);
    let mut hover = EventHover::default();

    for event in events {
        let (start, end) = match (parse_date_millis(&event.start_date), parse_date_millis(&event.end_date)) {
            (Ok(s), Ok(e)) => (s, e),
            _ => {
                warn!(title = %event.title, "event with unparsable dates skipped");
                continue;
            }
        };
        let start_x = map_value(start, padding, span, stamps);
        let end_x = map_value(end, padding, span, stamps);
        let band_width = if end_x - start_x == 0.0 { 1.0 } else { end_x - start_x };

        let rect = skia::Rect::from_xywh(start_x as f32, padding as f32, band_width as f32, band_height as f32);
        vp.canvas().draw_rect(rect, &fill_paint(parse_color(&event.color)?));

        let chars = event.title.chars().count() as f64;
        let title_x = start_x + band_width / 2.0 - 2.0 * chars;
        let title_y = band_height + 25.0;
        vp.draw_text(&event.title, title_x, title_y, &title_label);

        hover.titles.push(TitleBox {
            x: title_x,
            y: title_y - band_height + padding,
            width: 2.0 * chars * 8.0,
            height: TITLE_SIZE as f64,
            description: event.description.clone(),
        });
    }
    Ok(hover)
}
