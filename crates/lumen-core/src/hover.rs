// File: crates/lumen-core/src/hover.rs
// Summary: Pointer hit testing for rendered charts and placement of the info overlay / event tooltip.

use crate::geojson::Feature;
use crate::geometry::{Point, Projection};
use crate::record::Record;
use crate::types::CanvasPoint;

/// Pick radius around a plotted point, in pixels.
pub const POINT_HIT_RADIUS: f64 = 5.0;

/// Floating info box shown next to the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoOverlay {
    pub left: f64,
    pub top: f64,
    /// `"column : value"` lines.
    pub lines: Vec<String>,
}

impl InfoOverlay {
    /// Place the overlay for a pointer at `(x, y)`; `flip_left` puts it on the
    /// left of the pointer so it stays on screen.
    pub fn place(x: f64, y: f64, flip_left: bool, lines: Vec<String>) -> Self {
        let left = if flip_left { x - 180.0 } else { x + 50.0 };
        Self { left, top: y + 10.0, lines }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Event description tooltip shown at the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub left: f64,
    pub top: f64,
    pub text: String,
}

/// `"column : value"` for each column; numbers with three decimals and
/// absent columns as `N/A`.
pub fn info_lines(record: &Record, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|c| match record.try_get(c) {
            Some(v) => format!("{c} : {}", v.display_fixed3()),
            None => format!("{c} : N/A"),
        })
        .collect()
}

/// What a rendered chart answers when the pointer moves over it.
///
/// Pointer coordinates are relative to the canvas' top-left corner.
pub trait Hover {
    fn hover(&self, x: f64, y: f64) -> Option<InfoOverlay>;
}

/// Hit test over plotted points (dot, line, bubble and map point charts).
#[derive(Clone, Debug)]
pub struct PointHover {
    pub points: Vec<CanvasPoint>,
    pub columns: Vec<String>,
    pub canvas_height: f64,
}

impl PointHover {
    pub fn new(points: Vec<CanvasPoint>, columns: Vec<String>, canvas_height: f64) -> Self {
        Self { points, columns, canvas_height }
    }

    /// Index of the last point within [`POINT_HIT_RADIUS`] of the pointer.
    pub fn hit(&self, x: f64, y: f64) -> Option<usize> {
        let at = Point::new(x, self.canvas_height - y);
        self.points
            .iter()
            .rposition(|p| at.distance(p.position()) <= POINT_HIT_RADIUS)
    }
}

impl Hover for PointHover {
    fn hover(&self, x: f64, y: f64) -> Option<InfoOverlay> {
        let i = self.hit(x, y)?;
        let flip = i as f64 > self.points.len() as f64 / 2.0;
        Some(InfoOverlay::place(x, y, flip, info_lines(&self.points[i].record, &self.columns)))
    }
}

/// One bar in y-up coordinates, with its `[category, count]` record.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub record: Record,
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug)]
pub struct BarHover {
    pub bars: Vec<Bar>,
    pub columns: Vec<String>,
    pub canvas_height: f64,
    pub padding: f64,
}

impl BarHover {
    /// Index of the bar under the pointer; bars rest on the bottom padding.
    pub fn hit(&self, x: f64, y: f64) -> Option<usize> {
        self.bars.iter().rposition(|b| {
            let top = self.canvas_height - self.padding - b.height;
            x >= b.x && x <= b.x + b.width && y >= top && y <= top + b.height
        })
    }
}

impl Hover for BarHover {
    fn hover(&self, x: f64, y: f64) -> Option<InfoOverlay> {
        let i = self.hit(x, y)?;
        let flip = i as f64 > self.bars.len() as f64 / 2.0;
        Some(InfoOverlay::place(x, y, flip, info_lines(&self.bars[i].record, &self.columns)))
    }
}

/// Path hit test over map regions, each with its joined record if any.
#[derive(Clone, Debug)]
pub struct MapHover {
    pub regions: Vec<(Feature, Option<Record>)>,
    pub projection: Projection,
    pub columns: Vec<String>,
}

impl MapHover {
    pub fn hit(&self, x: f64, y: f64) -> Option<usize> {
        let at = Point::new(x, self.projection.height - y);
        self.regions
            .iter()
            .rposition(|(feature, _)| self.projection.hit_test(feature, at))
    }
}

impl Hover for MapHover {
    fn hover(&self, x: f64, y: f64) -> Option<InfoOverlay> {
        let i = self.hit(x, y)?;
        let flip = x > self.projection.width / 2.0;
        let lines = match &self.regions[i].1 {
            Some(record) => info_lines(record, &self.columns),
            None => self.columns.iter().map(|c| format!("{c} : N/A")).collect(),
        };
        Some(InfoOverlay::place(x, y, flip, lines))
    }
}

/// Screen-space box around an event title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleBox {
    pub x: f64,
    /// Bottom edge; the box spans `[y - height, y]`.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub description: String,
}

impl TitleBox {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y - self.height && y <= self.y
    }
}

/// Tooltip lookup over time-series event titles.
#[derive(Clone, Debug, Default)]
pub struct EventHover {
    pub titles: Vec<TitleBox>,
}

impl EventHover {
    /// Tooltip at the pointer for the last title under it; `None` hides it.
    pub fn tooltip(&self, x: f64, y: f64) -> Option<Tooltip> {
        self.titles
            .iter()
            .rev()
            .find(|t| t.contains(x, y))
            .map(|t| Tooltip { left: x, top: y, text: t.description.clone() })
    }
}
