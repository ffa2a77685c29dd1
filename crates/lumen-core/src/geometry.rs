// File: crates/lumen-core/src/geometry.rs
// Summary: Pixel-space points, GeoJSON bounding boxes and the shared map projection.

use skia_safe as skia;
use tracing::warn;

use crate::geojson::{Feature, FeatureCollection, Ring};
use crate::scale::map_value;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    #[inline]
    pub fn to_skia(self) -> skia::Point {
        skia::Point::new(self.x as f32, self.y as f32)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extent of every ring coordinate in a feature collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Running min/max of X and Y over every Polygon/MultiPolygon ring.
    /// Returns `None` when the collection has no usable coordinate.
    pub fn of(fc: &FeatureCollection) -> Option<Self> {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut skipped = 0usize;
        for feature in &fc.features {
            for polygon in feature.polygons() {
                for ring in polygon {
                    for pos in ring {
                        let (Some(&x), Some(&y)) = (pos.first(), pos.get(1)) else {
                            skipped += 1;
                            continue;
                        };
                        min.x = min.x.min(x);
                        max.x = max.x.max(x);
                        min.y = min.y.min(y);
                        max.y = max.y.max(y);
                    }
                }
            }
        }
        if skipped > 0 {
            warn!(skipped, "positions with fewer than two ordinates ignored");
        }
        if min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite() {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// `[[minX, minY], [maxX, maxY]]`.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.min.x, self.min.y], [self.max.x, self.max.y]]
    }

    pub fn x_domain(&self) -> [f64; 2] {
        [self.min.x, self.max.x]
    }

    pub fn y_domain(&self) -> [f64; 2] {
        [self.min.y, self.max.y]
    }
}

/// Projection of geographic coordinates onto a padded canvas.
///
/// Every ring of every feature goes through the same bounding box, so a
/// collection is never rescaled per polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub bbox: BoundingBox,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Projection {
    pub fn new(bbox: BoundingBox, width: f64, height: f64, padding: f64) -> Self {
        Self { bbox, width, height, padding }
    }

    pub fn project(&self, x: f64, y: f64) -> Point {
        Point::new(
            map_value(x, self.padding, self.width - 2.0 * self.padding, &self.bbox.x_domain()),
            map_value(y, self.padding, self.height - 2.0 * self.padding, &self.bbox.y_domain()),
        )
    }

    /// Projected points of a ring; short positions are dropped.
    pub fn project_ring(&self, ring: &Ring) -> Vec<Point> {
        ring.iter()
            .filter_map(|pos| match (pos.first(), pos.get(1)) {
                (Some(&x), Some(&y)) => Some(self.project(x, y)),
                _ => None,
            })
            .collect()
    }

    /// Closed path for one ring, as drawn.
    pub fn ring_path(&self, ring: &Ring) -> skia::Path {
        let mut path = skia::PathBuilder::new();
        trace_ring(&mut path, &self.project_ring(ring));
        path.close();
        path.detach()
    }

    /// One path holding every ring of a feature, traced with the same routine
    /// as [`Projection::ring_path`]; used for hit testing.
    pub fn feature_path(&self, feature: &Feature) -> skia::Path {
        let mut path = skia::PathBuilder::new();
        for polygon in feature.polygons() {
            for ring in polygon {
                trace_ring(&mut path, &self.project_ring(ring));
                path.close();
            }
        }
        path.detach()
    }

    /// Whether a y-up surface point falls inside the feature's traced path.
    pub fn hit_test(&self, feature: &Feature, at: Point) -> bool {
        self.feature_path(feature).contains(at.to_skia())
    }
}

fn trace_ring(path: &mut skia::PathBuilder, points: &[Point]) {
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(p.to_skia());
        } else {
            path.line_to(p.to_skia());
        }
    }
}
