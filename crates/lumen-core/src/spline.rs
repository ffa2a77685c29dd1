// File: crates/lumen-core/src/spline.rs
// Summary: Catmull-Rom smoothing for closed (radial) and open point sequences.

use crate::geometry::Point;

/// Samples evaluated per segment, at `t = 0.0, 0.1, ..., 0.9`.
pub const SAMPLES_PER_SEGMENT: usize = 10;

#[inline]
fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let tt = t * t;
    let ttt = tt * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * tt
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * ttt)
}

fn segment(out: &mut Vec<Point>, p0: Point, p1: Point, p2: Point, p3: Point) {
    for step in 0..SAMPLES_PER_SEGMENT {
        let t = step as f64 / SAMPLES_PER_SEGMENT as f64;
        out.push(Point::new(
            catmull_rom(p0.x, p1.x, p2.x, p3.x, t),
            catmull_rom(p0.y, p1.y, p2.y, p3.y, t),
        ));
    }
}

/// Smooth a closed loop: indices wrap around, so the last point joins the
/// first. Produces `10 × n` points.
pub fn catmull_rom_closed(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(n * SAMPLES_PER_SEGMENT);
    for i in 0..n {
        let p0 = points[(i + n - 1) % n];
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];
        segment(&mut out, p0, p1, p2, p3);
    }
    out
}

/// Smooth an open sequence: the end points are repeated as their own
/// neighbours instead of wrapping. Produces `10 × (n - 1) + 1` points ending
/// exactly on the last input point.
pub fn catmull_rom_open(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 2 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity((n - 1) * SAMPLES_PER_SEGMENT + 1);
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        segment(&mut out, p0, p1, p2, p3);
    }
    out.push(points[n - 1]);
    out
}
