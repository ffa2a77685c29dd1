// File: crates/lumen-core/src/scale.rs
// Summary: Linear value-to-pixel mapping over observed data extents.

/// Observed minimum and maximum of a slice of values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Min/max of all finite values, or `None` when there are none.
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Grow the extent so it also covers `v`.
    pub fn include(mut self, v: f64) -> Self {
        if v.is_finite() {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
        self
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.span().abs() < 1e-12
    }
}

/// Map `value` into `[range_min, range_min + range_span]` using the observed
/// min/max of `domain` as the source interval.
///
/// The extent is recomputed from `domain` on every call; series that share an
/// axis must pass the same reference slice. A constant or empty domain maps
/// every value to `range_min`.
pub fn map_value(value: f64, range_min: f64, range_span: f64, domain: &[f64]) -> f64 {
    match Extent::of(domain) {
        Some(extent) => map_with_extent(value, range_min, range_span, extent),
        None => range_min,
    }
}

/// Same as [`map_value`] with a precomputed extent.
#[inline]
pub fn map_with_extent(value: f64, range_min: f64, range_span: f64, extent: Extent) -> f64 {
    if extent.is_degenerate() {
        return range_min;
    }
    range_min + ((value - extent.min) / extent.span()) * range_span
}

/// Map every value of `values` against the extent of `values` itself.
pub fn map_all(values: &[f64], range_min: f64, range_span: f64) -> Vec<f64> {
    match Extent::of(values) {
        Some(extent) => values
            .iter()
            .map(|&v| map_with_extent(v, range_min, range_span, extent))
            .collect(),
        None => vec![range_min; values.len()],
    }
}

/// Linear scale with an explicit domain and range, used where the domain is
/// configured rather than observed (radial radius, bubble legends, gradients).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[inline]
    pub fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span.abs() < 1e-12 {
            return self.range.0;
        }
        self.range.0 + (value - self.domain.0) / span * (self.range.1 - self.range.0)
    }

    /// Map and clamp the normalized position to `[0, 1]` first.
    #[inline]
    pub fn map_clamped(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span.abs() < 1e-12 {
            return self.range.0;
        }
        let t = ((value - self.domain.0) / span).clamp(0.0, 1.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        if span.abs() < 1e-12 {
            return self.domain.0;
        }
        self.domain.0 + (px - self.range.0) / span * (self.domain.1 - self.domain.0)
    }
}
