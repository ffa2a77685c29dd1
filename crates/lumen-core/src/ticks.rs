// File: crates/lumen-core/src/ticks.rs
// Summary: Axis tick selection: "nice" dynamic intervals and stride-based tick filtering.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::scale::Extent;

/// Interval used when the data range is empty or degenerate.
pub const FALLBACK_INTERVAL: f64 = 1.0;

/// Upper bound on the ticks one axis may produce.
pub const MAX_TICKS: usize = 1000;

/// How an axis picks its ticks.
///
/// Serialized as a plain number: `-1` is dynamic, `0` every value, and any
/// positive number a fixed stride in data units.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "f64")]
pub enum IntervalMode {
    Dynamic,
    Every,
    Fixed(f64),
}

impl From<f64> for IntervalMode {
    fn from(code: f64) -> Self {
        if code > 0.0 {
            IntervalMode::Fixed(code)
        } else if code == 0.0 {
            IntervalMode::Every
        } else {
            IntervalMode::Dynamic
        }
    }
}

impl Default for IntervalMode {
    fn default() -> Self {
        IntervalMode::Every
    }
}

#[inline]
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Choose a tick interval of the form `{1, 2, 5} × 10^n` for `values`.
///
/// Aims for `max(5, round(n / 10))` ticks across the observed range, capped at
/// a quarter of [`MAX_TICKS`] so the rounded interval always stays under it.
pub fn dynamic_interval(values: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return FALLBACK_INTERVAL;
    }
    sorted.sort_by(f64::total_cmp);

    let range = sorted[sorted.len() - 1] - sorted[0];
    if range <= 0.0 {
        return FALLBACK_INTERVAL;
    }

    let desired = 5usize
        .max((sorted.len() as f64 / 10.0).round() as usize)
        .min(MAX_TICKS / 4);
    let raw = range / desired as f64;

    let log = raw.log10();
    let exponent = log.floor();
    let fraction = log - exponent;
    let factor = if fraction < 0.301 {
        1.0
    } else if fraction < 0.699 {
        2.0
    } else {
        5.0
    };
    factor * 10f64.powf(exponent)
}

/// Ticks from the minimum of `values` stepping by `interval`; the last tick is
/// always exactly the maximum. Every tick is rounded to two decimals, and
/// ticks that collapse onto the same rounded value are kept once.
///
/// Fails with [`Error::TooManyTicks`] when the stride would give more than
/// [`MAX_TICKS`] ticks over the data span.
pub fn values_by_interval(interval: f64, values: &[f64]) -> Result<Vec<f64>> {
    if !(interval.is_finite() && interval > 0.0) {
        return Err(Error::InvalidInterval { interval });
    }
    let Some(extent) = Extent::of(values) else {
        return Ok(Vec::new());
    };
    let span = extent.max - extent.min;
    if (span / interval).ceil() + 1.0 > MAX_TICKS as f64 {
        return Err(Error::TooManyTicks { interval, span });
    }

    let mut ticks = Vec::new();
    let mut k = 0u64;
    loop {
        let v = extent.min + k as f64 * interval;
        if v < extent.max {
            ticks.push(round2(v));
            k += 1;
        } else {
            ticks.push(round2(extent.max));
            break;
        }
    }
    ticks.dedup();
    Ok(ticks)
}

/// Resolve the tick values for `values` under `mode`.
pub fn tick_values(mode: IntervalMode, values: &[f64]) -> Result<Vec<f64>> {
    match mode {
        IntervalMode::Dynamic => values_by_interval(dynamic_interval(values), values),
        IntervalMode::Fixed(stride) => values_by_interval(stride, values),
        IntervalMode::Every => Ok(values.to_vec()),
    }
}
