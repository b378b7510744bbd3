// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scales and tick generation.
//!
//! Tick values follow the usual "1, 2, 5 times a power of ten" rule and always lie inside the
//! domain, so an axis never draws a tick past its domain line.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

// Step thresholds: sqrt(50), sqrt(10), sqrt(2).
const E10: f64 = 7.0710678118654755;
const E5: f64 = 3.1622776601683795;
const E2: f64 = 1.4142135623730951;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps every finite value to the middle of the range. Non-finite inputs
    /// produce non-finite outputs.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            if x.is_nan() {
                return x;
            }
            return r0 + 0.5 * (r1 - r0);
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the domain as authored.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the spacing between the values produced by [`ScaleLinear::ticks`].
    ///
    /// Used to pick a label precision. Returns `0` when no step can be derived.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (a, b) = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        match tick_spec(lo, hi, count as f64) {
            Some((_, _, inc)) if inc < 0.0 => -1.0 / inc,
            Some((_, _, inc)) => inc,
            None => 0.0,
        }
    }
}

/// `(i1, i2, inc)`: ticks are `i * inc` for positive `inc`, `i / -inc` for negative `inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10_f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let step = 10_f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    let n = (i2 - i1).min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "non-negative and capped at 10k"
    )]
    let n = n as u64;
    let mut out: Vec<f64> = (0..=n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Computes `(lower * min, upper * max)` over the finite values of `values`.
///
/// `NaN` and `±Infinity` are both ignored. Returns `None` if no finite values are present.
pub fn padded_domain_f64(
    values: impl IntoIterator<Item = f64>,
    lower: f64,
    upper: f64,
) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min * lower, max * upper))
    } else {
        None
    }
}
