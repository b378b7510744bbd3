// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value with the precision implied by the tick `step`.
///
/// A step of `0.5` gives one decimal, `20` gives none. The integer part gets `,` thousands
/// separators, so `1200` with step `100` reads `1,200`.
pub fn format_tick_with_step(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let precision = precision_for_step(step);
    let raw = format!("{value:.precision$}");
    group_thousands(&raw)
}

fn precision_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "exponent of a finite f64 is bounded by a few hundred"
        )]
        {
            (-exponent).min(20.0) as usize
        }
    }
}

fn group_thousands(raw: &str) -> String {
    let (sign, digits) = match raw.strip_prefix('-') {
        // Values that round to zero read "0", never "-0".
        Some(rest) if rest.bytes().all(|b| matches!(b, b'0' | b'.')) => ("", rest),
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(raw.len() + int.len() / 3);
    out.push_str(sign);
    let len = int.len();
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_follow_step() {
        assert_eq!(format_tick_with_step(5.0, 0.5), "5.0");
        assert_eq!(format_tick_with_step(6.5, 0.5), "6.5");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(40.0, 10.0), "40");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_tick_with_step(1_200.0, 100.0), "1,200");
        assert_eq!(format_tick_with_step(1_234_567.0, 1.0), "1,234,567");
        assert_eq!(format_tick_with_step(-1_050.0, 50.0), "-1,050");
        assert_eq!(format_tick_with_step(999.0, 1.0), "999");
    }

    #[test]
    fn negative_zero_reads_as_zero() {
        assert_eq!(format_tick_with_step(-0.0, 0.5), "0.0");
        assert_eq!(format_tick_with_step(-0.04, 0.5), "0.0");
        assert_eq!(format_tick_with_step(-0.4, 1.0), "0");
        assert_eq!(format_tick_with_step(-0.06, 0.5), "-0.1");
    }
}
