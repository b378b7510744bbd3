// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover popups.

use kurbo::Point;

use crate::data::Record;
use crate::field::{XField, YField};

/// Distance the popup sits above the pointer.
pub const POPUP_OFFSET: f64 = 8.0;

/// Line separator inside popup content.
pub const LINE_BREAK: &str = "<br>";

/// Popup content for one selection, with its field labels captured at bind time.
///
/// A binding is never patched: a new selection gets a new binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TooltipBinding {
    x_field: XField,
    y_field: YField,
    x_label: &'static str,
    y_label: &'static str,
}

impl TooltipBinding {
    /// Captures the labels for `(x_field, y_field)`.
    pub fn new(x_field: XField, y_field: YField) -> Self {
        Self {
            x_field,
            y_field,
            x_label: x_field.tooltip_label(),
            y_label: y_field.tooltip_label(),
        }
    }

    /// The x field this binding reports.
    pub fn x_field(&self) -> XField {
        self.x_field
    }

    /// The y field this binding reports.
    pub fn y_field(&self) -> YField {
        self.y_field
    }

    /// Popup content for `record`: `"{abbr}<br>{x label} {x}<br>{y label} {y}"`.
    pub fn content(&self, record: &Record) -> String {
        format!(
            "{abbr}{LINE_BREAK}{xl} {xv}{LINE_BREAK}{yl} {yv}",
            abbr = record.abbr,
            xl = self.x_label,
            xv = format_number(record.value(self.x_field.column())),
            yl = self.y_label,
            yv = format_number(record.value(self.y_field.column())),
        )
    }

    /// Builds the popup for `record`, placed just above `pointer`.
    pub fn popup(&self, index: usize, record: &Record, pointer: Point) -> Popup {
        Popup {
            record: index,
            anchor: Point::new(pointer.x, pointer.y - POPUP_OFFSET),
            html: self.content(record),
        }
    }
}

/// A visible popup.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    /// Index of the hovered record.
    pub record: usize,
    /// Bottom-center of the popup in canvas coordinates.
    pub anchor: Point,
    /// Content with `<br>` line breaks.
    pub html: String,
}

impl Popup {
    /// Content split into display lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.html.split(LINE_BREAK)
    }
}

/// Formats a number the way a browser prints it in a template string.
///
/// Integers print without a fraction (`35`), non-integers use the shortest round-trip form
/// (`6.5`), and non-finite values print as `NaN`, `Infinity`, `-Infinity`.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let abs = v.abs();
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{v:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ne() -> Record {
        Record {
            abbr: "NE".to_string(),
            passing_touchdowns: 35.0,
            total_touchdowns: 55.0,
            yards_per_pass_attempt: 6.5,
            ..Record::default()
        }
    }

    #[test]
    fn content_uses_bound_labels_and_keeps_double_space() {
        let b = TooltipBinding::new(XField::PassingTouchdowns, YField::TotalTouchdowns);
        assert_eq!(
            b.content(&ne()),
            "NE<br>Passing Touchdowns: 35<br>Total Touchdowns:  55"
        );
    }

    #[test]
    fn fractional_values_print_shortest() {
        let b = TooltipBinding::new(XField::YardsPerPassAttempt, YField::TotalPoints);
        assert_eq!(
            b.content(&ne()),
            "NE<br>Yards Per Pass Attempt: 6.5<br>Total Points: 0"
        );
    }

    #[test]
    fn numbers_format_like_a_browser() {
        assert_eq!(format_number(35.0), "35");
        assert_eq!(format_number(6.5), "6.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn popup_sits_above_pointer_and_splits_lines() {
        let b = TooltipBinding::new(XField::PassingTouchdowns, YField::TotalTouchdowns);
        let p = b.popup(3, &ne(), Point::new(200.0, 100.0));
        assert_eq!(p.anchor, Point::new(200.0, 92.0));
        assert_eq!(p.record, 3);
        let lines: Vec<&str> = p.lines().collect();
        assert_eq!(lines, ["NE", "Passing Touchdowns: 35", "Total Touchdowns:  55"]);
    }
}
