// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An axis is a domain line, one tick per tick value, and one label per tick. Tick and label
//! ids are keyed by the tick *value*, so when the scale changes a surviving value keeps its
//! marks (and moves), new values enter, and stale values exit.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use scatterviz_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_tick_with_step;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::ScaleLinear;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Font family for tick labels.
    pub label_font_family: Option<String>,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
            label_font_family: Some(String::from("sans-serif")),
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis along the bottom edge of the plot.
    Bottom,
    /// A vertical axis along the left edge of the plot.
    Left,
}

/// An axis over a linear scale.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Stable-id base. The domain line uses the base itself; ticks and labels hash their tick
    /// value under `id_base + 1` and `id_base + 2`.
    pub id_base: u64,
    /// The instantiated scale (range already in plot coordinates).
    pub scale: ScaleLinear,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
}

impl AxisSpec {
    /// Creates a new axis.
    ///
    /// Defaults: `tick_count = 10`, `tick_size = 6`, `tick_padding = 3`,
    /// `AxisStyle::default()`.
    pub fn new(id_base: u64, scale: ScaleLinear, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale,
            orient,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: ScaleLinear) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: ScaleLinear) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Returns the tick values and their step.
    pub fn tick_values(&self) -> (Vec<f64>, f64) {
        (
            self.scale.ticks(self.tick_count),
            self.scale.tick_step(self.tick_count),
        )
    }

    /// Id of the tick rule for value `v`.
    pub fn tick_id(&self, v: f64) -> MarkId {
        MarkId::for_row(self.id_base + 1, value_key(v))
    }

    /// Id of the tick label for value `v`.
    pub fn label_id(&self, v: f64) -> MarkId {
        MarkId::for_row(self.id_base + 2, value_key(v))
    }

    /// Id of the domain line.
    pub fn domain_id(&self) -> MarkId {
        MarkId::from_raw(self.id_base)
    }

    /// Generate axis marks for the given plot rectangle.
    ///
    /// A bottom axis sits on `plot.y1`; a left axis sits on `plot.x0`.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        match self.orient {
            AxisOrient::Bottom => self.marks_bottom(plot),
            AxisOrient::Left => self.marks_left(plot),
        }
    }

    fn marks_bottom(&self, plot: Rect) -> Vec<Mark> {
        let y = plot.y1;
        let tick_size = self.tick_size.abs();
        let (ticks, step) = self.tick_values();
        let mut out = Vec::with_capacity(1 + 2 * ticks.len());

        out.push(self.rule(self.domain_id(), (plot.x0, y), (plot.x1, y)));

        for v in ticks {
            let x = self.scale.map(v);
            if !x.is_finite() || x < plot.x0 - 1.0e-9 || x > plot.x1 + 1.0e-9 {
                continue;
            }
            out.push(self.rule(self.tick_id(v), (x, y), (x, y + tick_size)));
            out.push(self.label(
                self.label_id(v),
                Point::new(x, y + tick_size + self.tick_padding),
                format_tick_with_step(v, step),
                TextAnchor::Middle,
                TextBaseline::Hanging,
            ));
        }
        out
    }

    fn marks_left(&self, plot: Rect) -> Vec<Mark> {
        let x = plot.x0;
        let tick_size = self.tick_size.abs();
        let (ticks, step) = self.tick_values();
        let mut out = Vec::with_capacity(1 + 2 * ticks.len());

        out.push(self.rule(self.domain_id(), (x, plot.y0), (x, plot.y1)));

        for v in ticks {
            let y = self.scale.map(v);
            if !y.is_finite() || y < plot.y0 - 1.0e-9 || y > plot.y1 + 1.0e-9 {
                continue;
            }
            out.push(self.rule(self.tick_id(v), (x - tick_size, y), (x, y)));
            out.push(self.label(
                self.label_id(v),
                Point::new(x - tick_size - self.tick_padding, y),
                format_tick_with_step(v, step),
                TextAnchor::End,
                TextBaseline::Middle,
            ));
        }
        out
    }

    fn rule(&self, id: MarkId, from: (f64, f64), to: (f64, f64)) -> Mark {
        RuleMarkSpec::new(id, from, to)
            .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
            .with_z_index(z_order::AXIS_RULES)
            .mark()
    }

    fn label(
        &self,
        id: MarkId,
        pos: Point,
        text: String,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) -> Mark {
        let mut spec = TextMarkSpec::new(id, pos, text)
            .with_font_size(self.style.label_font_size)
            .with_fill(self.style.label_fill.clone())
            .with_anchor(anchor)
            .with_baseline(baseline)
            .with_z_index(z_order::AXIS_LABELS);
        if let Some(family) = &self.style.label_font_family {
            spec = spec.with_font_family(family.clone());
        }
        spec.mark()
    }
}

/// Quantizes a tick value so that values computed by different tick passes share a key.
fn value_key(v: f64) -> u64 {
    let q = (v * 1.0e6).round();
    if !q.is_finite() {
        return u64::MAX;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "saturating float-to-int cast; only used as a hash key"
    )]
    let k = q as i64;
    k.cast_unsigned()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use scatterviz_core::{MarkKind, MarkPayload};

    use super::*;

    const PLOT: Rect = Rect::new(0.0, 0.0, 820.0, 380.0);

    fn labels(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn bottom_axis_emits_domain_ticks_and_labels() {
        let axis = AxisSpec::bottom(100, ScaleLinear::new((4.8, 10.8), (0.0, 820.0)));
        let marks = axis.marks(PLOT);
        let paths = marks.iter().filter(|m| m.kind() == MarkKind::Path).count();
        let texts = labels(&marks);
        assert_eq!(texts.len(), 12);
        assert_eq!(paths, 13);
        assert_eq!(texts.first().map(String::as_str), Some("5.0"));
        assert_eq!(texts.last().map(String::as_str), Some("10.5"));
    }

    #[test]
    fn bottom_ticks_hang_below_plot() {
        let axis = AxisSpec::bottom(100, ScaleLinear::new((0.0, 10.0), (0.0, 820.0)));
        let marks = axis.marks(PLOT);
        let tick = marks
            .iter()
            .find(|m| m.id == axis.tick_id(5.0))
            .expect("tick for 5");
        assert_eq!(tick.payload.bounds(), Some(Rect::new(410.0, 380.0, 410.0, 386.0)));
        let label = marks
            .iter()
            .find(|m| m.id == axis.label_id(5.0))
            .expect("label for 5");
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text");
        };
        assert_eq!(t.pos, Point::new(410.0, 389.0));
        assert_eq!(t.anchor, TextAnchor::Middle);
    }

    #[test]
    fn left_labels_are_end_anchored_left_of_ticks() {
        let axis = AxisSpec::left(200, ScaleLinear::new((0.0, 100.0), (380.0, 0.0)));
        let marks = axis.marks(PLOT);
        let label = marks
            .iter()
            .find(|m| m.id == axis.label_id(50.0))
            .expect("label for 50");
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text");
        };
        assert_eq!(t.pos, Point::new(-9.0, 190.0));
        assert_eq!(t.anchor, TextAnchor::End);
        assert_eq!(t.text, "50");
    }

    #[test]
    fn tick_identity_is_keyed_by_value() {
        let a = AxisSpec::bottom(100, ScaleLinear::new((0.0, 10.0), (0.0, 820.0)));
        let b = AxisSpec::bottom(100, ScaleLinear::new((0.0, 20.0), (0.0, 820.0)));
        assert_eq!(a.tick_id(4.0), b.tick_id(4.0));
        assert_eq!(a.tick_id(0.1 + 0.2), a.tick_id(0.3));
        assert_ne!(a.tick_id(4.0), a.label_id(4.0));
    }

    #[test]
    fn labels_use_the_axis_style() {
        let axis = AxisSpec::left(1, ScaleLinear::new((0.0, 10.0), (380.0, 0.0)));
        let marks = axis.marks(PLOT);
        assert!(marks.iter().any(|m| m.id == axis.domain_id()));
        for m in &marks {
            if let MarkPayload::Text(t) = &m.payload {
                assert_eq!(t.font_size, 10.0);
                assert_eq!(t.font_family.as_deref(), Some("sans-serif"));
                assert_eq!(m.z_index, z_order::AXIS_LABELS);
            }
        }
    }
}
