// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation: one circle glyph and one centered label per datum.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use peniko::Brush;
use scatterviz_core::{CircleMark, Mark, MarkId, TextAnchor, TextBaseline};

use crate::scale::ScaleLinear;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// One plotted datum, already reduced to the selected `x`/`y` values.
#[derive(Clone, Debug, PartialEq)]
pub struct PointDatum {
    /// Stable row key; mark identity is derived from it.
    pub key: u64,
    /// Value on the x axis, in data units.
    pub x: f64,
    /// Value on the y axis, in data units.
    pub y: f64,
    /// Label text drawn over the glyph.
    pub label: String,
}

/// A point mark spec over two linear scales.
///
/// Glyph ids come from `(glyph_group, key)` and label ids from `(label_group, key)`, so
/// regenerating marks with new scales only moves existing marks.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Id group for glyphs.
    pub glyph_group: u64,
    /// Id group for labels.
    pub label_group: u64,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleLinear,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleLinear,
    /// Circle radius in scene coordinates.
    pub radius: f64,
    /// Glyph fill paint.
    pub fill: Brush,
    /// Glyph opacity.
    pub opacity: f64,
    /// Vertical label offset from the glyph center.
    pub label_dy: f64,
    /// Label fill paint.
    pub label_fill: Brush,
    /// Label font size.
    pub label_font_size: f64,
    /// Label font family.
    pub label_font_family: Option<String>,
}

impl PointMarkSpec {
    /// Creates a point mark spec with radius 6, full opacity, and default paints.
    pub fn new(
        glyph_group: u64,
        label_group: u64,
        x_scale: ScaleLinear,
        y_scale: ScaleLinear,
    ) -> Self {
        Self {
            glyph_group,
            label_group,
            x_scale,
            y_scale,
            radius: 6.0,
            fill: Brush::default(),
            opacity: 1.0,
            label_dy: 0.0,
            label_fill: Brush::default(),
            label_font_size: 12.0,
            label_font_family: None,
        }
    }

    /// Sets the circle radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the glyph fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the glyph opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the label offset, fill and font.
    pub fn with_label_style(
        mut self,
        dy: f64,
        fill: impl Into<Brush>,
        font_size: f64,
        font_family: Option<String>,
    ) -> Self {
        self.label_dy = dy;
        self.label_fill = fill.into();
        self.label_font_size = font_size;
        self.label_font_family = font_family;
        self
    }

    /// Returns the scene position of a datum's glyph center.
    pub fn center(&self, datum: &PointDatum) -> Point {
        Point::new(self.x_scale.map(datum.x), self.y_scale.map(datum.y))
    }

    /// Id of the glyph for row `key`.
    pub fn glyph_id(&self, key: u64) -> MarkId {
        MarkId::for_row(self.glyph_group, key)
    }

    /// Id of the label for row `key`.
    pub fn label_id(&self, key: u64) -> MarkId {
        MarkId::for_row(self.label_group, key)
    }

    /// Generates one circle per datum.
    pub fn glyph_marks(&self, data: &[PointDatum]) -> Vec<Mark> {
        data.iter()
            .map(|d| {
                Mark::new(
                    self.glyph_id(d.key),
                    CircleMark {
                        center: self.center(d),
                        radius: self.radius,
                        fill: self.fill.clone(),
                        opacity: self.opacity,
                    },
                )
                .with_z_index(z_order::SERIES_POINTS)
            })
            .collect()
    }

    /// Generates one middle-anchored label per datum, offset by `label_dy`.
    pub fn label_marks(&self, data: &[PointDatum]) -> Vec<Mark> {
        data.iter()
            .map(|d| {
                let c = self.center(d);
                let mut spec = TextMarkSpec::new(
                    self.label_id(d.key),
                    Point::new(c.x, c.y + self.label_dy),
                    d.label.clone(),
                )
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Alphabetic)
                .with_font_size(self.label_font_size)
                .with_fill(self.label_fill.clone())
                .with_z_index(z_order::SERIES_LABELS);
                if let Some(family) = &self.label_font_family {
                    spec = spec.with_font_family(family.clone());
                }
                spec.mark()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use scatterviz_core::MarkPayload;

    use super::*;

    fn spec() -> PointMarkSpec {
        PointMarkSpec::new(
            1,
            2,
            ScaleLinear::new((0.0, 10.0), (0.0, 100.0)),
            ScaleLinear::new((0.0, 10.0), (100.0, 0.0)),
        )
        .with_radius(20.0)
        .with_label_style(6.0, Brush::default(), 12.0, Some("sans-serif".to_string()))
    }

    fn datum(key: u64, x: f64, y: f64) -> PointDatum {
        PointDatum {
            key,
            x,
            y,
            label: "NE".to_string(),
        }
    }

    #[test]
    fn glyph_is_centered_on_scaled_values() {
        let marks = spec().glyph_marks(&[datum(0, 5.0, 2.5)]);
        let MarkPayload::Circle(c) = &marks[0].payload else {
            panic!("expected circle");
        };
        assert_eq!(c.center, Point::new(50.0, 75.0));
        assert_eq!(c.radius, 20.0);
    }

    #[test]
    fn label_sits_below_center_by_offset() {
        let marks = spec().label_marks(&[datum(0, 5.0, 2.5)]);
        let MarkPayload::Text(t) = &marks[0].payload else {
            panic!("expected text");
        };
        assert_eq!(t.pos, Point::new(50.0, 81.0));
        assert_eq!(t.anchor, TextAnchor::Middle);
        assert_eq!(t.font_family.as_deref(), Some("sans-serif"));
    }

    #[test]
    fn ids_depend_on_key_not_position() {
        let s = spec();
        let a = s.glyph_marks(&[datum(7, 1.0, 1.0)]);
        let b = s.glyph_marks(&[datum(7, 9.0, 9.0)]);
        assert_eq!(a[0].id, b[0].id);
        let labels = s.label_marks(&[datum(7, 1.0, 1.0)]);
        assert_ne!(a[0].id, labels[0].id);
    }

    #[test]
    fn labels_draw_above_glyphs() {
        let s = spec();
        let glyph = &s.glyph_marks(&[datum(0, 1.0, 1.0)])[0];
        let label = &s.label_marks(&[datum(0, 1.0, 1.0)])[0];
        assert_eq!(glyph.z_index, z_order::SERIES_POINTS);
        assert_eq!(label.z_index, z_order::SERIES_LABELS);
        assert!(label.z_index > glyph.z_index);
    }
}
