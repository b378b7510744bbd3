// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: stable identity plus an evaluated payload.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape};
use peniko::Brush;

/// Stable mark identity.
///
/// Ids survive across renders so the scene can tell an update from an enter/exit pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for a keyed row within a mark group (e.g. one glyph per record).
    ///
    /// The result is a 64-bit mix of `(group, key)` with the top bit set, so it never collides
    /// with the small `from_raw` ids used for fixed chrome.
    pub const fn for_row(group: u64, key: u64) -> Self {
        let mut z = group
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(key)
            .wrapping_add(0x632B_E59B_D9B4_E019);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        Self(z | (1 << 63))
    }
}

/// The kind of a mark, derived from its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Circle (scatter glyph).
    Circle,
    /// Unshaped text run.
    Text,
    /// Arbitrary path (rules, ticks, domain lines).
    Path,
}

/// Horizontal text anchor, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    #[default]
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline, matching SVG `dominant-baseline`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Alphabetic baseline.
    #[default]
    Alphabetic,
    /// Vertically centered.
    Middle,
    /// Hanging baseline (text hangs below `y`).
    Hanging,
}

/// A filled circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleMark {
    /// Center in scene coordinates.
    pub center: Point,
    /// Radius in scene coordinates.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Element opacity in `0..=1`.
    pub opacity: f64,
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Optional font family.
    pub font_family: Option<String>,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation about `pos`, in degrees.
    pub angle: f64,
    /// Fill paint.
    pub fill: Brush,
}

/// A filled and/or stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables stroking.
    pub stroke_width: f64,
}

/// The evaluated payload of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// See [`CircleMark`].
    Circle(CircleMark),
    /// See [`TextMark`].
    Text(TextMark),
    /// See [`PathMark`].
    Path(PathMark),
}

impl From<CircleMark> for MarkPayload {
    fn from(value: CircleMark) -> Self {
        Self::Circle(value)
    }
}

impl From<TextMark> for MarkPayload {
    fn from(value: TextMark) -> Self {
        Self::Text(value)
    }
}

impl From<PathMark> for MarkPayload {
    fn from(value: PathMark) -> Self {
        Self::Path(value)
    }
}

impl MarkPayload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Circle(_) => MarkKind::Circle,
            Self::Text(_) => MarkKind::Text,
            Self::Path(_) => MarkKind::Path,
        }
    }

    /// Returns approximate bounds in scene coordinates.
    ///
    /// Text bounds use a ~0.6em average glyph width and account for rotation. Returns `None`
    /// when the geometry is not finite (e.g. a glyph positioned from a `NaN` value).
    pub fn bounds(&self) -> Option<Rect> {
        let r = match self {
            Self::Circle(c) => Rect::new(
                c.center.x - c.radius,
                c.center.y - c.radius,
                c.center.x + c.radius,
                c.center.y + c.radius,
            ),
            Self::Text(t) => text_bounds(t),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    return None;
                }
                p.path.bounding_box()
            }
        };
        (r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()).then_some(r)
    }

    /// Hit test against `pt`.
    ///
    /// Circles use their exact geometry; everything else uses [`MarkPayload::bounds`].
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Circle(c) => {
                let d = pt - c.center;
                d.hypot2() <= c.radius * c.radius
            }
            _ => self.bounds().is_some_and(|b| b.contains(pt)),
        }
    }

    /// Interpolates geometry from `self` toward `to` at `t` in `0..=1`.
    ///
    /// Positions, sizes and angles interpolate linearly; paint and content come from `to`.
    /// Paths only interpolate when both sides have the same element structure, otherwise they
    /// switch at `t >= 1`. A kind mismatch behaves the same way.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        match (self, to) {
            (Self::Circle(a), Self::Circle(b)) => Self::Circle(CircleMark {
                center: a.center.lerp(b.center, t),
                radius: lerp(a.radius, b.radius, t),
                fill: b.fill.clone(),
                opacity: lerp(a.opacity, b.opacity, t),
            }),
            (Self::Text(a), Self::Text(b)) => Self::Text(TextMark {
                pos: a.pos.lerp(b.pos, t),
                font_size: lerp(a.font_size, b.font_size, t),
                angle: lerp(a.angle, b.angle, t),
                ..b.clone()
            }),
            (Self::Path(a), Self::Path(b)) => match lerp_path(&a.path, &b.path, t) {
                Some(path) => Self::Path(PathMark {
                    path,
                    stroke_width: lerp(a.stroke_width, b.stroke_width, t),
                    ..b.clone()
                }),
                None => snap(self, to, t),
            },
            _ => snap(self, to, t),
        }
    }
}

/// A mark: stable id, paint order hint, optional style class, and payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Rendering order hint; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Optional style class (e.g. `active` / `inactive`).
    pub class: Option<String>,
    /// Evaluated payload.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark with `z_index = 0` and no class.
    pub fn new(id: MarkId, payload: impl Into<MarkPayload>) -> Self {
        Self {
            id,
            z_index: 0,
            class: None,
            payload: payload.into(),
        }
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the style class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn snap(from: &MarkPayload, to: &MarkPayload, t: f64) -> MarkPayload {
    if t >= 1.0 { to.clone() } else { from.clone() }
}

fn lerp_path(a: &BezPath, b: &BezPath, t: f64) -> Option<BezPath> {
    let (ea, eb) = (a.elements(), b.elements());
    if ea.len() != eb.len() {
        return None;
    }
    let mut out = Vec::with_capacity(ea.len());
    for (x, y) in ea.iter().zip(eb) {
        let el = match (*x, *y) {
            (PathEl::MoveTo(p), PathEl::MoveTo(q)) => PathEl::MoveTo(p.lerp(q, t)),
            (PathEl::LineTo(p), PathEl::LineTo(q)) => PathEl::LineTo(p.lerp(q, t)),
            (PathEl::QuadTo(p1, p2), PathEl::QuadTo(q1, q2)) => {
                PathEl::QuadTo(p1.lerp(q1, t), p2.lerp(q2, t))
            }
            (PathEl::CurveTo(p1, p2, p3), PathEl::CurveTo(q1, q2, q3)) => {
                PathEl::CurveTo(p1.lerp(q1, t), p2.lerp(q2, t), p3.lerp(q3, t))
            }
            (PathEl::ClosePath, PathEl::ClosePath) => PathEl::ClosePath,
            _ => return None,
        };
        out.push(el);
    }
    Some(BezPath::from_vec(out))
}

fn text_bounds(t: &TextMark) -> Rect {
    let width = 0.6 * t.font_size * t.text.chars().count() as f64;
    let half_height = 0.5 * t.font_size;
    let (x, y) = (t.pos.x, t.pos.y);
    let y_midline = match t.baseline {
        TextBaseline::Middle => y,
        TextBaseline::Alphabetic => y - 0.3 * t.font_size,
        TextBaseline::Hanging => y + 0.3 * t.font_size,
    };
    let (x0, x1) = match t.anchor {
        TextAnchor::Start => (x, x + width),
        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
        TextAnchor::End => (x - width, x),
    };
    let r = Rect::new(x0, y_midline - half_height, x1, y_midline + half_height);
    if t.angle == 0.0 {
        r
    } else {
        Affine::rotate_about(t.angle.to_radians(), t.pos).transform_rect_bbox(r)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use peniko::color::palette::css;

    use super::*;

    fn circle(x: f64, y: f64) -> MarkPayload {
        MarkPayload::Circle(CircleMark {
            center: Point::new(x, y),
            radius: 20.0,
            fill: css::BROWN.into(),
            opacity: 0.75,
        })
    }

    #[test]
    fn row_ids_are_stable_and_distinct_from_raw_ids() {
        assert_eq!(MarkId::for_row(1, 7), MarkId::for_row(1, 7));
        assert_ne!(MarkId::for_row(1, 7), MarkId::for_row(2, 7));
        assert_ne!(MarkId::for_row(1, 7), MarkId::for_row(1, 8));
        assert!(MarkId::for_row(0, 0).0 >= 1 << 63);
    }

    #[test]
    fn circle_lerp_moves_center_linearly() {
        let a = circle(0.0, 100.0);
        let b = circle(200.0, 100.0);
        let MarkPayload::Circle(mid) = a.lerp(&b, 0.25) else {
            panic!("expected circle");
        };
        assert!((mid.center.x - 50.0).abs() < 1e-9);
        assert!((mid.center.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn circle_hit_test_uses_radius() {
        let c = circle(50.0, 50.0);
        assert!(c.contains(Point::new(65.0, 50.0)));
        assert!(!c.contains(Point::new(71.0, 50.0)));
    }

    #[test]
    fn rotated_text_bounds_swap_extent() {
        let t = MarkPayload::Text(TextMark {
            pos: Point::new(0.0, 0.0),
            text: "Total Points".to_string(),
            font_size: 10.0,
            font_family: None,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            angle: -90.0,
            fill: css::BLACK.into(),
        });
        let b = t.bounds().expect("finite bounds");
        assert!(b.height() > b.width(), "rotated bounds: {b:?}");
    }

    #[test]
    fn non_finite_glyph_has_no_bounds() {
        assert!(circle(f64::NAN, 0.0).bounds().is_none());
    }

    #[test]
    fn mismatched_paths_snap_at_end() {
        let mut a = BezPath::new();
        a.move_to((0.0, 0.0));
        a.line_to((1.0, 0.0));
        let mut b = BezPath::new();
        b.move_to((0.0, 0.0));
        let pa = MarkPayload::Path(PathMark {
            path: a,
            fill: Brush::default(),
            stroke: Brush::default(),
            stroke_width: 1.0,
        });
        let pb = MarkPayload::Path(PathMark {
            path: b,
            fill: Brush::default(),
            stroke: Brush::default(),
            stroke_width: 1.0,
        });
        assert_eq!(pa.lerp(&pb, 0.5), pa);
        assert_eq!(pa.lerp(&pb, 1.0), pb);
    }
}
