// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderers: pure functions from (previous handle, new scale or selection) to a new handle.
//!
//! Each renderer owns one or two scene layers. Committing a layer diffs it against the previous
//! render and schedules the standard transition for everything that moved.

use std::time::Duration;

use kurbo::Rect;
use peniko::color::palette::css;
use scatterviz_charts::{AxisSpec, PointDatum, PointMarkSpec, ScaleLinear};
use scatterviz_core::{Easing, LayerId, Mark, MarkDiff, MarkId, Scene, Transitions};
use tracing::debug;

use crate::data::Record;
use crate::field::{Axis, XField, YField};
use crate::tooltip::TooltipBinding;

/// Duration of every animated update.
pub const TRANSITION: Duration = Duration::from_millis(1000);

/// Layer of the x axis ruler.
pub const X_AXIS_LAYER: LayerId = LayerId(1);
/// Layer of the y axis ruler.
pub const Y_AXIS_LAYER: LayerId = LayerId(2);
/// Layer of the circles.
pub const GLYPH_LAYER: LayerId = LayerId(3);
/// Layer of the abbreviations drawn over the circles.
pub const LABEL_LAYER: LayerId = LayerId(4);
/// Layer of the six clickable field selectors.
pub const SELECTOR_LAYER: LayerId = LayerId(5);

const X_AXIS_ID_BASE: u64 = 1_000;
const Y_AXIS_ID_BASE: u64 = 2_000;
const GLYPH_GROUP: u64 = 3;
const LABEL_GROUP: u64 = 4;

/// Glyph radius.
pub const GLYPH_RADIUS: f64 = 20.0;
/// Glyph opacity.
pub const GLYPH_OPACITY: f64 = 0.75;
/// Vertical offset of a label below its glyph center.
pub const LABEL_DY: f64 = 6.0;
/// Label font size.
pub const LABEL_FONT_SIZE: f64 = 12.0;

/// Scene plus running transitions.
#[derive(Debug, Default)]
pub struct Stage {
    /// Target state of every mark.
    pub scene: Scene,
    /// Tweens from displayed to target state.
    pub transitions: Transitions,
}

impl Stage {
    /// Creates an empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces `layer` with `marks` and animates what moved.
    pub fn commit(&mut self, layer: LayerId, marks: Vec<Mark>, now: Duration) -> Vec<MarkDiff> {
        self.transitions.prune(now);
        let diffs = self.scene.tick_layer(layer, marks);
        self.transitions
            .start(&diffs, now, TRANSITION, Easing::CubicInOut);
        diffs
    }

    /// The mark `id` as displayed at `now`.
    pub fn displayed(&self, id: MarkId, now: Duration) -> Option<Mark> {
        self.scene
            .get(id)
            .map(|m| self.transitions.sample(m, now))
    }

    /// Every mark as displayed at `now`, in render order.
    pub fn frame(&self, now: Duration) -> Vec<Mark> {
        self.transitions.frame(&self.scene, now)
    }
}

/// The rendered state of one axis ruler.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisHandle {
    /// Which axis.
    pub axis: Axis,
    /// Scale the ruler was drawn with.
    pub scale: ScaleLinear,
    /// Tick values on the ruler.
    pub ticks: Vec<f64>,
    /// Scene changes made by the render that produced this handle.
    pub diffs: Vec<MarkDiff>,
}

fn axis_spec(scale: ScaleLinear, axis: Axis) -> AxisSpec {
    match axis {
        Axis::X => AxisSpec::bottom(X_AXIS_ID_BASE, scale),
        Axis::Y => AxisSpec::left(Y_AXIS_ID_BASE, scale),
    }
}

/// Draws or updates the ruler for `axis`.
///
/// The first render creates the domain line, ticks and tick labels. Later renders move ticks
/// whose value survives, add new ones, and drop stale ones, all over [`TRANSITION`]. Passing a
/// `previous` handle with the same scale leaves the scene untouched.
pub fn render_axis(
    stage: &mut Stage,
    plot: Rect,
    scale: ScaleLinear,
    axis: Axis,
    previous: Option<AxisHandle>,
    now: Duration,
) -> AxisHandle {
    if let Some(prev) = previous
        && prev.axis == axis
        && prev.scale == scale
    {
        return AxisHandle {
            diffs: Vec::new(),
            ..prev
        };
    }
    let spec = axis_spec(scale, axis);
    let (ticks, _) = spec.tick_values();
    let layer = match axis {
        Axis::X => X_AXIS_LAYER,
        Axis::Y => Y_AXIS_LAYER,
    };
    let diffs = stage.commit(layer, spec.marks(plot), now);
    debug!(%axis, ticks = ticks.len(), changed = diffs.len(), "rendered axis");
    AxisHandle {
        axis,
        scale,
        ticks,
        diffs,
    }
}

/// The rendered state of the circles and their labels.
#[derive(Clone, Debug, PartialEq)]
pub struct MarksHandle {
    /// Field driving x positions.
    pub x_field: XField,
    /// Field driving y positions.
    pub y_field: YField,
    /// X scale used.
    pub x_scale: ScaleLinear,
    /// Y scale used.
    pub y_scale: ScaleLinear,
    /// Glyph id per record, in record order.
    pub glyphs: Vec<MarkId>,
    /// Label id per record, in record order.
    pub labels: Vec<MarkId>,
    /// Popup binding, set by [`bind_tooltips`].
    pub tooltip: Option<TooltipBinding>,
    /// Scene changes made by the render that produced this handle.
    pub diffs: Vec<MarkDiff>,
}

impl MarksHandle {
    /// Record index of the glyph or label `id`.
    pub fn record_of(&self, id: MarkId) -> Option<usize> {
        self.glyphs
            .iter()
            .position(|g| *g == id)
            .or_else(|| self.labels.iter().position(|l| *l == id))
    }
}

fn point_spec(x_scale: ScaleLinear, y_scale: ScaleLinear) -> PointMarkSpec {
    PointMarkSpec::new(GLYPH_GROUP, LABEL_GROUP, x_scale, y_scale)
        .with_radius(GLYPH_RADIUS)
        .with_fill(css::BROWN)
        .with_opacity(GLYPH_OPACITY)
        .with_label_style(
            LABEL_DY,
            css::WHITE,
            LABEL_FONT_SIZE,
            Some("sans-serif".to_string()),
        )
}

/// Positions one circle and one label per record.
///
/// The circle for record `r` is centered at `(x_scale(r[x]), y_scale(r[y]))` and its label sits
/// [`LABEL_DY`] below. Identity is the record index, so re-rendering with new scales only
/// produces updates. The tooltip binding of `previous` is not carried over.
pub fn render_marks(
    stage: &mut Stage,
    records: &[Record],
    x_scale: ScaleLinear,
    y_scale: ScaleLinear,
    x_field: XField,
    y_field: YField,
    previous: Option<MarksHandle>,
    now: Duration,
) -> MarksHandle {
    if let Some(prev) = previous
        && prev.x_field == x_field
        && prev.y_field == y_field
        && prev.x_scale == x_scale
        && prev.y_scale == y_scale
    {
        return MarksHandle {
            tooltip: None,
            diffs: Vec::new(),
            ..prev
        };
    }

    let spec = point_spec(x_scale, y_scale);
    let data: Vec<PointDatum> = records
        .iter()
        .enumerate()
        .map(|(i, r)| PointDatum {
            key: i as u64,
            x: r.value(x_field.column()),
            y: r.value(y_field.column()),
            label: r.abbr.clone(),
        })
        .collect();

    let mut diffs = stage.commit(GLYPH_LAYER, spec.glyph_marks(&data), now);
    diffs.extend(stage.commit(LABEL_LAYER, spec.label_marks(&data), now));
    debug!(%x_field, %y_field, changed = diffs.len(), "rendered marks");

    MarksHandle {
        x_field,
        y_field,
        x_scale,
        y_scale,
        glyphs: data.iter().map(|d| spec.glyph_id(d.key)).collect(),
        labels: data.iter().map(|d| spec.label_id(d.key)).collect(),
        tooltip: None,
        diffs,
    }
}

/// Attaches a fresh popup binding for `(x_field, y_field)` to `marks`.
pub fn bind_tooltips(x_field: XField, y_field: YField, marks: MarksHandle) -> MarksHandle {
    MarksHandle {
        tooltip: Some(TooltipBinding::new(x_field, y_field)),
        ..marks
    }
}
