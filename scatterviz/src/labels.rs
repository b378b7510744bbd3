// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The six clickable axis titles.
//!
//! X titles are stacked under the plot, centered. Y titles are rotated a quarter turn and stacked
//! left of the plot, outermost first. Exactly one title per axis carries the `active` class.

use std::time::Duration;

use kurbo::Point;
use peniko::color::palette::css;
use scatterviz_charts::{AXIS_TITLES, ChartLayout, TextMarkSpec};
use scatterviz_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::field::{Axis, Selection, XField, YField};
use crate::render::Stage;

/// Class of the selected title on each axis.
pub const ACTIVE_CLASS: &str = "active";
/// Class of the other titles.
pub const INACTIVE_CLASS: &str = "inactive";
/// Title font size; also the `1em` shift of the rotated titles.
pub const SELECTOR_FONT_SIZE: f64 = 16.0;

const SELECTOR_ID_BASE: u64 = 5_000;
const X_TITLE_OFFSET: f64 = 40.0;
const TITLE_SPACING: f64 = 20.0;

/// One clickable axis title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// A title under the x axis.
    X(XField),
    /// A title beside the y axis.
    Y(YField),
}

impl Selector {
    /// Every title: x titles top to bottom, then y titles outermost first.
    pub const ALL: [Self; 6] = [
        Self::X(XField::ALL[0]),
        Self::X(XField::ALL[1]),
        Self::X(XField::ALL[2]),
        Self::Y(YField::ALL[0]),
        Self::Y(YField::ALL[1]),
        Self::Y(YField::ALL[2]),
    ];

    /// The axis this title switches.
    pub fn axis(self) -> Axis {
        match self {
            Self::X(_) => Axis::X,
            Self::Y(_) => Axis::Y,
        }
    }

    /// Title text.
    pub fn title(self) -> &'static str {
        match self {
            Self::X(f) => f.title(),
            Self::Y(f) => f.title(),
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::X(f) => XField::ALL.iter().position(|c| *c == f).unwrap_or_default(),
            Self::Y(f) => YField::ALL.iter().position(|c| *c == f).unwrap_or_default(),
        }
    }

    /// Stable mark id of the title.
    pub fn id(self) -> MarkId {
        let offset = match self {
            Self::X(_) => 0,
            Self::Y(_) => 3,
        };
        MarkId::from_raw(SELECTOR_ID_BASE + offset + self.slot() as u64)
    }

    /// Whether `selection` has this title's field active.
    pub fn is_active(self, selection: Selection) -> bool {
        match self {
            Self::X(f) => selection.x == f,
            Self::Y(f) => selection.y == f,
        }
    }

    /// Anchor of the title in plot coordinates.
    pub fn position(self, layout: &ChartLayout) -> Point {
        let plot = layout.plot_size();
        let step = TITLE_SPACING * self.slot() as f64;
        match self {
            Self::X(_) => Point::new(plot.width / 2.0, plot.height + X_TITLE_OFFSET + step),
            Self::Y(_) => Point::new(
                step - layout.margin.left + SELECTOR_FONT_SIZE,
                plot.height / 2.0,
            ),
        }
    }

    /// The title mark, styled for `selection`.
    pub fn mark(self, layout: &ChartLayout, selection: Selection) -> Mark {
        let (class, fill) = if self.is_active(selection) {
            (ACTIVE_CLASS, css::BLACK)
        } else {
            (INACTIVE_CLASS, css::GRAY)
        };
        let angle = match self {
            Self::X(_) => 0.0,
            Self::Y(_) => -90.0,
        };
        TextMarkSpec::new(self.id(), self.position(layout), self.title())
            .with_font_size(SELECTOR_FONT_SIZE)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Alphabetic)
            .with_angle(angle)
            .with_fill(fill)
            .with_class(class)
            .with_z_index(AXIS_TITLES)
            .mark()
    }
}

/// All six titles for `selection`.
pub fn selector_marks(layout: &ChartLayout, selection: Selection) -> Vec<Mark> {
    Selector::ALL
        .iter()
        .map(|s| s.mark(layout, selection))
        .collect()
}

/// The title under `point` (plot coordinates) as displayed at `now`, if any.
pub fn selector_at(stage: &Stage, point: Point, now: Duration) -> Option<Selector> {
    Selector::ALL.into_iter().find(|s| {
        stage
            .displayed(s.id(), now)
            .is_some_and(|m| m.payload.contains(point))
    })
}
