// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The axis-switching state machine.
//!
//! A [`Coordinator`] owns the selection and everything rendered from it. Every user input is an
//! [`Event`]; [`Coordinator::dispatch`] runs it to completion and reports what changed.

use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Vec2};
use scatterviz_charts::{ChartLayout, Size};
use scatterviz_core::{Mark, MarkDiff};
use tracing::{debug, info, warn};

use crate::data::Dataset;
use crate::field::{Axis, Selection, XField, YField};
use crate::labels::{Selector, selector_at, selector_marks};
use crate::render::{
    AxisHandle, MarksHandle, SELECTOR_LAYER, Stage, bind_tooltips, render_axis, render_marks,
};
use crate::scales::{ScaleError, build_scale};
use crate::tooltip::Popup;

/// A user input. Points are in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Click on an x axis title.
    ClickXLabel(XField),
    /// Click on a y axis title.
    ClickYLabel(YField),
    /// The pointer moved to a point over the canvas.
    PointerMove(Point),
    /// The pointer left the canvas.
    PointerLeave,
    /// A click at a point; resolved against the axis titles.
    ClickAt(Point),
}

/// What a dispatched event did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    /// One axis switched fields and the chart re-rendered.
    Reselected {
        /// The axis that switched.
        axis: Axis,
        /// Every scene change made by the re-render.
        diffs: Vec<MarkDiff>,
    },
    /// A popup appeared (or moved to another record).
    TooltipShown,
    /// The popup was hidden.
    TooltipHidden,
}

/// A sampled frame, ready to serialize.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Canvas size.
    pub canvas: Size,
    /// Translation from plot to canvas coordinates.
    pub offset: Vec2,
    /// Displayed marks in render order, in plot coordinates.
    pub marks: Vec<Mark>,
    /// Visible popup, in canvas coordinates.
    pub popup: Option<Popup>,
    /// Selection the frame was drawn for.
    pub selection: Selection,
}

/// One mounted chart.
#[derive(Debug)]
pub struct Coordinator {
    dataset: Rc<Dataset>,
    layout: ChartLayout,
    selection: Selection,
    stage: Stage,
    x_axis: AxisHandle,
    y_axis: AxisHandle,
    marks: MarksHandle,
    hovered: Option<usize>,
    popup: Option<Popup>,
}

impl Coordinator {
    /// Builds the chart for the default selection.
    ///
    /// Fails if either default field has no finite values.
    pub fn new(
        dataset: Rc<Dataset>,
        layout: ChartLayout,
        now: Duration,
    ) -> Result<Self, ScaleError> {
        let selection = Selection::default();
        let plot = layout.plot_rect();
        let x_scale = build_scale(dataset.records(), selection.x.column(), Axis::X, plot)?;
        let y_scale = build_scale(dataset.records(), selection.y.column(), Axis::Y, plot)?;

        let mut stage = Stage::new();
        let x_axis = render_axis(&mut stage, plot, x_scale, Axis::X, None, now);
        let y_axis = render_axis(&mut stage, plot, y_scale, Axis::Y, None, now);
        let marks = render_marks(
            &mut stage,
            dataset.records(),
            x_scale,
            y_scale,
            selection.x,
            selection.y,
            None,
            now,
        );
        let marks = bind_tooltips(selection.x, selection.y, marks);
        stage.commit(SELECTOR_LAYER, selector_marks(&layout, selection), now);

        info!(
            records = dataset.len(),
            width = layout.canvas.width,
            height = layout.canvas.height,
            "chart built"
        );
        Ok(Self {
            dataset,
            layout,
            selection,
            stage,
            x_axis,
            y_axis,
            marks,
            hovered: None,
            popup: None,
        })
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Canvas layout.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// The dataset the chart draws.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The x axis handle.
    pub fn x_axis(&self) -> &AxisHandle {
        &self.x_axis
    }

    /// The y axis handle.
    pub fn y_axis(&self) -> &AxisHandle {
        &self.y_axis
    }

    /// The marks handle.
    pub fn marks(&self) -> &MarksHandle {
        &self.marks
    }

    /// Visible popup, if any.
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Scene and transitions.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Returns `true` while any mark is still moving at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.stage.transitions.is_active(now)
    }

    /// Runs `event` to completion.
    pub fn dispatch(&mut self, event: Event, now: Duration) -> Outcome {
        match event {
            Event::ClickXLabel(field) => {
                if field == self.selection.x {
                    return Outcome::Unchanged;
                }
                let next = Selection {
                    x: field,
                    ..self.selection
                };
                self.reselect(next, Axis::X, now)
            }
            Event::ClickYLabel(field) => {
                if field == self.selection.y {
                    return Outcome::Unchanged;
                }
                let next = Selection {
                    y: field,
                    ..self.selection
                };
                self.reselect(next, Axis::Y, now)
            }
            Event::PointerMove(point) => self.hover(point, now),
            Event::PointerLeave => self.hide_popup(),
            Event::ClickAt(point) => match selector_at(&self.stage, self.to_plot(point), now) {
                Some(Selector::X(field)) => self.dispatch(Event::ClickXLabel(field), now),
                Some(Selector::Y(field)) => self.dispatch(Event::ClickYLabel(field), now),
                None => Outcome::Unchanged,
            },
        }
    }

    /// Samples every mark at `now`.
    pub fn frame(&self, now: Duration) -> Frame {
        Frame {
            canvas: self.layout.canvas,
            offset: self.layout.plot_offset(),
            marks: self.stage.frame(now),
            popup: self.popup.clone(),
            selection: self.selection,
        }
    }

    fn to_plot(&self, point: Point) -> Point {
        point - self.layout.plot_offset()
    }

    fn reselect(&mut self, next: Selection, axis: Axis, now: Duration) -> Outcome {
        let plot = self.layout.plot_rect();
        let column = match axis {
            Axis::X => next.x.column(),
            Axis::Y => next.y.column(),
        };
        let scale = match build_scale(self.dataset.records(), column, axis, plot) {
            Ok(scale) => scale,
            Err(err) => {
                warn!(%axis, %column, %err, "ignoring selection");
                return Outcome::Unchanged;
            }
        };

        let mut diffs = Vec::new();
        let (x_scale, y_scale) = match axis {
            Axis::X => {
                self.x_axis =
                    render_axis(&mut self.stage, plot, scale, axis, Some(self.x_axis.clone()), now);
                diffs.extend(self.x_axis.diffs.iter().cloned());
                (scale, self.y_axis.scale)
            }
            Axis::Y => {
                self.y_axis =
                    render_axis(&mut self.stage, plot, scale, axis, Some(self.y_axis.clone()), now);
                diffs.extend(self.y_axis.diffs.iter().cloned());
                (self.x_axis.scale, scale)
            }
        };
        let marks = render_marks(
            &mut self.stage,
            self.dataset.records(),
            x_scale,
            y_scale,
            next.x,
            next.y,
            Some(self.marks.clone()),
            now,
        );
        diffs.extend(marks.diffs.iter().cloned());
        self.marks = bind_tooltips(next.x, next.y, marks);
        self.selection = next;
        diffs.extend(self.stage.commit(
            SELECTOR_LAYER,
            selector_marks(&self.layout, next),
            now,
        ));
        self.hovered = None;
        self.popup = None;

        debug!(%axis, x = %next.x, y = %next.y, changed = diffs.len(), "reselected");
        Outcome::Reselected { axis, diffs }
    }

    /// The topmost record whose glyph or label is under `point` (plot coordinates) at `now`.
    fn record_at(&self, point: Point, now: Duration) -> Option<usize> {
        self.stage
            .frame(now)
            .iter()
            .rev()
            .filter(|m| m.payload.contains(point))
            .find_map(|m| self.marks.record_of(m.id))
    }

    fn hover(&mut self, point: Point, now: Duration) -> Outcome {
        let hit = self.record_at(self.to_plot(point), now);
        if hit == self.hovered {
            return Outcome::Unchanged;
        }
        match hit {
            Some(index) => {
                let (Some(binding), Some(record)) =
                    (self.marks.tooltip, self.dataset.records().get(index))
                else {
                    return Outcome::Unchanged;
                };
                self.hovered = Some(index);
                self.popup = Some(binding.popup(index, record, point));
                Outcome::TooltipShown
            }
            None => self.hide_popup(),
        }
    }

    fn hide_popup(&mut self) -> Outcome {
        self.hovered = None;
        if self.popup.take().is_some() {
            Outcome::TooltipHidden
        } else {
            Outcome::Unchanged
        }
    }
}
