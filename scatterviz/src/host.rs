// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render target a chart mounts into.

use std::rc::Rc;
use std::time::Duration;

use scatterviz_charts::ChartLayout;
use tracing::{debug, info};

use crate::config::Config;
use crate::coordinator::{Coordinator, Event, Frame, Outcome};
use crate::data::Dataset;
use crate::scales::ScaleError;
use crate::svg;

/// Owns at most one mounted chart for a container.
#[derive(Debug)]
pub struct Host {
    container: String,
    config: Config,
    layout: ChartLayout,
    dataset: Option<Rc<Dataset>>,
    chart: Option<Coordinator>,
}

impl Host {
    /// Creates an empty host for `container`.
    pub fn new(container: impl Into<String>, config: Config) -> Self {
        let layout = config.viewport.layout();
        Self {
            container: container.into(),
            config,
            layout,
            dataset: None,
            chart: None,
        }
    }

    /// Container id.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Current canvas layout.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// The mounted chart, if any.
    pub fn chart(&self) -> Option<&Coordinator> {
        self.chart.as_ref()
    }

    /// Removes any existing chart and builds a fresh one for `dataset`.
    pub fn mount(&mut self, dataset: Dataset, now: Duration) -> Result<(), ScaleError> {
        self.dataset = Some(Rc::new(dataset));
        self.rebuild(now)
    }

    /// Handles a window resize by reconstructing the chart.
    ///
    /// With `responsive` off the canvas keeps its configured size. Either way the selection
    /// returns to its default.
    pub fn resize(&mut self, width: f64, height: f64, now: Duration) -> Result<(), ScaleError> {
        if self.config.responsive {
            self.layout = self.config.viewport.layout_with_size(width, height);
        }
        debug!(width, height, responsive = self.config.responsive, "resize");
        self.rebuild(now)
    }

    /// Forwards `event` to the mounted chart.
    pub fn dispatch(&mut self, event: Event, now: Duration) -> Outcome {
        match &mut self.chart {
            Some(chart) => chart.dispatch(event, now),
            None => Outcome::Unchanged,
        }
    }

    /// Samples the mounted chart at `now`.
    pub fn frame(&self, now: Duration) -> Option<Frame> {
        self.chart.as_ref().map(|c| c.frame(now))
    }

    /// Serializes the mounted chart at `now` as SVG.
    pub fn snapshot(&self, now: Duration) -> Option<String> {
        self.frame(now).map(|f| svg::render_frame(&f))
    }

    fn rebuild(&mut self, now: Duration) -> Result<(), ScaleError> {
        if self.chart.take().is_some() {
            debug!(container = %self.container, "removed existing chart");
        }
        let Some(dataset) = self.dataset.clone() else {
            return Ok(());
        };
        self.chart = Some(Coordinator::new(dataset, self.layout, now)?);
        info!(container = %self.container, "mounted chart");
        Ok(())
    }
}
