// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An interactive scatter plot of team statistics.
//!
//! The viewer picks which statistic drives each axis by clicking one of three titles per axis.
//! Each pick rebuilds that axis's scale and animates the ruler, the circles and their labels to
//! the new positions, then rebinds the hover popups.
//!
//! - [`Dataset`] loads the CSV input.
//! - [`Coordinator`] is the selection state machine; [`Event`]s go in, [`Outcome`]s come out.
//! - [`Host`] owns the mounted chart and rebuilds it on resize.
//! - [`Session`] runs the line-oriented command stream against a host with a virtual clock.
//! - [`render_frame`] writes a sampled [`Frame`] as SVG.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use scatterviz::{Config, Dataset, Event, Host, XField};
//!
//! let config = Config::default();
//! let dataset = Dataset::from_path(&config.data)?;
//! let mut host = Host::new(config.container.clone(), config);
//! host.mount(dataset, Duration::ZERO)?;
//! host.dispatch(Event::ClickXLabel(XField::PassingTouchdowns), Duration::ZERO);
//! let svg = host.snapshot(Duration::from_millis(1000));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod command;
mod config;
mod coordinator;
mod data;
mod field;
mod host;
mod labels;
mod render;
mod scales;
mod svg;
mod tooltip;

pub use command::{Command, CommandError, Reply, Session, SessionError};
pub use config::{CONFIG_FILE, Config, ConfigError, MarginConfig, ViewportConfig};
pub use coordinator::{Coordinator, Event, Frame, Outcome};
pub use data::{ABBR_COLUMN, DataError, Dataset, Record};
pub use field::{Axis, Column, FieldError, Selection, XField, YField};
pub use host::Host;
pub use labels::{
    ACTIVE_CLASS, INACTIVE_CLASS, SELECTOR_FONT_SIZE, Selector, selector_at, selector_marks,
};
pub use render::{
    AxisHandle, GLYPH_LAYER, GLYPH_OPACITY, GLYPH_RADIUS, LABEL_DY, LABEL_FONT_SIZE, LABEL_LAYER,
    MarksHandle, SELECTOR_LAYER, Stage, TRANSITION, X_AXIS_LAYER, Y_AXIS_LAYER, bind_tooltips,
    render_axis, render_marks,
};
pub use scales::{DOMAIN_LOWER, DOMAIN_UPPER, ScaleError, build_scale};
pub use svg::{failure_svg, render_frame};
pub use tooltip::{LINE_BREAK, POPUP_OFFSET, Popup, TooltipBinding, format_number};
