// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `scatterviz_core`.
//!
//! This crate is a small layer above `scatterviz_core`:
//! - **Scales** map data values into plot coordinates.
//! - **Axes** and **point marks** are built by generating `scatterviz_core::Mark`s with stable
//!   ids, so the scene can diff one render against the next.
//!
//! Text shaping and layout are out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;

mod axis;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod point_mark;
mod rule_mark;
mod scale;
mod text_mark;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, StrokeStyle};
pub use format::format_tick_with_step;
pub use layout::{ChartLayout, Margin, Size};
pub use point_mark::{PointDatum, PointMarkSpec};
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleLinear, padded_domain_f64};
pub use text_mark::TextMarkSpec;
pub use z_order::*;
