// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal retained scene for `ScatterViz`.
//!
//! The scene stores evaluated marks (circles, text, paths) under stable [`MarkId`]s,
//! grouped into layers. Each renderer owns a layer and resubmits its full mark list; the scene
//! answers with [`MarkDiff`]s (enter / update / exit) that downstream consumers use to drive
//! animation and output.
//!
//! - [`Scene`] keeps the current target state of every mark.
//! - [`Transitions`] interpolates updated marks from their displayed state to the target.
//!
//! Text shaping is out of scope; text marks store unshaped strings and use a heuristic for
//! bounds.

#![no_std]

extern crate alloc;

mod mark;
mod scene;
mod transition;

pub use mark::{
    CircleMark, Mark, MarkId, MarkKind, MarkPayload, PathMark, TextAnchor, TextBaseline,
    TextMark,
};
pub use scene::{LayerId, MarkDiff, Scene};
pub use transition::{Easing, Transitions};
