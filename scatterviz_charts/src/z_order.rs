// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! `scatterviz_core` marks carry an explicit `z_index` for render ordering. Renderers sort by
//! `(z_index, MarkId)` for a deterministic tie-break.

/// Point glyphs (circles).
pub const SERIES_POINTS: i32 = 20;
/// Labels drawn over point glyphs.
pub const SERIES_LABELS: i32 = 21;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels (the clickable field selectors).
pub const AXIS_TITLES: i32 = 50;
