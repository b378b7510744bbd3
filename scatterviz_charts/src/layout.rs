// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas and margin layout.
//!
//! Marks are generated in plot coordinates (origin at the plot's top-left corner). The canvas
//! places the plot at `(margin.left, margin.top)`.

use kurbo::{Rect, Vec2};

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Space reserved around the plot for axes and axis labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot (x axis and its labels).
    pub bottom: f64,
    /// Space left of the plot (y axis and its labels).
    pub left: f64,
}

impl Margin {
    /// Creates margins.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// A canvas split into margins and a plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Full canvas size.
    pub canvas: Size,
    /// Margins around the plot.
    pub margin: Margin,
}

impl ChartLayout {
    /// Creates a layout.
    pub const fn new(canvas: Size, margin: Margin) -> Self {
        Self { canvas, margin }
    }

    /// Plot size after margins. Never negative.
    pub fn plot_size(&self) -> Size {
        Size::new(
            (self.canvas.width - self.margin.left - self.margin.right).max(0.0),
            (self.canvas.height - self.margin.top - self.margin.bottom).max(0.0),
        )
    }

    /// Plot rectangle in plot coordinates (`x0 = y0 = 0`).
    pub fn plot_rect(&self) -> Rect {
        let s = self.plot_size();
        Rect::new(0.0, 0.0, s.width, s.height)
    }

    /// Offset from plot coordinates to canvas coordinates.
    pub fn plot_offset(&self) -> Vec2 {
        Vec2::new(self.margin.left, self.margin.top)
    }
}
