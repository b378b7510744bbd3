// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selectable fields and the axis selection state.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Which axis a field (or a click) belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// A field name that does not belong to the axis it was given for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The name is not one of the axis's three candidates.
    #[error("unknown {axis} field `{name}`")]
    Unknown {
        /// Axis the name was parsed for.
        axis: Axis,
        /// The offending name.
        name: String,
    },
}

/// Numeric columns of a [`crate::Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// `yards_per_pass_attempt`
    YardsPerPassAttempt,
    /// `total_points`
    TotalPoints,
    /// `passing_touchdowns`
    PassingTouchdowns,
    /// `rushing_touchdowns`
    RushingTouchdowns,
    /// `total_offensive_plays`
    TotalOffensivePlays,
    /// `total_touchdowns`
    TotalTouchdowns,
}

impl Column {
    /// Every numeric column, in header order.
    pub const ALL: [Self; 6] = [
        Self::YardsPerPassAttempt,
        Self::TotalPoints,
        Self::PassingTouchdowns,
        Self::RushingTouchdowns,
        Self::TotalOffensivePlays,
        Self::TotalTouchdowns,
    ];

    /// Header name in the input file.
    pub const fn name(self) -> &'static str {
        match self {
            Self::YardsPerPassAttempt => "yards_per_pass_attempt",
            Self::TotalPoints => "total_points",
            Self::PassingTouchdowns => "passing_touchdowns",
            Self::RushingTouchdowns => "rushing_touchdowns",
            Self::TotalOffensivePlays => "total_offensive_plays",
            Self::TotalTouchdowns => "total_touchdowns",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Candidate fields for the x axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum XField {
    /// Yards per pass attempt.
    #[default]
    YardsPerPassAttempt,
    /// Passing touchdowns.
    PassingTouchdowns,
    /// Rushing touchdowns.
    RushingTouchdowns,
}

impl XField {
    /// The three candidates, top to bottom as their labels are stacked.
    pub const ALL: [Self; 3] = [
        Self::YardsPerPassAttempt,
        Self::PassingTouchdowns,
        Self::RushingTouchdowns,
    ];

    /// Backing column.
    pub const fn column(self) -> Column {
        match self {
            Self::YardsPerPassAttempt => Column::YardsPerPassAttempt,
            Self::PassingTouchdowns => Column::PassingTouchdowns,
            Self::RushingTouchdowns => Column::RushingTouchdowns,
        }
    }

    /// Clickable axis label text.
    pub const fn title(self) -> &'static str {
        match self {
            Self::YardsPerPassAttempt => "Yards Per Pass Attempt",
            Self::PassingTouchdowns => "Passing Touchdowns",
            Self::RushingTouchdowns => "Rushing Touchdowns",
        }
    }

    /// Popup label for this field.
    pub const fn tooltip_label(self) -> &'static str {
        match self {
            Self::YardsPerPassAttempt => "Yards Per Pass Attempt:",
            Self::PassingTouchdowns => "Passing Touchdowns:",
            Self::RushingTouchdowns => "Rushing Touchdowns:",
        }
    }
}

impl FromStr for XField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.column().name() == s)
            .ok_or_else(|| FieldError::Unknown {
                axis: Axis::X,
                name: s.to_string(),
            })
    }
}

impl fmt::Display for XField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().name())
    }
}

/// Candidate fields for the y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum YField {
    /// Total points.
    #[default]
    TotalPoints,
    /// Total touchdowns.
    TotalTouchdowns,
    /// Total offensive plays.
    TotalOffensivePlays,
}

impl YField {
    /// The three candidates, outermost label first.
    pub const ALL: [Self; 3] = [
        Self::TotalOffensivePlays,
        Self::TotalTouchdowns,
        Self::TotalPoints,
    ];

    /// Backing column.
    pub const fn column(self) -> Column {
        match self {
            Self::TotalPoints => Column::TotalPoints,
            Self::TotalTouchdowns => Column::TotalTouchdowns,
            Self::TotalOffensivePlays => Column::TotalOffensivePlays,
        }
    }

    /// Clickable axis label text.
    pub const fn title(self) -> &'static str {
        match self {
            Self::TotalPoints => "Total Points",
            Self::TotalTouchdowns => "Total Touchdowns",
            Self::TotalOffensivePlays => "Total Offensive Plays",
        }
    }

    /// Popup label for this field. `TotalTouchdowns` keeps its trailing space.
    pub const fn tooltip_label(self) -> &'static str {
        match self {
            Self::TotalPoints => "Total Points:",
            Self::TotalTouchdowns => "Total Touchdowns: ",
            Self::TotalOffensivePlays => "Total Offensive Plays:",
        }
    }
}

impl FromStr for YField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.column().name() == s)
            .ok_or_else(|| FieldError::Unknown {
                axis: Axis::Y,
                name: s.to_string(),
            })
    }
}

impl fmt::Display for YField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().name())
    }
}

/// The active field on each axis.
///
/// Exactly one candidate per axis is active at any time; the type makes any other state
/// unrepresentable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Active x field.
    pub x: XField,
    /// Active y field.
    pub y: YField,
}
