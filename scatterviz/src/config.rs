// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `scatterviz.toml` handling.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scatterviz_charts::{ChartLayout, Margin, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "scatterviz.toml";

/// Errors raised while loading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The file is not valid TOML for [`Config`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Path of the CSV file to load.
    pub data: PathBuf,
    /// Id of the element the chart mounts into.
    pub container: String,
    /// Rebuild at the new window size on resize instead of keeping the fixed canvas.
    pub responsive: bool,
    /// Canvas size and margins.
    pub viewport: ViewportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: PathBuf::from("static/data/clean_team_stats.csv"),
            container: "scatter".to_string(),
            responsive: false,
            viewport: ViewportConfig::default(),
        }
    }
}

impl Config {
    /// Reads and parses a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses config text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Canvas size and margins.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Margins around the plot.
    pub margin: MarginConfig,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 500.0,
            margin: MarginConfig::default(),
        }
    }
}

impl ViewportConfig {
    /// Layout for the configured canvas.
    pub fn layout(&self) -> ChartLayout {
        self.layout_with_size(self.width, self.height)
    }

    /// Layout for a canvas of the given size, keeping the configured margins.
    pub fn layout_with_size(&self, width: f64, height: f64) -> ChartLayout {
        let m = self.margin;
        ChartLayout::new(
            Size::new(width, height),
            Margin::new(m.top, m.right, m.bottom, m.left),
        )
    }
}

/// Margins around the plot.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarginConfig {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 40.0,
            bottom: 80.0,
            left: 100.0,
        }
    }
}
