// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Team statistics loading.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::field::Column;

/// Header of the label column.
pub const ABBR_COLUMN: &str = "abbr";

/// Errors raised while loading a dataset.
#[derive(Error, Debug)]
pub enum DataError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not well-formed CSV.
    #[error("CSV parsing error: {0}")]
    Csv(String),

    /// A required header is absent.
    #[error("missing required column `{0}`")]
    MissingColumn(String),

    /// The file has a header but no rows.
    #[error("dataset has no rows")]
    Empty,
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => Self::Io(io::Error::new(io_err.kind(), error.to_string())),
            _ => Self::Csv(error.to_string()),
        }
    }
}

/// One team row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    /// Team abbreviation, drawn as the glyph label.
    pub abbr: String,
    /// `yards_per_pass_attempt`
    pub yards_per_pass_attempt: f64,
    /// `total_points`
    pub total_points: f64,
    /// `passing_touchdowns`
    pub passing_touchdowns: f64,
    /// `rushing_touchdowns`
    pub rushing_touchdowns: f64,
    /// `total_offensive_plays`
    pub total_offensive_plays: f64,
    /// `total_touchdowns`
    pub total_touchdowns: f64,
}

impl Record {
    /// Returns the value of `column`.
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::YardsPerPassAttempt => self.yards_per_pass_attempt,
            Column::TotalPoints => self.total_points,
            Column::PassingTouchdowns => self.passing_touchdowns,
            Column::RushingTouchdowns => self.rushing_touchdowns,
            Column::TotalOffensivePlays => self.total_offensive_plays,
            Column::TotalTouchdowns => self.total_touchdowns,
        }
    }

    fn set(&mut self, column: Column, v: f64) {
        let slot = match column {
            Column::YardsPerPassAttempt => &mut self.yards_per_pass_attempt,
            Column::TotalPoints => &mut self.total_points,
            Column::PassingTouchdowns => &mut self.passing_touchdowns,
            Column::RushingTouchdowns => &mut self.rushing_touchdowns,
            Column::TotalOffensivePlays => &mut self.total_offensive_plays,
            Column::TotalTouchdowns => &mut self.total_touchdowns,
        };
        *slot = v;
    }
}

/// All records, in file order. A record's index is its identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Loads a dataset from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(path = %path.display(), rows = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    /// Loads a dataset from CSV text.
    ///
    /// Extra columns are ignored. Numeric cells are cast the way a browser casts strings to
    /// numbers: whitespace is trimmed, an empty cell is `0`, anything else unparsable is `NaN`.
    pub fn from_reader(reader: impl Read) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let index_of = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };
        let abbr_idx = index_of(ABBR_COLUMN)?;
        let mut numeric = Vec::with_capacity(Column::ALL.len());
        for column in Column::ALL {
            numeric.push((column, index_of(column.name())?));
        }

        let mut records = Vec::new();
        let mut non_finite = 0_usize;
        for row in rdr.records() {
            let row = row?;
            let mut record = Record {
                abbr: row.get(abbr_idx).unwrap_or_default().to_string(),
                ..Record::default()
            };
            for &(column, idx) in &numeric {
                let v = cast_number(row.get(idx).unwrap_or_default());
                if !v.is_finite() {
                    non_finite += 1;
                }
                record.set(column, v);
            }
            records.push(record);
        }

        if non_finite > 0 {
            warn!(count = non_finite, "dataset contains non-finite numeric values");
        }
        Self::from_records(records)
    }

    /// Wraps already-parsed records.
    pub fn from_records(records: Vec<Record>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self { records })
    }

    /// All records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records. Never zero.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; empty datasets are rejected at load.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the values of one column.
    pub fn values(&self, column: Column) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.value(column))
    }
}

/// String-to-number cast with browser semantics.
pub(crate) fn cast_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64);
        }
    }
    // `f64::from_str` also accepts spellings such as "inf" and "nan" that a browser rejects.
    if s.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}
