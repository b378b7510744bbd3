// Copyright 2025 the ScatterViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis scale construction.

use kurbo::Rect;
use scatterviz_charts::{ScaleLinear, padded_domain_f64};
use thiserror::Error;

use crate::data::Record;
use crate::field::{Axis, Column};

/// Factor applied to the smallest value to get the domain start.
pub const DOMAIN_LOWER: f64 = 0.8;
/// Factor applied to the largest value to get the domain end.
pub const DOMAIN_UPPER: f64 = 1.2;

/// Errors raised while building a scale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// There are no records to take a range from.
    #[error("cannot build a scale over an empty dataset")]
    EmptyDataset,
    /// Every value of the column is `NaN` or infinite.
    #[error("column `{0}` has no finite values")]
    NoFiniteValues(Column),
}

/// Builds the linear scale for `column` on `axis`.
///
/// The domain is `(0.8 * min, 1.2 * max)` over the finite values of `column`. The range is
/// `(0, plot.width)` for x and `(plot.height, 0)` for y, so larger values sit higher.
pub fn build_scale(
    records: &[Record],
    column: Column,
    axis: Axis,
    plot: Rect,
) -> Result<ScaleLinear, ScaleError> {
    if records.is_empty() {
        return Err(ScaleError::EmptyDataset);
    }
    let domain = padded_domain_f64(
        records.iter().map(|r| r.value(column)),
        DOMAIN_LOWER,
        DOMAIN_UPPER,
    )
    .ok_or(ScaleError::NoFiniteValues(column))?;
    let range = match axis {
        Axis::X => (0.0, plot.width()),
        Axis::Y => (plot.height(), 0.0),
    };
    Ok(ScaleLinear::new(domain, range))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLOT: Rect = Rect::new(0.0, 0.0, 820.0, 380.0);

    fn record(ypa: f64, points: f64) -> Record {
        Record {
            abbr: "T".to_string(),
            yards_per_pass_attempt: ypa,
            total_points: points,
            ..Record::default()
        }
    }

    #[test]
    fn x_domain_is_padded_min_max() {
        let records = [record(6.0, 300.0), record(9.0, 450.0)];
        let s = build_scale(&records, Column::YardsPerPassAttempt, Axis::X, PLOT).expect("scale");
        let (d0, d1) = s.domain();
        assert!((d0 - 4.8).abs() < 1e-12);
        assert!((d1 - 10.8).abs() < 1e-12);
        assert_eq!(s.range(), (0.0, 820.0));
    }

    #[test]
    fn y_range_is_inverted() {
        let records = [record(6.0, 300.0), record(9.0, 450.0)];
        let s = build_scale(&records, Column::TotalPoints, Axis::Y, PLOT).expect("scale");
        assert_eq!(s.range(), (380.0, 0.0));
        let (d0, d1) = s.domain();
        assert!((d0 - 240.0).abs() < 1e-9);
        assert!((d1 - 540.0).abs() < 1e-9);
        assert!(s.map(450.0) < s.map(300.0));
    }

    #[test]
    fn nan_rows_do_not_poison_the_domain() {
        let records = [record(6.0, 0.0), record(f64::NAN, 0.0), record(9.0, 0.0)];
        let s = build_scale(&records, Column::YardsPerPassAttempt, Axis::X, PLOT).expect("scale");
        assert!(s.domain().0.is_finite() && s.domain().1.is_finite());
        assert!(s.map(f64::NAN).is_nan());
    }

    #[test]
    fn empty_and_all_nan_are_errors() {
        assert_eq!(
            build_scale(&[], Column::TotalPoints, Axis::Y, PLOT),
            Err(ScaleError::EmptyDataset)
        );
        let records = [record(f64::NAN, 1.0)];
        assert_eq!(
            build_scale(&records, Column::YardsPerPassAttempt, Axis::X, PLOT),
            Err(ScaleError::NoFiniteValues(Column::YardsPerPassAttempt))
        );
    }
}
