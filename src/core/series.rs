use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Metric name -> series list, as delivered for one chart board.
pub type MetricBucket = IndexMap<String, Vec<RawSeries>>;

/// Board name -> metric bucket, as delivered on one poll tick.
pub type Snapshot = IndexMap<String, MetricBucket>;

/// Wire representation of one point coordinate.
///
/// Pollers deliver numbers, but numeric strings are accepted and coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    /// Returns the finite numeric value, or `None` when the field cannot be coerced.
    #[must_use]
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub x: NumericField,
    pub y: NumericField,
}

impl RawPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: NumericField::Number(x),
            y: NumericField::Number(y),
        }
    }
}

/// Unvalidated series as received from the polling collaborator.
///
/// `values` may end with a `null` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    pub name: String,
    #[serde(default)]
    pub values: Vec<Option<RawPoint>>,
}

impl RawSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Option<RawPoint>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Builds a raw series from plain `(x, y)` pairs without a sentinel.
    #[must_use]
    pub fn from_pairs(name: impl Into<String>, pairs: &[(f64, f64)]) -> Self {
        Self::new(
            name,
            pairs
                .iter()
                .map(|&(x, y)| Some(RawPoint::new(x, y)))
                .collect(),
        )
    }

    /// Appends the trailing `null` sentinel pollers use to terminate a series.
    #[must_use]
    pub fn with_sentinel(mut self) -> Self {
        self.values.push(None);
        self
    }
}

/// Sanitized series: sentinel stripped, coordinates numeric, x non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<DataPoint>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Removes exactly one trailing `None` sentinel, leaving every other entry untouched.
#[must_use]
pub fn strip_sentinel<T>(values: &[Option<T>]) -> &[Option<T>] {
    match values.split_last() {
        Some((None, rest)) => rest,
        _ => values,
    }
}

/// Validates and coerces one raw series.
///
/// A `null` anywhere but the last slot is rejected rather than coerced.
pub fn sanitize_series(raw: &RawSeries) -> ChartResult<Series> {
    let entries = strip_sentinel(&raw.values);
    let mut values = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let Some(point) = entry else {
            return Err(invalid_series(
                &raw.name,
                format!("null point at index {index} before the end of the series"),
            ));
        };
        let (Some(x), Some(y)) = (point.x.coerce(), point.y.coerce()) else {
            return Err(invalid_series(
                &raw.name,
                format!("point at index {index} is not numeric"),
            ));
        };
        if let Some(previous) = values.last().map(|p: &DataPoint| p.x) {
            if x < previous {
                return Err(invalid_series(
                    &raw.name,
                    format!("x decreases at index {index} ({x} < {previous})"),
                ));
            }
        }
        values.push(DataPoint::new(x, y));
    }

    Ok(Series::new(raw.name.clone(), values))
}

/// Sanitizes every series of one metric bucket, enforcing unique names.
pub fn sanitize_bucket(raw: &[RawSeries]) -> ChartResult<Vec<Series>> {
    let mut seen = IndexSet::with_capacity(raw.len());
    let mut sanitized = Vec::with_capacity(raw.len());
    for series in raw {
        if !seen.insert(series.name.as_str()) {
            return Err(invalid_series(
                &series.name,
                "duplicate series name within metric bucket".to_owned(),
            ));
        }
        sanitized.push(sanitize_series(series)?);
    }
    Ok(sanitized)
}

fn invalid_series(name: &str, reason: String) -> ChartError {
    ChartError::InvalidSeries {
        series: name.to_owned(),
        reason,
    }
}
