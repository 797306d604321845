use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Axis, DataPoint, ScaleMode, Series};

/// Floor substituted for non-positive y values on a log axis.
pub const LOG_Y_FLOOR: f64 = 0.001;

/// Fraction of one time unit substituted for non-positive x values on a log axis.
pub const LOG_X_FLOOR_UNITS: f64 = 0.1;

/// `[min, max]` of one accessor dimension, `None` when no value contributed.
pub type Extent = Option<(f64, f64)>;

/// Value accessor with the degenerate-value policy baked in.
///
/// `x` values are converted from seconds to the active display unit before
/// the floor is applied. Values `<= 0` are replaced by `floor`, which is `0`
/// on linear axes and a small positive number on log axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAccessor {
    axis: Axis,
    floor: f64,
    seconds_per_unit: f64,
}

impl AxisAccessor {
    /// Builds the accessor for `axis` in `mode`.
    ///
    /// `seconds_per_unit` only affects the x axis; pass `1.0` for axes that do
    /// not carry elapsed-time semantics.
    #[must_use]
    pub fn new(axis: Axis, mode: ScaleMode, seconds_per_unit: f64) -> Self {
        let seconds_per_unit = if seconds_per_unit.is_finite() && seconds_per_unit > 0.0 {
            seconds_per_unit
        } else {
            1.0
        };
        Self {
            axis,
            floor: degenerate_floor(axis, mode, seconds_per_unit),
            seconds_per_unit,
        }
    }

    #[must_use]
    pub fn axis(self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn floor(self) -> f64 {
        self.floor
    }

    #[must_use]
    pub fn seconds_per_unit(self) -> f64 {
        self.seconds_per_unit
    }

    /// Returns the display value of `point` on this axis.
    #[must_use]
    pub fn value(self, point: DataPoint) -> f64 {
        let raw = match self.axis {
            Axis::X => point.x / self.seconds_per_unit,
            Axis::Y => point.y,
        };
        if raw <= 0.0 { self.floor } else { raw }
    }
}

/// Floor used for non-positive values of `axis` when it is in `mode`.
#[must_use]
pub fn degenerate_floor(axis: Axis, mode: ScaleMode, seconds_per_unit: f64) -> f64 {
    match (mode, axis) {
        (ScaleMode::Linear, _) => 0.0,
        (ScaleMode::Log, Axis::X) => LOG_X_FLOOR_UNITS / seconds_per_unit,
        (ScaleMode::Log, Axis::Y) => LOG_Y_FLOOR,
    }
}

/// Extent of one series under `accessor`.
///
/// Non-finite accessor results are ignored.
pub fn shallow_extent<F>(series: &Series, accessor: F) -> Extent
where
    F: Fn(DataPoint) -> f64,
{
    let values = || {
        series
            .values
            .iter()
            .map(|point| accessor(*point))
            .filter(|value| value.is_finite())
            .map(OrderedFloat)
    };
    let min = values().min()?;
    let max = values().max()?;
    Some((min.0, max.0))
}

/// Extent across every series of a bucket: min of mins, max of maxes.
///
/// Empty series contribute no bound; when nothing contributes the result is
/// `None` and callers keep their previous domain.
pub fn deep_extent<F>(series: &[Series], accessor: F) -> Extent
where
    F: Fn(DataPoint) -> f64,
{
    series
        .iter()
        .filter_map(|item| shallow_extent(item, &accessor))
        .reduce(|(min, max), (item_min, item_max)| (min.min(item_min), max.max(item_max)))
}

/// Returns whether `domain` can back a scale in `mode` without producing NaN geometry.
#[must_use]
pub fn is_renderable_domain(domain: (f64, f64), mode: ScaleMode) -> bool {
    let (start, end) = domain;
    if !start.is_finite() || !end.is_finite() || start == end {
        return false;
    }
    match mode {
        ScaleMode::Linear => true,
        ScaleMode::Log => start > 0.0 && end > 0.0,
    }
}
