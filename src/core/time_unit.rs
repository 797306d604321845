use serde::{Deserialize, Serialize};

/// Display granularity of the elapsed-time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
        TimeUnit::Weeks,
        TimeUnit::Months,
        TimeUnit::Years,
    ];

    /// Largest count displayed in this unit before escalating; `None` for `Years`.
    #[must_use]
    pub fn limit(self) -> Option<f64> {
        match self {
            Self::Seconds | Self::Minutes => Some(300.0),
            Self::Hours => Some(120.0),
            Self::Days => Some(35.0),
            Self::Weeks => Some(20.0),
            Self::Months => Some(60.0),
            Self::Years => None,
        }
    }

    /// Seconds per unit. A month is four weeks.
    #[must_use]
    pub fn seconds(self) -> f64 {
        const MINUTE: f64 = 60.0;
        const HOUR: f64 = 60.0 * MINUTE;
        const DAY: f64 = 24.0 * HOUR;
        const WEEK: f64 = 7.0 * DAY;
        match self {
            Self::Seconds => 1.0,
            Self::Minutes => MINUTE,
            Self::Hours => HOUR,
            Self::Days => DAY,
            Self::Weeks => WEEK,
            Self::Months => 4.0 * WEEK,
            Self::Years => 365.0 * DAY,
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Seconds => Some(Self::Minutes),
            Self::Minutes => Some(Self::Hours),
            Self::Hours => Some(Self::Days),
            Self::Days => Some(Self::Weeks),
            Self::Weeks => Some(Self::Months),
            Self::Months => Some(Self::Years),
            Self::Years => None,
        }
    }

    /// Axis label, e.g. `t[s]`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Seconds => "t[s]",
            Self::Minutes => "t[m]",
            Self::Hours => "t[h]",
            Self::Days => "t[D]",
            Self::Weeks => "t[W]",
            Self::Months => "t[M]",
            Self::Years => "t[Y]",
        }
    }

    #[must_use]
    pub fn to_units(self, seconds: f64) -> f64 {
        seconds / self.seconds()
    }

    #[must_use]
    pub fn to_seconds(self, units: f64) -> f64 {
        units * self.seconds()
    }
}

/// Ratchet choosing the time unit of one board's x axis.
///
/// The unit only ever moves toward coarser granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeUnitTracker {
    current: TimeUnit,
}

impl Default for TimeUnitTracker {
    fn default() -> Self {
        Self {
            current: TimeUnit::Seconds,
        }
    }
}

impl TimeUnitTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(self) -> TimeUnit {
        self.current
    }

    /// Escalates while `max_seconds`, expressed in the current unit, exceeds its limit.
    ///
    /// Returns `true` when the unit changed.
    pub fn tune(&mut self, max_seconds: f64) -> bool {
        if !max_seconds.is_finite() {
            return false;
        }
        let before = self.current;
        while let (Some(limit), Some(next)) = (self.current.limit(), self.current.next()) {
            if self.current.to_units(max_seconds) <= limit {
                break;
            }
            self.current = next;
        }
        self.current != before
    }

    #[must_use]
    pub fn to_units(self, seconds: f64) -> f64 {
        self.current.to_units(seconds)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.current.label()
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeUnit, TimeUnitTracker};

    #[test]
    fn escalation_stops_at_years() {
        let mut tracker = TimeUnitTracker::new();
        assert!(tracker.tune(1.0e12));
        assert_eq!(tracker.current(), TimeUnit::Years);
        assert!(!tracker.tune(1.0e15));
        assert_eq!(tracker.current(), TimeUnit::Years);
    }

    #[test]
    fn single_tune_can_skip_several_units() {
        let mut tracker = TimeUnitTracker::new();
        tracker.tune(3.0 * 3600.0 * 24.0);
        assert_eq!(tracker.current(), TimeUnit::Hours);
    }

    #[test]
    fn units_are_ordered_by_granularity() {
        for pair in TimeUnit::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert!(pair[0].seconds() < pair[1].seconds());
        }
    }
}
