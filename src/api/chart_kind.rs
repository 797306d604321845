use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static INSTANT_BOARD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+-.+").expect("instant board pattern must compile"));

/// Classification of a chart board, derived from its name.
///
/// Instant boards (`"256-512"`) show the current value across load levels;
/// every other board shows values over elapsed run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Instant,
    TimeSeries,
}

impl ChartKind {
    #[must_use]
    pub fn classify(board_name: &str) -> Self {
        if INSTANT_BOARD_NAME.is_match(board_name) {
            Self::Instant
        } else {
            Self::TimeSeries
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::TimeSeries => "time_series",
        }
    }

    /// Whether the x-axis minimum is clamped to the minimum thread count.
    #[must_use]
    pub fn applies_min_threads_floor(self) -> bool {
        self == Self::TimeSeries
    }

    /// Whether x values are elapsed seconds displayed in a tuned time unit.
    #[must_use]
    pub fn uses_time_axis(self) -> bool {
        self == Self::TimeSeries
    }

    #[must_use]
    pub fn draws_markers(self) -> bool {
        self == Self::TimeSeries
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::ChartKind;

    #[test]
    fn pattern_requires_leading_digits_dash_and_suffix() {
        assert_eq!(ChartKind::classify("256-512"), ChartKind::Instant);
        assert_eq!(ChartKind::classify("1-x"), ChartKind::Instant);
        assert_eq!(ChartKind::classify("256-"), ChartKind::TimeSeries);
        assert_eq!(ChartKind::classify("x256-512"), ChartKind::TimeSeries);
        assert_eq!(ChartKind::classify(""), ChartKind::TimeSeries);
    }
}
