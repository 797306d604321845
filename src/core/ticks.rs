use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ScaleMode;

/// Inline capacity covering the usual five-tick axes without allocating.
pub type TickList = SmallVec<[Tick; 8]>;

/// Label formatting applied to generated ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickFormat {
    /// Precision derived from the tick step (`0.5` -> one decimal).
    StepPrecision,
    /// Whole numbers with thousands separators; fractional ticks stay unlabeled.
    GroupedInteger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    /// Empty when the format intentionally leaves this tick unlabeled.
    pub label: String,
}

/// Tick generator for one axis.
///
/// Generators are plain values: switching an axis mode builds a new one
/// instead of mutating a shared instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickGenerator {
    mode: ScaleMode,
    count: usize,
    format: TickFormat,
}

impl TickGenerator {
    #[must_use]
    pub fn for_mode(mode: ScaleMode, count: usize) -> Self {
        let format = match mode {
            ScaleMode::Linear => TickFormat::StepPrecision,
            ScaleMode::Log => TickFormat::GroupedInteger,
        };
        Self {
            mode,
            count: count.max(1),
            format,
        }
    }

    #[must_use]
    pub fn mode(self) -> ScaleMode {
        self.mode
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn format(self) -> TickFormat {
        self.format
    }

    /// Generates labeled ticks inside `domain`.
    #[must_use]
    pub fn ticks(self, domain: (f64, f64)) -> TickList {
        let values = match self.mode {
            ScaleMode::Linear => linear_ticks(domain, self.count),
            ScaleMode::Log => log_ticks(domain, self.count),
        };
        let step = match self.mode {
            ScaleMode::Linear => tick_step(domain.0, domain.1, self.count),
            ScaleMode::Log => 1.0,
        };
        values
            .into_iter()
            .map(|value| Tick {
                value,
                label: format_tick(value, step, self.format),
            })
            .collect()
    }
}

/// Step between "nice" ticks (1, 2 or 5 times a power of ten) for roughly `count` ticks.
///
/// Returns NaN for empty or non-finite spans.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if !span.is_finite() || span == 0.0 {
        return f64::NAN;
    }
    let raw_step = span / count.max(1) as f64;
    let mut step = 10_f64.powf(raw_step.log10().floor());
    let error = raw_step / step;
    if error >= 50_f64.sqrt() {
        step *= 10.0;
    } else if error >= 10_f64.sqrt() {
        step *= 5.0;
    } else if error >= 2_f64.sqrt() {
        step *= 2.0;
    }
    step
}

/// Nice-step ticks inside `domain`, ascending.
#[must_use]
pub fn linear_ticks(domain: (f64, f64), count: usize) -> Vec<f64> {
    let (low, high) = ordered(domain);
    let step = tick_step(low, high, count);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }

    let first = (low / step).ceil() as i64;
    let last = (high / step).floor() as i64;
    let inverse = (1.0 / step).round();
    (first..=last)
        .map(|index| {
            // Divide by the inverse step for fractional steps so 0.1 * 3 prints as 0.3.
            if step < 1.0 && inverse > 0.0 {
                index as f64 / inverse
            } else {
                index as f64 * step
            }
        })
        .collect()
}

/// Decade-ladder ticks (1, 2, 5 times powers of ten) sampled down to `count`.
///
/// Falls back to the domain endpoints when no ladder value lies inside.
#[must_use]
pub fn log_ticks(domain: (f64, f64), count: usize) -> Vec<f64> {
    let (min, max) = ordered(domain);
    if !min.is_finite() || !max.is_finite() || min <= 0.0 {
        return Vec::new();
    }

    let min_exp = min.log10().floor() as i32;
    let max_exp = max.log10().ceil() as i32;
    let mut ticks = Vec::new();
    for exp in min_exp..=max_exp {
        let decade = 10_f64.powi(exp);
        for multiplier in [1.0, 2.0, 5.0] {
            let candidate = decade * multiplier;
            if candidate >= min * (1.0 - 1e-12) && candidate <= max * (1.0 + 1e-12) {
                ticks.push(candidate);
            }
        }
    }
    if ticks.is_empty() {
        ticks.push(min);
        if !approx_equal(min, max) {
            ticks.push(max);
        }
    }
    ticks.dedup_by(|lhs, rhs| approx_equal(*lhs, *rhs));
    evenly_sample(ticks, count.max(1))
}

fn evenly_sample(ticks: Vec<f64>, target: usize) -> Vec<f64> {
    if ticks.len() <= target {
        return ticks;
    }
    if target == 1 {
        return vec![ticks[0]];
    }

    let last_index = ticks.len() - 1;
    let mut sampled: Vec<f64> = Vec::with_capacity(target);
    for step in 0..target {
        let ratio = (step as f64) / ((target - 1) as f64);
        let index = (ratio * (last_index as f64)).round() as usize;
        let value = ticks[index.min(last_index)];
        if sampled
            .last()
            .is_some_and(|previous| approx_equal(*previous, value))
        {
            continue;
        }
        sampled.push(value);
    }
    sampled
}

fn format_tick(value: f64, step: f64, format: TickFormat) -> String {
    match format {
        TickFormat::StepPrecision => {
            let decimals = if step.is_finite() && step > 0.0 {
                (-step.log10().floor()).max(0.0) as usize
            } else {
                0
            };
            // Avoid printing "-0".
            let value = if value == 0.0 { 0.0 } else { value };
            format!("{value:.decimals$}")
        }
        TickFormat::GroupedInteger => {
            let rounded = value.round();
            if !approx_equal(value, rounded) {
                return String::new();
            }
            group_thousands(rounded as i64)
        }
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn ordered(domain: (f64, f64)) -> (f64, f64) {
    (domain.0.min(domain.1), domain.0.max(domain.1))
}

fn approx_equal(lhs: f64, rhs: f64) -> bool {
    let scale = lhs.abs().max(rhs.abs()).max(1.0);
    (lhs - rhs).abs() <= scale * 1e-12
}

#[cfg(test)]
mod tests {
    use super::{TickGenerator, group_thousands, linear_ticks, log_ticks, tick_step};
    use crate::core::ScaleMode;

    #[test]
    fn tick_step_picks_one_two_five_multiples() {
        assert_eq!(tick_step(0.0, 20.0, 5), 5.0);
        assert_eq!(tick_step(0.0, 1.0, 5), 0.2);
        assert_eq!(tick_step(0.0, 1000.0, 5), 200.0);
    }

    #[test]
    fn linear_ticks_cover_domain_on_step_multiples() {
        assert_eq!(linear_ticks((0.0, 20.0), 5), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
        assert_eq!(linear_ticks((0.0, 2.0), 4), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn log_ticks_never_exceed_requested_count() {
        let ticks = log_ticks((0.001, 1000.0), 5);
        assert!(ticks.len() <= 5);
        let first = ticks.first().copied().expect("ticks");
        let last = ticks.last().copied().expect("ticks");
        assert!((first - 0.001).abs() <= 1e-12);
        assert!((last - 1000.0).abs() <= 1e-9);
    }

    #[test]
    fn log_labels_group_integers_and_skip_fractions() {
        let ticks = TickGenerator::for_mode(ScaleMode::Log, 5).ticks((0.1, 10_000.0));
        let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels.first().copied(), Some(""));
        assert_eq!(labels.last().copied(), Some("10,000"));
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn linear_labels_follow_step_precision() {
        let ticks = TickGenerator::for_mode(ScaleMode::Linear, 5).ticks((0.0, 1.0));
        let labels: Vec<&str> = ticks.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels, vec!["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    }
}
