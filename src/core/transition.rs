use std::time::Duration;

use crate::core::PathPoint;

/// Values that can be blended for time-based transitions.
pub trait Interpolate: Clone {
    /// Returns the value at `t` in `[0, 1]` between `self` and `to`.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for PathPoint {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        PathPoint::new(self.x.interpolate(&to.x, t), self.y.interpolate(&to.y, t))
    }
}

/// Paths of different lengths grow out of (or collapse into) the shorter
/// path's last vertex.
impl Interpolate for Vec<PathPoint> {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        let len = self.len().max(to.len());
        (0..len)
            .filter_map(|index| {
                let from = self.get(index).or_else(|| self.last());
                let target = to.get(index).or_else(|| to.last());
                match (from, target) {
                    (Some(from), Some(target)) => Some(from.interpolate(target, t)),
                    (None, Some(target)) => Some(*target),
                    (Some(from), None) => Some(*from),
                    (None, None) => None,
                }
            })
            .take(if t >= 1.0 { to.len() } else { len })
            .collect()
    }
}

/// Linear time-based transition toward a target value.
///
/// Retargeting mid-flight starts the new transition from the value displayed
/// at that moment; there is no queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    from: T,
    to: T,
    elapsed: Duration,
    duration: Duration,
}

impl<T: Interpolate> Transition<T> {
    /// Creates a finished transition resting at `value`.
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// Starts moving toward `target` from the currently displayed value.
    pub fn retarget(&mut self, target: T, duration: Duration) {
        self.from = self.current();
        self.to = target;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed = self.elapsed.saturating_add(elapsed).min(self.duration);
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn current(&self) -> T {
        let progress = self.progress();
        if progress >= 1.0 {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, progress)
    }

    #[must_use]
    pub fn target(&self) -> &T {
        &self.to
    }
}
