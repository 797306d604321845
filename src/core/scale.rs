use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ticks::tick_step;
use crate::error::{ChartError, ChartResult};

/// Mapping mode of one chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Uniform spacing in raw units.
    #[default]
    Linear,
    /// Uniform spacing in log units (domain must be > 0).
    Log,
}

impl ScaleMode {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
        }
    }

    /// Returns the other mode; used by the per-axis scale switch.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Linear => Self::Log,
            Self::Log => Self::Linear,
        }
    }

    /// Domain a freshly created scale of this mode starts with.
    #[must_use]
    pub fn default_domain(self) -> (f64, f64) {
        match self {
            Self::Linear => (0.0, 1.0),
            Self::Log => (1.0, 10.0),
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Continuous domain -> pixel-range mapping for one axis.
///
/// The range may be inverted (`(height, 0)`) for y axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    mode: ScaleMode,
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl AxisScale {
    /// Creates a scale with the mode's default domain.
    pub fn new(mode: ScaleMode, range: (f64, f64)) -> ChartResult<Self> {
        validate_range(range)?;
        let (domain_start, domain_end) = mode.default_domain();
        Ok(Self {
            mode,
            domain_start,
            domain_end,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn mode(self) -> ScaleMode {
        self.mode
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Returns a copy using `domain`, rejecting domains this mode cannot map.
    pub fn with_domain(mut self, domain: (f64, f64)) -> ChartResult<Self> {
        validate_domain(domain, self.mode)?;
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        Ok(self)
    }

    /// Maps a domain value to pixels.
    pub fn map(self, value: f64) -> ChartResult<f64> {
        let transformed = self.transform(value)?;
        let (start, end) = self.transformed_domain()?;
        let normalized = (transformed - start) / (end - start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    /// Maps a pixel back to the domain.
    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let (start, end) = self.transformed_domain()?;
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        let transformed = start + normalized * (end - start);
        match self.mode {
            ScaleMode::Linear => Ok(transformed),
            ScaleMode::Log => Ok(transformed.exp()),
        }
    }

    /// Extends the domain outward to round values.
    ///
    /// Linear scales snap to multiples of the tick step for `count` ticks;
    /// log scales snap to powers of ten. A bound that would round past the
    /// `f64` range stays where it is.
    pub fn nice(self, count: usize) -> ChartResult<Self> {
        let (mut start, mut end) = self.domain();
        let reversed = end < start;
        if reversed {
            std::mem::swap(&mut start, &mut end);
        }

        match self.mode {
            ScaleMode::Linear => {
                let mut previous_step = None;
                for _ in 0..10 {
                    let step = tick_step(start, end, count);
                    if !step.is_finite() || step <= 0.0 || previous_step == Some(step) {
                        break;
                    }
                    let snapped_start = (start / step).floor() * step;
                    let snapped_end = (end / step).ceil() * step;
                    if !snapped_start.is_finite() || !snapped_end.is_finite() {
                        break;
                    }
                    start = snapped_start;
                    end = snapped_end;
                    previous_step = Some(step);
                }
            }
            ScaleMode::Log => {
                let snapped_start = 10_f64.powf(start.log10().floor());
                let snapped_end = 10_f64.powf(end.log10().ceil());
                if snapped_start > 0.0 {
                    start = snapped_start;
                }
                if snapped_end.is_finite() {
                    end = snapped_end;
                }
            }
        }

        if reversed {
            std::mem::swap(&mut start, &mut end);
        }
        self.with_domain((start, end))
    }

    fn transform(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        match self.mode {
            ScaleMode::Linear => Ok(value),
            ScaleMode::Log => {
                if value <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "log scale requires values > 0".to_owned(),
                    ));
                }
                Ok(value.ln())
            }
        }
    }

    fn transformed_domain(self) -> ChartResult<(f64, f64)> {
        Ok((
            self.transform(self.domain_start)?,
            self.transform(self.domain_end)?,
        ))
    }
}

fn validate_domain(domain: (f64, f64), mode: ScaleMode) -> ChartResult<()> {
    if !domain.0.is_finite() || !domain.1.is_finite() || domain.0 == domain.1 {
        return Err(ChartError::InvalidData(
            "scale domain must be finite and non-zero".to_owned(),
        ));
    }
    if mode == ScaleMode::Log && (domain.0 <= 0.0 || domain.1 <= 0.0) {
        return Err(ChartError::InvalidData(
            "log scale domain must be > 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_range(range: (f64, f64)) -> ChartResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
        return Err(ChartError::InvalidData(
            "scale range must be finite and non-zero".to_owned(),
        ));
    }
    Ok(())
}
