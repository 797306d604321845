use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{AxisAccessor, AxisScale, DataPoint, Series};
use crate::error::ChartResult;

/// Projected vertex of a series path in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Immutable line generator bound to one (accessor, scale) pair per axis.
///
/// It is rebuilt whenever an axis mode, accessor floor or domain changes;
/// holding an old generator simply projects with the old state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineGenerator {
    x_accessor: AxisAccessor,
    y_accessor: AxisAccessor,
    x_scale: AxisScale,
    y_scale: AxisScale,
}

impl LineGenerator {
    #[must_use]
    pub fn new(
        x_accessor: AxisAccessor,
        y_accessor: AxisAccessor,
        x_scale: AxisScale,
        y_scale: AxisScale,
    ) -> Self {
        Self {
            x_accessor,
            y_accessor,
            x_scale,
            y_scale,
        }
    }

    #[must_use]
    pub fn x_scale(self) -> AxisScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(self) -> AxisScale {
        self.y_scale
    }

    pub fn project_point(self, point: DataPoint) -> ChartResult<PathPoint> {
        Ok(PathPoint::new(
            self.x_scale.map(self.x_accessor.value(point))?,
            self.y_scale.map(self.y_accessor.value(point))?,
        ))
    }

    /// Projects one series into path vertices.
    pub fn project(self, points: &[DataPoint]) -> ChartResult<Vec<PathPoint>> {
        points
            .iter()
            .map(|point| self.project_point(*point))
            .collect()
    }

    /// Projects every series of a bucket, preserving series order.
    pub fn project_all(self, series: &[Series]) -> ChartResult<Vec<Vec<PathPoint>>> {
        #[cfg(feature = "parallel-projection")]
        {
            series
                .par_iter()
                .map(|item| self.project(&item.values))
                .collect()
        }

        #[cfg(not(feature = "parallel-projection"))]
        {
            series.iter().map(|item| self.project(&item.values)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LineGenerator;
    use crate::core::{Axis, AxisAccessor, AxisScale, DataPoint, ScaleMode};

    #[test]
    fn floored_points_project_inside_log_plot() {
        let x_scale = AxisScale::new(ScaleMode::Linear, (0.0, 100.0))
            .and_then(|scale| scale.with_domain((0.0, 10.0)))
            .expect("x scale");
        let y_scale = AxisScale::new(ScaleMode::Log, (100.0, 0.0))
            .and_then(|scale| scale.with_domain((0.001, 1000.0)))
            .expect("y scale");
        let line = LineGenerator::new(
            AxisAccessor::new(Axis::X, ScaleMode::Linear, 1.0),
            AxisAccessor::new(Axis::Y, ScaleMode::Log, 1.0),
            x_scale,
            y_scale,
        );

        let path = line
            .project(&[DataPoint::new(0.0, 0.0), DataPoint::new(10.0, 1000.0)])
            .expect("project");
        assert!((path[0].y - 100.0).abs() <= 1e-9);
        assert!((path[1].x - 100.0).abs() <= 1e-9);
        assert!(path[1].y.abs() <= 1e-9);
    }
}
