use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    Axis, AxisAccessor, AxisScale, LineGenerator, ScaleMode, TickGenerator, TimeUnit,
};
use crate::error::ChartResult;

use super::ChartKind;

/// Linear/log mode of both axes of one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisScaleState {
    pub x: ScaleMode,
    pub y: ScaleMode,
}

impl AxisScaleState {
    #[must_use]
    pub fn mode(self, axis: Axis) -> ScaleMode {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// One axis: a linear and a log scale kept side by side, so switching back
/// restores the scale the axis had before.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSlot {
    mode: ScaleMode,
    linear: AxisScale,
    log: AxisScale,
    accessor: AxisAccessor,
    ticks: TickGenerator,
}

impl AxisSlot {
    fn new(
        axis: Axis,
        range: (f64, f64),
        seconds_per_unit: f64,
        tick_count: usize,
    ) -> ChartResult<Self> {
        let mode = ScaleMode::Linear;
        Ok(Self {
            mode,
            linear: AxisScale::new(ScaleMode::Linear, range)?,
            log: AxisScale::new(ScaleMode::Log, range)?,
            accessor: AxisAccessor::new(axis, mode, seconds_per_unit),
            ticks: TickGenerator::for_mode(mode, tick_count),
        })
    }

    fn scale(&self) -> AxisScale {
        match self.mode {
            ScaleMode::Linear => self.linear,
            ScaleMode::Log => self.log,
        }
    }

    fn scale_mut(&mut self) -> &mut AxisScale {
        match self.mode {
            ScaleMode::Linear => &mut self.linear,
            ScaleMode::Log => &mut self.log,
        }
    }
}

/// Scale state of one board: both axes, their floor accessors, tick
/// generators and the line generator closing over them.
///
/// Every mutation that touches an axis rebuilds the derived accessor, tick
/// generator and line generator before returning.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleManager {
    kind: ChartKind,
    plot_size: (f64, f64),
    tick_count: usize,
    x: AxisSlot,
    y: AxisSlot,
    line: LineGenerator,
    min_threads: f64,
}

impl ScaleManager {
    /// Creates a manager with both axes linear and default floors.
    pub fn new(
        kind: ChartKind,
        plot_width: f64,
        plot_height: f64,
        tick_count: usize,
    ) -> ChartResult<Self> {
        let unit_seconds = TimeUnit::Seconds.seconds();
        let x = AxisSlot::new(Axis::X, (0.0, plot_width), unit_seconds, tick_count)?;
        let y = AxisSlot::new(Axis::Y, (plot_height, 0.0), 1.0, tick_count)?;
        Ok(Self {
            kind,
            plot_size: (plot_width, plot_height),
            tick_count,
            line: LineGenerator::new(x.accessor, y.accessor, x.scale(), y.scale()),
            x,
            y,
            min_threads: 0.0,
        })
    }

    /// Resets both axes to fresh linear scales with default floors.
    pub fn reset(&mut self, unit: TimeUnit) -> ChartResult<()> {
        let (width, height) = self.plot_size;
        let seconds_per_unit = self.x_seconds_per_unit(unit);
        self.x = AxisSlot::new(Axis::X, (0.0, width), seconds_per_unit, self.tick_count)?;
        self.y = AxisSlot::new(Axis::Y, (height, 0.0), 1.0, self.tick_count)?;
        self.min_threads = 0.0;
        self.rebuild_line();
        Ok(())
    }

    /// Puts `axis` into `mode`.
    ///
    /// Rebuilds the floor accessor, tick generator and line generator even
    /// when the mode is unchanged. On the x axis, log mode raises the minimum
    /// thread count from 0 to 1.
    pub fn switch_scale(&mut self, axis: Axis, mode: ScaleMode, unit: TimeUnit) {
        let seconds_per_unit = match axis {
            Axis::X => self.x_seconds_per_unit(unit),
            Axis::Y => 1.0,
        };
        let tick_count = self.tick_count;
        let slot = self.slot_mut(axis);
        slot.mode = mode;
        slot.accessor = AxisAccessor::new(axis, mode, seconds_per_unit);
        slot.ticks = TickGenerator::for_mode(mode, tick_count);
        if axis == Axis::X {
            self.min_threads = match mode {
                ScaleMode::Linear => 0.0,
                ScaleMode::Log => 1.0,
            };
        }
        self.rebuild_line();
        trace!(axis = axis.name(), mode = mode.name(), "switched axis scale");
    }

    /// Rebuilds the x accessor for a new display unit.
    pub fn set_time_unit(&mut self, unit: TimeUnit) {
        let seconds_per_unit = self.x_seconds_per_unit(unit);
        self.x.accessor = AxisAccessor::new(Axis::X, self.x.mode, seconds_per_unit);
        self.rebuild_line();
    }

    /// Replaces the domain of the active scale of `axis`.
    pub fn set_domain(&mut self, axis: Axis, domain: (f64, f64)) -> ChartResult<()> {
        let slot = self.slot_mut(axis);
        let scale = slot.scale().with_domain(domain)?;
        *slot.scale_mut() = scale;
        self.rebuild_line();
        Ok(())
    }

    /// Extends the active domain of `axis` outward to round values.
    pub fn nice_domain(&mut self, axis: Axis) -> ChartResult<()> {
        let tick_count = self.tick_count;
        let slot = self.slot_mut(axis);
        let scale = slot.scale().nice(tick_count)?;
        *slot.scale_mut() = scale;
        self.rebuild_line();
        Ok(())
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> AxisScaleState {
        AxisScaleState {
            x: self.x.mode,
            y: self.y.mode,
        }
    }

    #[must_use]
    pub fn mode(&self, axis: Axis) -> ScaleMode {
        self.slot(axis).mode
    }

    #[must_use]
    pub fn scale(&self, axis: Axis) -> AxisScale {
        self.slot(axis).scale()
    }

    #[must_use]
    pub fn domain(&self, axis: Axis) -> (f64, f64) {
        self.slot(axis).scale().domain()
    }

    #[must_use]
    pub fn accessor(&self, axis: Axis) -> AxisAccessor {
        self.slot(axis).accessor
    }

    #[must_use]
    pub fn tick_generator(&self, axis: Axis) -> TickGenerator {
        self.slot(axis).ticks
    }

    #[must_use]
    pub fn line_generator(&self) -> LineGenerator {
        self.line
    }

    /// Lowest x value a time-series board's domain may start above.
    #[must_use]
    pub fn min_threads(&self) -> f64 {
        self.min_threads
    }

    fn x_seconds_per_unit(&self, unit: TimeUnit) -> f64 {
        if self.kind.uses_time_axis() {
            unit.seconds()
        } else {
            1.0
        }
    }

    fn slot(&self, axis: Axis) -> &AxisSlot {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn slot_mut(&mut self, axis: Axis) -> &mut AxisSlot {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    fn rebuild_line(&mut self) {
        self.line = LineGenerator::new(
            self.x.accessor,
            self.y.accessor,
            self.x.scale(),
            self.y.scale(),
        );
    }
}
