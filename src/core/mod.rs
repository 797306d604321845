pub mod extent;
pub mod line_path;
pub mod palette;
pub mod scale;
pub mod series;
pub mod ticks;
pub mod time_unit;
pub mod transition;
pub mod types;

pub use extent::{
    AxisAccessor, Extent, LOG_X_FLOOR_UNITS, LOG_Y_FLOOR, deep_extent, degenerate_floor,
    is_renderable_domain, shallow_extent,
};
pub use line_path::{LineGenerator, PathPoint};
pub use palette::{CATEGORY10, ColorAssigner};
pub use scale::{AxisScale, ScaleMode};
pub use series::{
    MetricBucket, NumericField, RawPoint, RawSeries, Series, Snapshot, sanitize_bucket,
    sanitize_series, strip_sentinel,
};
pub use ticks::{Tick, TickFormat, TickGenerator, TickList, linear_ticks, log_ticks, tick_step};
pub use time_unit::{TimeUnit, TimeUnitTracker};
pub use transition::{Interpolate, Transition};
pub use types::{Axis, DataPoint, Viewport};
