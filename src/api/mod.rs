mod board_view;
mod chart_kind;
mod dashboard;
mod dashboard_accessors;
mod dashboard_config;
mod export;
mod frame_builder;
mod legend;
mod registry;
mod render_coordinator;
mod scale_manager;

pub use board_view::{BoardView, INSTANT_X_LABEL};
pub use chart_kind::ChartKind;
pub use dashboard::Dashboard;
pub use dashboard_config::{AnimationTimings, ChartLayout, DashboardConfig, MetricCatalog};
pub use export::{ChartExports, PNG_DATA_URL_PREFIX, SVG_DATA_URL_PREFIX, document_id};
pub use frame_builder::{FrameState, scale_switch_text, series_path_id};
pub use legend::{HIDDEN_OPACITY, Legend, LegendEntry, VISIBLE_OPACITY};
pub use registry::ChartBoardRegistry;
pub use scale_manager::{AxisScaleState, ScaleManager};
