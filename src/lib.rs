//! chartboard: chart-board state and axis-scaling engine for live load-test
//! dashboards.
//!
//! The crate keeps a strict split between pure math (`core`), stateful
//! orchestration (`api`) and backend-agnostic drawing (`render`).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartKind, Dashboard, DashboardConfig};
pub use error::{ChartError, ChartResult};
