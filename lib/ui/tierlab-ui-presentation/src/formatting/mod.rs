//! Shared formatting helpers used by the CLI.

mod diagram;
mod flows;
mod live;
mod metrics;
mod recommendations;
pub mod units;

pub use diagram::render_diagram;
pub use flows::{FlowKey, FlowRow, flow_rows};
pub use live::{LiveValue, live_values};
pub use metrics::{render_metrics, status_bar};
pub use recommendations::render_recommendations;
