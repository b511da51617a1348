//! Display formatting shared by the terminal front end.

pub mod formatting;

pub use formatting::{
    FlowKey, FlowRow, LiveValue, flow_rows, live_values, render_diagram, render_metrics,
    render_recommendations, status_bar,
};
