//! tierlab: a deterministic capacity, latency and cost model for a
//! client → load balancer → app → cache → database service.

pub use tierlab_adapter_catalog as catalog;
pub use tierlab_application as application;
pub use tierlab_domain as domain;
pub use tierlab_ports as ports;
pub use tierlab_ui_presentation as presentation;

#[cfg(feature = "cli")]
pub use tierlab_ui_terminal as terminal;

pub use tierlab_application::{Evaluator, RecommendationEngine, Runtime, simulate};
pub use tierlab_domain::{SimConfig, SimResult};
