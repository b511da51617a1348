//! Evaluation engine, recommendations and the interactive session.

pub mod model;
pub mod recommendations;
pub mod runtime;
pub mod sweep;

pub use model::{Evaluator, NormalizedConfig, normalize, simulate};
pub use recommendations::RecommendationEngine;
pub use runtime::Runtime;
pub use sweep::{SweepPoint, first_overload, linspace, sweep};
