//! Closed-form evaluation of a configuration snapshot.
//!
//! The pipeline is normalize → split → capacity, then latency, errors, cost
//! and the diagram all read the tier model. Nothing here keeps state between
//! calls, so an [`Evaluator`] can be shared freely across threads.

pub mod capacity;
pub mod cost;
pub mod diagram;
pub mod errors;
pub mod latency;
pub mod normalize;
pub mod traffic;

use tierlab_domain::{CostTable, SimConfig, SimResult};

pub use normalize::{NormalizedConfig, normalize};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluator {
    pricing: CostTable,
}

impl Evaluator {
    pub fn new(pricing: CostTable) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &CostTable {
        &self.pricing
    }

    pub fn evaluate(&self, config: &SimConfig) -> SimResult {
        let normalized = normalize(config);
        let traffic = traffic::split(&normalized);
        let tiers = capacity::model(&normalized, &traffic);
        let latency = latency::estimate(&normalized, &traffic, &tiers);
        let errors = errors::estimate(&tiers.saturation);
        let cost = cost::monthly(&normalized, &self.pricing);
        let diagram = diagram::project(&normalized, &traffic, &tiers, &latency);

        SimResult {
            status: tiers.status,
            traffic,
            saturation: tiers.saturation,
            capacity: tiers.capacity,
            cache: tiers.cache,
            database: tiers.database,
            latency,
            errors,
            cost,
            diagram,
        }
    }
}

/// Evaluates with the default pricing table.
pub fn simulate(config: &SimConfig) -> SimResult {
    Evaluator::default().evaluate(config)
}
