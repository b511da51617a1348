//! Clamps a raw configuration into the ranges the model relies on.

use tierlab_domain::SimConfig;

/// Upper bound for the configured base hit rate.
pub const MAX_BASE_HIT_RATE: f64 = 0.95;

/// Configuration with every numeric field inside its safe range. Capacities
/// are floored to 1 so no tier divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedConfig {
    pub rps: f64,
    pub read_ratio: f64,
    pub payload_kb: f64,
    pub instances: f64,
    pub rps_per_instance: f64,
    pub autoscale: bool,
    pub cache_enabled: bool,
    pub base_hit_rate: f64,
    pub cache_capacity: f64,
    pub db_enabled: bool,
    pub db_capacity: f64,
    pub write_penalty: f64,
    pub replication: bool,
    pub partitioning: bool,
    pub base_latency_ms: f64,
}

pub fn normalize(config: &SimConfig) -> NormalizedConfig {
    NormalizedConfig {
        rps: at_least(config.traffic.rps, 0.0),
        read_ratio: clamp(config.traffic.read_ratio, 0.0, 1.0),
        payload_kb: at_least(config.traffic.payload_kb, 0.0),
        instances: f64::from(config.app.instances.max(1)),
        rps_per_instance: at_least(config.app.rps_per_instance, 1.0),
        autoscale: config.app.autoscale,
        cache_enabled: config.cache.enabled,
        base_hit_rate: clamp(config.cache.base_hit_rate, 0.0, MAX_BASE_HIT_RATE),
        cache_capacity: at_least(config.cache.rps_capacity, 1.0),
        db_enabled: config.db.enabled,
        db_capacity: at_least(config.db.qps_capacity, 1.0),
        write_penalty: at_least(config.db.write_penalty, 1.0),
        replication: config.db.replication,
        partitioning: config.db.partitioning,
        base_latency_ms: at_least(config.base_latency_ms, 0.0),
    }
}

/// `f64::clamp` that maps non-finite input to the lower bound.
pub(crate) fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        lo
    }
}

/// Caps a product that overflowed to infinity at the largest finite value.
pub(crate) fn bounded(value: f64) -> f64 {
    value.min(f64::MAX)
}

fn at_least(value: f64, lo: f64) -> f64 {
    if value.is_finite() { value.max(lo) } else { lo }
}
