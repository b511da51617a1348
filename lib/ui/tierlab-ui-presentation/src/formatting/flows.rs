use serde::Serialize;

use tierlab_domain::{Severity, SimConfig, SimResult, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKey {
    ClientToLb,
    LbToApp,
    AppToCache,
    CacheHit,
    CacheMissToDb,
    AppWriteToDb,
}

/// One leg of the request path with the share of total requests taking it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowRow {
    pub key: FlowKey,
    pub label: &'static str,
    /// Fraction of all requests, in `[0, 1]`.
    pub share: f64,
    pub active: bool,
    pub emphasis: Severity,
}

pub fn flow_rows(result: &SimResult, config: &SimConfig) -> Vec<FlowRow> {
    let read_ratio = clamp_unit(config.traffic.read_ratio);
    let write_ratio = 1.0 - read_ratio;
    let cache_enabled = result.cache.enabled;
    let hit_rate = if cache_enabled {
        clamp_unit(result.cache.hit_rate)
    } else {
        0.0
    };
    let miss_rate = 1.0 - hit_rate;

    let rows = [
        (FlowKey::ClientToLb, "client → lb · http", 1.0, true),
        (FlowKey::LbToApp, "lb → app · route", 1.0, true),
        (
            FlowKey::AppToCache,
            "app → cache · read",
            read_ratio,
            cache_enabled && read_ratio > 0.0,
        ),
        (
            FlowKey::CacheHit,
            "cache → app · hit (served)",
            read_ratio * hit_rate,
            cache_enabled && read_ratio > 0.0 && hit_rate > 0.0,
        ),
        // Reads reach the database even without a cache.
        (
            FlowKey::CacheMissToDb,
            "cache → db · miss",
            read_ratio * miss_rate,
            read_ratio > 0.0,
        ),
        (
            FlowKey::AppWriteToDb,
            "app → db · write",
            write_ratio,
            write_ratio > 0.0,
        ),
    ];

    let bottleneck = result.saturation.bottleneck;
    rows.into_iter()
        .map(|(key, label, share, active)| FlowRow {
            key,
            label,
            share,
            active,
            emphasis: emphasis(bottleneck, key),
        })
        .collect()
}

fn emphasis(bottleneck: Tier, key: FlowKey) -> Severity {
    use FlowKey::*;
    match (bottleneck, key) {
        (Tier::Db, CacheMissToDb | AppWriteToDb) => Severity::High,
        (Tier::Cache, AppToCache | CacheMissToDb | CacheHit) => Severity::Med,
        (Tier::App, LbToApp | ClientToLb) => Severity::Med,
        _ => Severity::Low,
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
