use serde::Serialize;

use tierlab_domain::{ComponentId, SimConfig, SimResult};

use super::units::{count, error_percent, millis, money, on_off, percent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveValue {
    pub key: &'static str,
    pub value: String,
}

fn live(key: &'static str, value: impl Into<String>) -> LiveValue {
    LiveValue {
        key,
        value: value.into(),
    }
}

/// Current figures relevant to one component: the shared summary followed
/// by the component's own values.
pub fn live_values(id: ComponentId, result: &SimResult, config: &SimConfig) -> Vec<LiveValue> {
    let saturation = &result.saturation;
    let mut values = vec![
        live("Status", result.status.as_str().to_uppercase()),
        live("RPS", count(result.traffic.rps)),
        live("p95", millis(result.latency.p95)),
        live("Errors", error_percent(result.errors.rate)),
        live("Monthly", money(result.cost.monthly_total)),
    ];

    match id {
        ComponentId::Client | ComponentId::TrafficSection => values.extend([
            live("Reads", count(result.traffic.reads)),
            live("Writes", count(result.traffic.writes)),
            live("Payload", format!("{} KB", config.traffic.payload_kb.round())),
        ]),
        ComponentId::App | ComponentId::AppSection => values.extend([
            live("App sat", percent(saturation.app)),
            live("Instances", config.app.instances.to_string()),
            live("RPS/inst", count(config.app.rps_per_instance)),
            live("Autoscale", on_off(config.app.autoscale)),
        ]),
        ComponentId::Cache | ComponentId::CacheSection => values.extend([
            live("Cache sat", percent(saturation.cache)),
            live("Enabled", on_off(result.cache.enabled)),
            live(
                "Hit rate",
                if result.cache.enabled {
                    percent(result.cache.hit_rate)
                } else {
                    "—".to_string()
                },
            ),
            live("Cap", format!("{} rps", config.cache.rps_capacity.round())),
        ]),
        ComponentId::Db | ComponentId::DbSection => values.extend([
            live("DB sat", percent(saturation.db)),
            live("DB cap", format!("{} qps", config.db.qps_capacity.round())),
            live("Write penalty", format!("{:.2}×", config.db.write_penalty)),
            live("Replication", on_off(config.db.replication)),
            live("Partitioning", on_off(config.db.partitioning)),
        ]),
        ComponentId::Lb => values.extend([
            live("Bottleneck", saturation.bottleneck.as_str().to_uppercase()),
            live("Worst sat", percent(saturation.worst)),
        ]),
        ComponentId::LatencySection => values.extend([
            live("Base latency", millis(config.base_latency_ms)),
            live("p50", millis(result.latency.p50)),
            live("p95", millis(result.latency.p95)),
        ]),
        ComponentId::PresetSection => {}
    }
    values
}
