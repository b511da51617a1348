//! Projects the evaluation onto the architecture diagram: one descriptor
//! per node, the edges between them, and a hotspot list.

use tierlab_domain::{
    Diagram, DiagramEdge, DiagramNode, Hotspot, Latency, MetricValue, NodeId, NodeMetric,
    Severity, SystemStatus, TrafficBreakdown,
};

use super::capacity::TierModel;
use super::normalize::NormalizedConfig;

/// The load balancer has no capacity of its own; its status tracks the app
/// tier scaled by this factor.
pub const LB_PROXY_FACTOR: f64 = 0.85;
/// Saturation above which a tier is listed as a hotspot.
pub const HOTSPOT_THRESHOLD: f64 = 0.9;

const NO_VALUE: &str = "—";

pub fn project(
    config: &NormalizedConfig,
    traffic: &TrafficBreakdown,
    tiers: &TierModel,
    latency: &Latency,
) -> Diagram {
    Diagram {
        nodes: vec![
            client_node(traffic),
            lb_node(tiers, latency),
            app_node(config, tiers),
            cache_node(config, tiers),
            db_node(config, tiers),
        ],
        edges: edges(config),
        hotspots: hotspots(config, tiers),
    }
}

fn client_node(traffic: &TrafficBreakdown) -> DiagramNode {
    DiagramNode {
        id: NodeId::Client,
        title: "Clients".to_string(),
        subtitle: "Mobile/Web".to_string(),
        status: SystemStatus::Healthy,
        metrics: vec![NodeMetric::new("RPS", MetricValue::Count(traffic.rps))],
    }
}

fn lb_node(tiers: &TierModel, latency: &Latency) -> DiagramNode {
    DiagramNode {
        id: NodeId::Lb,
        title: "Load Balancer".to_string(),
        subtitle: "TLS + routing".to_string(),
        status: SystemStatus::from_saturation(tiers.saturation.app * LB_PROXY_FACTOR),
        metrics: vec![NodeMetric::new("Tail", MetricValue::Millis(latency.p95))],
    }
}

fn app_node(config: &NormalizedConfig, tiers: &TierModel) -> DiagramNode {
    DiagramNode {
        id: NodeId::App,
        title: "App Servers".to_string(),
        subtitle: format!("{} instances", config.instances),
        status: SystemStatus::from_saturation(tiers.saturation.app),
        metrics: vec![
            NodeMetric::new("Sat", MetricValue::Percent(tiers.saturation.app)),
            NodeMetric::new("Cap", MetricValue::Rps(tiers.capacity.app)),
        ],
    }
}

fn cache_node(config: &NormalizedConfig, tiers: &TierModel) -> DiagramNode {
    if !config.cache_enabled {
        return disabled_node(NodeId::Cache, "Cache");
    }
    DiagramNode {
        id: NodeId::Cache,
        title: "Cache".to_string(),
        subtitle: format!("Hit {}", MetricValue::Percent(tiers.cache.hit_rate)),
        status: SystemStatus::from_saturation(tiers.saturation.cache),
        metrics: vec![
            NodeMetric::new("Sat", MetricValue::Percent(tiers.saturation.cache)),
            NodeMetric::new("Cap", MetricValue::Rps(tiers.capacity.cache)),
        ],
    }
}

fn db_node(config: &NormalizedConfig, tiers: &TierModel) -> DiagramNode {
    if !config.db_enabled {
        return disabled_node(NodeId::Db, "Database");
    }
    let replication = if config.replication {
        "Replicated"
    } else {
        "Single"
    };
    let partitioning = if config.partitioning {
        "Partitioned"
    } else {
        "No partitions"
    };
    DiagramNode {
        id: NodeId::Db,
        title: "Database".to_string(),
        subtitle: format!("{replication} · {partitioning}"),
        status: SystemStatus::from_saturation(tiers.saturation.db),
        metrics: vec![
            NodeMetric::new("Sat", MetricValue::Percent(tiers.saturation.db)),
            NodeMetric::new("QPS", MetricValue::Count(tiers.database.total_qps())),
        ],
    }
}

fn disabled_node(id: NodeId, title: &str) -> DiagramNode {
    DiagramNode {
        id,
        title: title.to_string(),
        subtitle: "Disabled".to_string(),
        status: SystemStatus::Healthy,
        metrics: vec![NodeMetric::new(
            "Note",
            MetricValue::Text(NO_VALUE.to_string()),
        )],
    }
}

fn edges(config: &NormalizedConfig) -> Vec<DiagramEdge> {
    let via_cache = |label: &str| {
        if config.cache_enabled {
            label.to_string()
        } else {
            NO_VALUE.to_string()
        }
    };
    let edge = |from, to, label: String| DiagramEdge { from, to, label };
    vec![
        edge(NodeId::Client, NodeId::Lb, "HTTP".to_string()),
        edge(NodeId::Lb, NodeId::App, "route".to_string()),
        edge(NodeId::App, NodeId::Cache, via_cache("read")),
        edge(NodeId::App, NodeId::Db, "write + miss".to_string()),
        edge(NodeId::Cache, NodeId::Db, via_cache("miss")),
    ]
}

fn hotspots(config: &NormalizedConfig, tiers: &TierModel) -> Vec<Hotspot> {
    let saturation = &tiers.saturation;
    let candidates = [
        ("DB saturation", saturation.db, true),
        ("Cache capacity", saturation.cache, config.cache_enabled),
        ("App tier saturation", saturation.app, true),
    ];

    let mut hotspots: Vec<Hotspot> = candidates
        .into_iter()
        .filter(|(_, value, applies)| *applies && *value > HOTSPOT_THRESHOLD)
        .map(|(label, value, _)| Hotspot {
            label: label.to_string(),
            severity: if value > 1.0 {
                Severity::High
            } else {
                Severity::Med
            },
        })
        .collect();

    if hotspots.is_empty() {
        hotspots.push(Hotspot {
            label: "No hotspots".to_string(),
            severity: Severity::Low,
        });
    }
    hotspots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::capacity::model;
    use crate::model::latency::estimate;
    use crate::model::normalize::normalize;
    use crate::model::traffic::split;
    use tierlab_domain::SimConfig;

    fn run(config: &SimConfig) -> Diagram {
        let normalized = normalize(config);
        let traffic = split(&normalized);
        let tiers = model(&normalized, &traffic);
        let latency = estimate(&normalized, &traffic, &tiers);
        project(&normalized, &traffic, &tiers, &latency)
    }

    fn metric(node: &DiagramNode, key: &str) -> String {
        node.metrics
            .iter()
            .find(|metric| metric.key == key)
            .map(|metric| metric.value.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_baseline_nodes() {
        let diagram = run(&SimConfig::baseline());
        let ids: Vec<_> = diagram.nodes.iter().map(|node| node.id).collect();
        assert_eq!(ids, NodeId::ALL.to_vec());

        let app = diagram.node(NodeId::App).unwrap();
        assert_eq!(app.subtitle, "4 instances");
        assert_eq!(metric(app, "Sat"), "48%");
        assert_eq!(metric(app, "Cap"), "518 rps");

        let cache = diagram.node(NodeId::Cache).unwrap();
        assert_eq!(cache.subtitle, "Hit 67%");
        assert_eq!(metric(cache, "Sat"), "25%");

        let db = diagram.node(NodeId::Db).unwrap();
        assert_eq!(db.subtitle, "Replicated · No partitions");
        assert_eq!(metric(db, "QPS"), "116");

        assert_eq!(
            diagram.hotspots,
            vec![Hotspot {
                label: "No hotspots".to_string(),
                severity: Severity::Low,
            }]
        );
    }

    #[test]
    fn test_disabled_tiers_render_as_healthy() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 2000.0;
        config.cache.enabled = false;
        config.db.enabled = false;
        let diagram = run(&config);

        for id in [NodeId::Cache, NodeId::Db] {
            let node = diagram.node(id).unwrap();
            assert_eq!(node.subtitle, "Disabled");
            assert_eq!(node.status, SystemStatus::Healthy);
            assert_eq!(metric(node, "Note"), "—");
        }
        assert_eq!(diagram.edges[2].label, "—");
        assert_eq!(diagram.edges[4].label, "—");
        assert_eq!(diagram.edges[3].label, "write + miss");
    }

    #[test]
    fn test_lb_status_uses_scaled_app_saturation() {
        let mut config = SimConfig::baseline();
        config.app.autoscale = false;
        config.app.instances = 1;
        config.app.rps_per_instance = 1000.0;
        config.cache.rps_capacity = 3000.0;
        config.db.qps_capacity = 1200.0;

        let statuses = |rps: f64| {
            let mut config = config.clone();
            config.traffic.rps = rps;
            let diagram = run(&config);
            (
                diagram.node(NodeId::App).unwrap().status,
                diagram.node(NodeId::Lb).unwrap().status,
            )
        };

        assert_eq!(
            statuses(800.0),
            (SystemStatus::Degraded, SystemStatus::Healthy)
        );
        assert_eq!(
            statuses(1000.0),
            (SystemStatus::Overloaded, SystemStatus::Degraded)
        );
        assert_eq!(
            statuses(1200.0),
            (SystemStatus::Overloaded, SystemStatus::Overloaded)
        );
    }

    #[test]
    fn test_hotspot_severity_and_order() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 2000.0;
        let diagram = run(&config);
        let labels: Vec<_> = diagram
            .hotspots
            .iter()
            .map(|hotspot| (hotspot.label.as_str(), hotspot.severity))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("DB saturation", Severity::High),
                ("Cache capacity", Severity::High),
                ("App tier saturation", Severity::High),
            ]
        );
    }

    #[test]
    fn test_medium_hotspot() {
        let mut config = SimConfig::baseline();
        config.app.autoscale = false;
        config.app.instances = 1;
        config.app.rps_per_instance = 1000.0;
        config.traffic.rps = 950.0;
        config.cache.rps_capacity = 3000.0;
        config.db.qps_capacity = 1200.0;
        let diagram = run(&config);
        assert_eq!(
            diagram.hotspots,
            vec![Hotspot {
                label: "App tier saturation".to_string(),
                severity: Severity::Med,
            }]
        );
    }
}
