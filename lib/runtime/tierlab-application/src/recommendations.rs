//! Rule-based suggestions derived from an evaluation.

use tierlab_domain::{
    Recommendation, RecommendationKind, SimConfig, SimResult, SystemStatus, Tier,
};

use crate::model::normalize;

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationEngine {
    /// Read ratio above which a DB bottleneck is treated as read-bound.
    pub read_heavy_ratio: f64,
    /// p95/p50 ratio that counts as a tail latency problem.
    pub tail_ratio: f64,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self {
            read_heavy_ratio: 0.6,
            tail_ratio: 2.0,
        }
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranked recommendations: the bottleneck remedy first, then the tail
    /// latency check.
    pub fn recommend(&self, result: &SimResult, config: &SimConfig) -> Vec<Recommendation> {
        let worst = result.saturation.worst;
        if worst < SystemStatus::DEGRADED_AT {
            return vec![healthy()];
        }

        let mut recommendations = vec![self.for_bottleneck(result.saturation.bottleneck, config)];

        if result.latency.p95 > result.latency.p50 * self.tail_ratio
            && worst < SystemStatus::OVERLOADED_AT
        {
            recommendations.push(tail_latency());
        }
        recommendations
    }

    fn for_bottleneck(&self, tier: Tier, config: &SimConfig) -> Recommendation {
        match tier {
            Tier::App => {
                let downstream = if config.cache.enabled {
                    "Check downstream DB saturation"
                } else {
                    "Enable cache for read-heavy traffic"
                };
                Recommendation::new(
                    RecommendationKind::Bottleneck(Tier::App),
                    "App tier is the bottleneck",
                    "App saturation is limiting throughput and increasing latency.",
                    [
                        "Increase app instances",
                        "Optimize per-request compute",
                        downstream,
                    ],
                )
            }
            Tier::Cache => Recommendation::new(
                RecommendationKind::Bottleneck(Tier::Cache),
                "Cache is saturated",
                "Cache throughput is limiting read scalability.",
                [
                    "Increase cache capacity",
                    "Improve cache hit rate",
                    "Reduce payload size if possible",
                ],
            ),
            Tier::Db => {
                let read_heavy = normalize(config).read_ratio > self.read_heavy_ratio;
                let actions = if read_heavy {
                    let scale = if config.db.replication {
                        "Increase DB capacity"
                    } else {
                        "Enable replication for read scalability"
                    };
                    vec!["Increase cache hit rate", scale]
                } else {
                    let scale = if config.db.partitioning {
                        "Increase DB capacity"
                    } else {
                        "Enable partitioning to improve write throughput"
                    };
                    vec![scale, "Reduce write amplification"]
                };
                Recommendation::new(
                    RecommendationKind::Bottleneck(Tier::Db),
                    "Database is the bottleneck",
                    "DB saturation is driving tail latency and errors.",
                    actions,
                )
            }
        }
    }
}

fn healthy() -> Recommendation {
    Recommendation::new(
        RecommendationKind::Healthy,
        "System is healthy",
        "All tiers have sufficient headroom.",
        ["No immediate scaling required", "Monitor traffic growth"],
    )
}

fn tail_latency() -> Recommendation {
    Recommendation::new(
        RecommendationKind::TailLatency,
        "High tail latency detected",
        "p95 is elevated even before full saturation.",
        [
            "Introduce rate limiting or buffering",
            "Reduce request variance",
            "Investigate uneven traffic distribution",
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::simulate;

    fn recommend(config: &SimConfig) -> Vec<Recommendation> {
        RecommendationEngine::default().recommend(&simulate(config), config)
    }

    fn kinds(recommendations: &[Recommendation]) -> Vec<RecommendationKind> {
        recommendations.iter().map(|rec| rec.kind).collect()
    }

    #[test]
    fn test_healthy_short_circuits() {
        let recommendations = recommend(&SimConfig::baseline());
        assert_eq!(kinds(&recommendations), vec![RecommendationKind::Healthy]);
        assert_eq!(recommendations[0].title, "System is healthy");
    }

    #[test]
    fn test_app_bottleneck_without_cache() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 2000.0;
        config.cache.enabled = false;
        config.db.qps_capacity = 5000.0;
        let recommendations = recommend(&config);
        assert_eq!(
            kinds(&recommendations),
            vec![RecommendationKind::Bottleneck(Tier::App)]
        );
        assert_eq!(
            recommendations[0].actions.last().map(String::as_str),
            Some("Enable cache for read-heavy traffic")
        );
    }

    #[test]
    fn test_cache_bottleneck() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 900.0;
        config.app.instances = 20;
        config.cache.rps_capacity = 500.0;
        config.db.qps_capacity = 1200.0;
        let recommendations = recommend(&config);
        assert_eq!(
            kinds(&recommendations),
            vec![RecommendationKind::Bottleneck(Tier::Cache)]
        );
        assert_eq!(recommendations[0].actions[0], "Increase cache capacity");
    }

    #[test]
    fn test_read_heavy_db_without_replication() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 600.0;
        config.app.instances = 20;
        config.cache.enabled = false;
        config.db.replication = false;
        config.db.qps_capacity = 300.0;
        let recommendations = recommend(&config);
        assert_eq!(
            recommendations[0].kind,
            RecommendationKind::Bottleneck(Tier::Db)
        );
        assert_eq!(
            recommendations[0].actions,
            vec![
                "Increase cache hit rate".to_string(),
                "Enable replication for read scalability".to_string(),
            ]
        );
    }

    #[test]
    fn test_read_heavy_threshold_is_exclusive() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 600.0;
        config.traffic.read_ratio = 0.6;
        config.app.instances = 20;
        config.cache.enabled = false;
        config.db.qps_capacity = 300.0;
        let at_threshold = recommend(&config);
        assert_eq!(
            at_threshold[0].kind,
            RecommendationKind::Bottleneck(Tier::Db)
        );
        assert_eq!(
            at_threshold[0].actions[0],
            "Enable partitioning to improve write throughput"
        );

        config.traffic.read_ratio = 0.61;
        assert_eq!(recommend(&config)[0].actions[0], "Increase cache hit rate");
    }

    #[test]
    fn test_write_heavy_db_with_partitioning() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 600.0;
        config.traffic.read_ratio = 0.3;
        config.app.instances = 20;
        config.db.partitioning = true;
        let recommendations = recommend(&config);
        assert_eq!(
            recommendations[0].kind,
            RecommendationKind::Bottleneck(Tier::Db)
        );
        assert_eq!(recommendations[0].actions[0], "Increase DB capacity");
        assert_eq!(recommendations[0].actions[1], "Reduce write amplification");
    }

    #[test]
    fn test_tail_latency_added_while_degraded() {
        let mut config = SimConfig::baseline();
        // Single degraded tier at 0.99: tail amplification 1.7125 stays under 2x.
        config.app.autoscale = false;
        config.app.instances = 1;
        config.app.rps_per_instance = 1000.0;
        config.traffic.rps = 990.0;
        config.cache.rps_capacity = 3000.0;
        config.db.qps_capacity = 1200.0;
        assert_eq!(
            kinds(&recommend(&config)),
            vec![RecommendationKind::Bottleneck(Tier::App)]
        );

        let engine = RecommendationEngine {
            tail_ratio: 1.5,
            ..RecommendationEngine::default()
        };
        let result = simulate(&config);
        assert_eq!(
            kinds(&engine.recommend(&result, &config)),
            vec![
                RecommendationKind::Bottleneck(Tier::App),
                RecommendationKind::TailLatency,
            ]
        );
    }

    #[test]
    fn test_no_tail_recommendation_when_overloaded() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 2000.0;
        let engine = RecommendationEngine {
            tail_ratio: 1.0,
            ..RecommendationEngine::default()
        };
        let result = simulate(&config);
        let recommendations = engine.recommend(&result, &config);
        assert!(
            recommendations
                .iter()
                .all(|rec| rec.kind != RecommendationKind::TailLatency)
        );
    }
}
