//! Per-tier effective capacity, saturation and bottleneck election.

use tierlab_domain::{
    CacheStats, DatabaseLoad, Saturation, SystemStatus, Tier, TierCapacity, TrafficBreakdown,
};

use super::normalize::{NormalizedConfig, bounded, clamp};

/// Headroom autoscaling adds to the app tier.
pub const AUTOSCALE_HEADROOM: f64 = 1.08;
/// Read capacity multiplier with replicas.
pub const REPLICATION_READ_BOOST: f64 = 1.35;
/// Write capacity multiplier with partitioning.
pub const PARTITIONING_WRITE_BOOST: f64 = 1.25;

const PAYLOAD_PENALTY_START_KB: f64 = 8.0;
const PAYLOAD_PENALTY_SPAN_KB: f64 = 80.0;
const PAYLOAD_PENALTY_CAP: f64 = 0.25;
const SATURATION_PENALTY_KNEE: f64 = 0.7;
const SATURATION_PENALTY_SLOPE: f64 = 0.22;
const SATURATION_PENALTY_CAP: f64 = 0.18;
const MIN_HIT_RATE: f64 = 0.1;
const MAX_HIT_RATE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierModel {
    pub capacity: TierCapacity,
    pub cache: CacheStats,
    pub database: DatabaseLoad,
    pub saturation: Saturation,
    pub status: SystemStatus,
}

pub fn model(config: &NormalizedConfig, traffic: &TrafficBreakdown) -> TierModel {
    let autoscale = if config.autoscale {
        AUTOSCALE_HEADROOM
    } else {
        1.0
    };
    let app_capacity = bounded(config.instances * config.rps_per_instance * autoscale);
    let app = traffic.rps / app_capacity;

    let cache = cache_stats(config, traffic.reads, app);
    let cache_saturation = if cache.enabled {
        traffic.reads / config.cache_capacity
    } else {
        0.0
    };

    let read_boost = if config.replication {
        REPLICATION_READ_BOOST
    } else {
        1.0
    };
    let write_boost = if config.partitioning {
        PARTITIONING_WRITE_BOOST
    } else {
        1.0
    };
    let db_read = bounded(config.db_capacity * read_boost);
    let db_write = bounded(config.db_capacity * write_boost);

    let read_load = if cache.enabled {
        cache.misses
    } else {
        traffic.reads
    };
    let write_load = traffic.writes;
    let (read_saturation, write_saturation) = if config.db_enabled {
        (read_load / db_read, write_load / db_write)
    } else {
        (0.0, 0.0)
    };
    let db = read_saturation.max(write_saturation);

    let (worst, bottleneck) = elect_bottleneck(app, cache_saturation, db);

    TierModel {
        capacity: TierCapacity {
            app: app_capacity,
            cache: config.cache_capacity,
            db_read,
            db_write,
        },
        cache,
        database: DatabaseLoad {
            enabled: config.db_enabled,
            read_load,
            write_load,
            read_saturation,
            write_saturation,
        },
        saturation: Saturation {
            app,
            cache: cache_saturation,
            db,
            worst,
            bottleneck,
        },
        status: SystemStatus::from_saturation(worst),
    }
}

/// Effective hit rate: payload size and a saturated app tier both erode the
/// configured base rate.
pub fn effective_hit_rate(base_hit_rate: f64, payload_kb: f64, app_saturation: f64) -> f64 {
    let payload_penalty = clamp(
        (payload_kb - PAYLOAD_PENALTY_START_KB) / PAYLOAD_PENALTY_SPAN_KB,
        0.0,
        PAYLOAD_PENALTY_CAP,
    );
    let saturation_penalty = clamp(
        (app_saturation - SATURATION_PENALTY_KNEE) * SATURATION_PENALTY_SLOPE,
        0.0,
        SATURATION_PENALTY_CAP,
    );
    clamp(
        base_hit_rate - payload_penalty - saturation_penalty,
        MIN_HIT_RATE,
        MAX_HIT_RATE,
    )
}

fn cache_stats(config: &NormalizedConfig, reads: f64, app_saturation: f64) -> CacheStats {
    if !config.cache_enabled {
        return CacheStats {
            enabled: false,
            hit_rate: 0.0,
            hits: 0.0,
            misses: 0.0,
        };
    }
    let hit_rate = effective_hit_rate(config.base_hit_rate, config.payload_kb, app_saturation);
    let hits = reads * hit_rate;
    CacheStats {
        enabled: true,
        hit_rate,
        hits,
        misses: reads - hits,
    }
}

/// Picks the most saturated tier. Ties go to the database, then the cache.
pub fn elect_bottleneck(app: f64, cache: f64, db: f64) -> (f64, Tier) {
    let worst = app.max(cache).max(db);
    let saturation = Saturation {
        app,
        cache,
        db,
        worst,
        bottleneck: Tier::App,
    };
    let bottleneck = Tier::TIE_BREAK
        .into_iter()
        .find(|tier| saturation.of(*tier) == worst)
        .unwrap_or(Tier::App);
    (worst, bottleneck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalize::normalize;
    use crate::model::traffic::split;
    use approx::assert_relative_eq;
    use tierlab_domain::SimConfig;

    fn run(config: &SimConfig) -> TierModel {
        let normalized = normalize(config);
        model(&normalized, &split(&normalized))
    }

    #[test]
    fn test_baseline_capacity() {
        let tiers = run(&SimConfig::baseline());
        assert_relative_eq!(tiers.capacity.app, 518.4, epsilon = 1e-9);
        assert_relative_eq!(tiers.saturation.app, 250.0 / 518.4, epsilon = 1e-12);
        assert_relative_eq!(tiers.cache.hit_rate, 0.67, epsilon = 1e-12);
        assert_relative_eq!(tiers.saturation.cache, 0.25, epsilon = 1e-12);
        assert_relative_eq!(tiers.capacity.db_read, 378.0, epsilon = 1e-9);
        assert_relative_eq!(tiers.capacity.db_write, 280.0, epsilon = 1e-9);
        assert_relative_eq!(tiers.database.read_load, 66.0, epsilon = 1e-9);
        assert_relative_eq!(tiers.saturation.db, 50.0 / 280.0, epsilon = 1e-12);
        assert_eq!(tiers.saturation.bottleneck, Tier::App);
        assert_eq!(tiers.status, SystemStatus::Healthy);
    }

    #[test]
    fn test_hit_rate_penalties() {
        assert_relative_eq!(effective_hit_rate(0.72, 8.0, 0.5), 0.72);
        // Payload penalty caps at 0.25.
        assert_relative_eq!(effective_hit_rate(0.9, 500.0, 0.0), 0.65, epsilon = 1e-12);
        // Saturation penalty caps at 0.18.
        assert_relative_eq!(effective_hit_rate(0.9, 0.0, 5.0), 0.72, epsilon = 1e-12);
        assert_relative_eq!(effective_hit_rate(0.9, 0.0, 0.8), 0.878, epsilon = 1e-12);
        // Floor applies even when penalties push below it.
        assert_relative_eq!(effective_hit_rate(0.0, 200.0, 3.0), 0.1);
    }

    #[test]
    fn test_cache_disabled_routes_reads_to_db() {
        let mut config = SimConfig::baseline();
        config.cache.enabled = false;
        let tiers = run(&config);
        assert_eq!(tiers.saturation.cache, 0.0);
        assert_eq!(tiers.cache.hit_rate, 0.0);
        assert_eq!(tiers.database.read_load, 200.0);
        assert_relative_eq!(tiers.database.read_saturation, 200.0 / 378.0, epsilon = 1e-12);
    }

    #[test]
    fn test_db_disabled_zeroes_db_saturation() {
        let mut config = SimConfig::baseline();
        config.db.enabled = false;
        config.traffic.rps = 2000.0;
        let tiers = run(&config);
        assert_eq!(tiers.saturation.db, 0.0);
        assert_ne!(tiers.saturation.bottleneck, Tier::Db);
    }

    #[test]
    fn test_partitioning_boosts_write_capacity() {
        let mut config = SimConfig::baseline();
        config.traffic.read_ratio = 0.2;
        let before = run(&config).database.write_saturation;
        config.db.partitioning = true;
        let after = run(&config).database.write_saturation;
        assert_relative_eq!(before / after, PARTITIONING_WRITE_BOOST, epsilon = 1e-12);
    }

    #[test]
    fn test_tie_break_prefers_db_then_cache() {
        assert_eq!(elect_bottleneck(1.0, 1.0, 1.0), (1.0, Tier::Db));
        assert_eq!(elect_bottleneck(0.9, 0.9, 0.3), (0.9, Tier::Cache));
        assert_eq!(elect_bottleneck(0.9, 0.2, 0.3), (0.9, Tier::App));
        assert_eq!(elect_bottleneck(0.0, 0.0, 0.0), (0.0, Tier::Db));
    }
}
