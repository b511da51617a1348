//! Median and tail latency from tier saturation and write share.

use tierlab_domain::{Latency, LatencyNote, Tier, TrafficBreakdown};

use super::capacity::TierModel;
use super::normalize::{NormalizedConfig, bounded, clamp};

/// Latency floor applied even when the configured baseline is lower.
pub const MIN_BASE_LATENCY_MS: f64 = 5.0;

const AMPLIFY_INPUT_CAP: f64 = 2.5;
const AMPLIFY_GAIN: f64 = 0.7;
const CACHE_WEIGHT: f64 = 0.35;
const CACHE_OFFSET: f64 = 0.85;
const TAIL_BASE: f64 = 1.35;
const TAIL_KNEE: f64 = 0.7;
const TAIL_SLOPE: f64 = 1.25;
const TAIL_CAP: f64 = 1.8;
const LOW_HIT_RATE: f64 = 0.55;
const AUTOSCALE_NOTE_AT: f64 = 0.85;

/// Queueing amplification for a tier: flat near idle, superlinear past full
/// saturation, bounded input.
pub fn amplify(saturation: f64) -> f64 {
    1.0 + clamp(saturation, 0.0, AMPLIFY_INPUT_CAP).powi(2) * AMPLIFY_GAIN
}

pub fn tail_amplification(worst: f64) -> f64 {
    TAIL_BASE + clamp((worst - TAIL_KNEE) * TAIL_SLOPE, 0.0, TAIL_CAP)
}

pub fn estimate(
    config: &NormalizedConfig,
    traffic: &TrafficBreakdown,
    tiers: &TierModel,
) -> Latency {
    let saturation = &tiers.saturation;

    let app_factor = amplify(saturation.app);
    let cache_factor = if config.cache_enabled {
        amplify(saturation.cache) * CACHE_WEIGHT + CACHE_OFFSET
    } else {
        1.0
    };
    let db_factor = if config.db_enabled {
        amplify(saturation.db)
    } else {
        1.0
    };
    let write_share = traffic.writes / traffic.rps.max(1.0);
    let write_factor = 1.0 + write_share * (config.write_penalty - 1.0);

    let p50 = bounded(
        config.base_latency_ms.max(MIN_BASE_LATENCY_MS)
            * app_factor
            * cache_factor
            * db_factor
            * write_factor,
    );
    let p95 = bounded(p50 * tail_amplification(saturation.worst));

    Latency {
        p50,
        p95,
        notes: notes(config, tiers),
    }
}

fn notes(config: &NormalizedConfig, tiers: &TierModel) -> Vec<LatencyNote> {
    let mut notes = Vec::new();
    if tiers.saturation.bottleneck == Tier::Db {
        if tiers.database.write_saturation > tiers.database.read_saturation {
            notes.push(LatencyNote::DbWritePressure);
        } else {
            notes.push(LatencyNote::DbReadPressure);
        }
    }
    if !config.cache_enabled {
        notes.push(LatencyNote::CacheDisabled);
    } else if tiers.cache.hit_rate < LOW_HIT_RATE {
        notes.push(LatencyNote::LowCacheHitRate);
    }
    if config.autoscale && tiers.saturation.app > AUTOSCALE_NOTE_AT {
        notes.push(LatencyNote::AutoscaleHeadroom);
    }
    notes
}
