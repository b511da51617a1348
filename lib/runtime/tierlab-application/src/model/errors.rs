use tierlab_domain::{ErrorCause, ErrorEstimate, Saturation, Tier};

use super::normalize::clamp;

const SPIKE_THRESHOLD: f64 = 0.85;
const SPIKE_SLOPE: f64 = 0.05;
const SPIKE_CAP: f64 = 0.03;
const OVERLOAD_SLOPE: f64 = 0.22;
const OVERLOAD_FLOOR: f64 = 0.02;
const OVERLOAD_CAP: f64 = 0.25;

/// Modeled request failure rate. Overload fails fast; the degraded band
/// only loses a sliver of requests to tail spikes.
pub fn estimate(saturation: &Saturation) -> ErrorEstimate {
    let worst = saturation.worst;
    if worst >= 1.0 {
        let cause = match saturation.bottleneck {
            Tier::Db => ErrorCause::DbSaturation,
            Tier::App => ErrorCause::AppQueueOverflow,
            Tier::Cache => ErrorCause::CacheSaturation,
        };
        ErrorEstimate {
            rate: clamp(
                (worst - 1.0) * OVERLOAD_SLOPE + OVERLOAD_FLOOR,
                OVERLOAD_FLOOR,
                OVERLOAD_CAP,
            ),
            cause,
        }
    } else if worst >= SPIKE_THRESHOLD {
        ErrorEstimate {
            rate: clamp((worst - SPIKE_THRESHOLD) * SPIKE_SLOPE, 0.0, SPIKE_CAP),
            cause: ErrorCause::TailLatencySpikes,
        }
    } else {
        ErrorEstimate {
            rate: 0.0,
            cause: ErrorCause::None,
        }
    }
}
