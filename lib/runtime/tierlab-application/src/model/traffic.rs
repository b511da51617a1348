use tierlab_domain::TrafficBreakdown;

use super::normalize::NormalizedConfig;

/// Splits total traffic into reads and writes.
pub fn split(config: &NormalizedConfig) -> TrafficBreakdown {
    let reads = config.rps * config.read_ratio;
    TrafficBreakdown {
        rps: config.rps,
        reads,
        writes: config.rps - reads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalize::normalize;
    use tierlab_domain::SimConfig;

    #[test]
    fn test_split_baseline() {
        let traffic = split(&normalize(&SimConfig::baseline()));
        assert_eq!(traffic.rps, 250.0);
        assert_eq!(traffic.reads, 200.0);
        assert_eq!(traffic.writes, 50.0);
    }

    #[test]
    fn test_split_zero_traffic() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = 0.0;
        let traffic = split(&normalize(&config));
        assert_eq!(traffic.reads, 0.0);
        assert_eq!(traffic.writes, 0.0);
    }

    #[test]
    fn test_split_write_only() {
        let mut config = SimConfig::baseline();
        config.traffic.read_ratio = -0.4;
        let traffic = split(&normalize(&config));
        assert_eq!(traffic.reads, 0.0);
        assert_eq!(traffic.writes, 250.0);
    }
}
