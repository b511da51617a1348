use tierlab_domain::{CostBreakdown, CostLine, CostTable};

use super::normalize::{NormalizedConfig, bounded};

/// Monthly spend. Reads provisioned capacity only, never traffic.
pub fn monthly(config: &NormalizedConfig, table: &CostTable) -> CostBreakdown {
    let monthly_compute = bounded(config.instances * table.app_instance_monthly);

    let monthly_cache = if config.cache_enabled {
        bounded(
            table.cache_base_monthly
                + config.cache_capacity / 1000.0 * table.cache_per_thousand_rps,
        )
    } else {
        0.0
    };

    let monthly_db = if config.db_enabled {
        let replication = if config.replication {
            table.replication_monthly
        } else {
            0.0
        };
        let partitioning = if config.partitioning {
            table.partitioning_monthly
        } else {
            0.0
        };
        bounded(
            table.db_base_monthly
                + config.db_capacity / 100.0 * table.db_per_hundred_qps
                + replication
                + partitioning,
        )
    } else {
        0.0
    };

    let monthly_total = bounded(monthly_compute + monthly_cache + monthly_db);

    CostBreakdown {
        monthly_compute,
        monthly_cache,
        monthly_db,
        monthly_total,
        breakdown: vec![
            CostLine {
                label: "Compute (App tier)".to_string(),
                value: monthly_compute,
            },
            CostLine {
                label: "Cache".to_string(),
                value: monthly_cache,
            },
            CostLine {
                label: "Database".to_string(),
                value: monthly_db,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::normalize::normalize;
    use approx::assert_relative_eq;
    use tierlab_domain::SimConfig;

    #[test]
    fn test_baseline_cost() {
        let cost = monthly(&normalize(&SimConfig::baseline()), &CostTable::default());
        assert_relative_eq!(cost.monthly_compute, 128.0);
        assert_relative_eq!(cost.monthly_cache, 55.0 + 0.8 * 18.0, epsilon = 1e-9);
        assert_relative_eq!(cost.monthly_db, 140.0 + 2.8 * 35.0 + 55.0, epsilon = 1e-9);
        assert_relative_eq!(
            cost.monthly_total,
            cost.monthly_compute + cost.monthly_cache + cost.monthly_db
        );
        let labels: Vec<_> = cost.breakdown.iter().map(|line| line.label.as_str()).collect();
        assert_eq!(labels, vec!["Compute (App tier)", "Cache", "Database"]);
    }

    #[test]
    fn test_cost_ignores_traffic() {
        let mut quiet = SimConfig::baseline();
        quiet.traffic.rps = 0.0;
        let mut busy = SimConfig::baseline();
        busy.traffic.rps = 2000.0;
        busy.traffic.read_ratio = 0.1;
        busy.traffic.payload_kb = 150.0;

        let table = CostTable::default();
        assert_eq!(
            monthly(&normalize(&quiet), &table),
            monthly(&normalize(&busy), &table)
        );
    }

    #[test]
    fn test_disabled_tiers_cost_nothing() {
        let mut config = SimConfig::baseline();
        config.cache.enabled = false;
        config.db.enabled = false;
        let cost = monthly(&normalize(&config), &CostTable::default());
        assert_eq!(cost.monthly_cache, 0.0);
        assert_eq!(cost.monthly_db, 0.0);
        assert_eq!(cost.monthly_total, cost.monthly_compute);
    }

    #[test]
    fn test_alternate_pricing_table() {
        let table = CostTable {
            app_instance_monthly: 100.0,
            partitioning_monthly: 1000.0,
            ..CostTable::default()
        };
        let mut config = SimConfig::baseline();
        config.db.partitioning = true;
        let cost = monthly(&normalize(&config), &table);
        assert_relative_eq!(cost.monthly_compute, 400.0);
        assert_relative_eq!(cost.monthly_db, 140.0 + 98.0 + 55.0 + 1000.0, epsilon = 1e-9);
    }
}
