//! Monthly pricing constants for the cost model.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::parse_document;

/// Pricing table the cost model reads. Swapping the table changes prices
/// without touching the algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostTable {
    /// Per app instance, per month.
    pub app_instance_monthly: f64,
    /// Flat monthly cost of an enabled cache.
    pub cache_base_monthly: f64,
    /// Per 1000 rps of cache capacity.
    pub cache_per_thousand_rps: f64,
    /// Flat monthly cost of an enabled database.
    pub db_base_monthly: f64,
    /// Per 100 qps of database capacity.
    pub db_per_hundred_qps: f64,
    pub replication_monthly: f64,
    pub partitioning_monthly: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            app_instance_monthly: 32.0,
            cache_base_monthly: 55.0,
            cache_per_thousand_rps: 18.0,
            db_base_monthly: 140.0,
            db_per_hundred_qps: 35.0,
            replication_monthly: 55.0,
            partitioning_monthly: 35.0,
        }
    }
}

impl CostTable {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pricing at {}", path.display()))?;
        let table: Self = parse_document(path, &raw)
            .with_context(|| format!("Failed to parse pricing at {}", path.display()))?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        let prices = [
            ("app_instance_monthly", self.app_instance_monthly),
            ("cache_base_monthly", self.cache_base_monthly),
            ("cache_per_thousand_rps", self.cache_per_thousand_rps),
            ("db_base_monthly", self.db_base_monthly),
            ("db_per_hundred_qps", self.db_per_hundred_qps),
            ("replication_monthly", self.replication_monthly),
            ("partitioning_monthly", self.partitioning_monthly),
        ];
        for (name, price) in prices {
            if !price.is_finite() || price < 0.0 {
                bail!("{name} must be a non-negative number, got {price}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_table_is_valid() {
        assert!(CostTable::default().validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let table = CostTable {
            db_base_monthly: -1.0,
            ..CostTable::default()
        };
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("db_base_monthly"));
    }

    #[test]
    fn test_load_pricing_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        let table = CostTable {
            app_instance_monthly: 40.0,
            ..CostTable::default()
        };
        file.write_all(serde_yaml::to_string(&table).unwrap().as_bytes())
            .unwrap();

        let loaded = CostTable::load_from_path(file.path()).unwrap();
        assert_eq!(loaded.app_instance_monthly, 40.0);
        assert_eq!(loaded.cache_base_monthly, 55.0);
    }
}
