//! Configuration snapshot consumed by the evaluation model.
//!
//! Every field carries a documented range, but the model clamps rather than
//! trusts them. Loading from disk is the only place malformed input is
//! rejected.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    pub traffic: TrafficConfig,
    pub app: AppTierConfig,
    pub cache: CacheConfig,
    pub db: DatabaseConfig,
    /// Network + serialization floor in milliseconds (>= 0).
    pub base_latency_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrafficConfig {
    /// Total requests per second (>= 0).
    pub rps: f64,
    /// Share of requests that are reads (0..1).
    pub read_ratio: f64,
    /// Average payload size in KB.
    pub payload_kb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppTierConfig {
    /// Instance count (>= 1).
    pub instances: u32,
    /// Requests per second a single instance sustains (>= 1).
    pub rps_per_instance: f64,
    pub autoscale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Hit rate before payload and saturation penalties (0..0.95).
    pub base_hit_rate: f64,
    /// Read throughput the cache sustains (>= 1).
    pub rps_capacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub enabled: bool,
    /// Combined read + write throughput (>= 1).
    pub qps_capacity: f64,
    /// Latency multiplier applied to writes (>= 1).
    pub write_penalty: f64,
    /// Read replicas; boosts read capacity.
    pub replication: bool,
    /// Sharding; boosts write capacity.
    pub partitioning: bool,
}

impl SimConfig {
    /// Balanced workload with cache and DB replication.
    pub fn baseline() -> Self {
        Self {
            traffic: TrafficConfig {
                rps: 250.0,
                read_ratio: 0.8,
                payload_kb: 12.0,
            },
            app: AppTierConfig {
                instances: 4,
                rps_per_instance: 120.0,
                autoscale: true,
            },
            cache: CacheConfig {
                enabled: true,
                base_hit_rate: 0.72,
                rps_capacity: 800.0,
            },
            db: DatabaseConfig {
                enabled: true,
                qps_capacity: 280.0,
                write_penalty: 1.35,
                replication: true,
                partitioning: false,
            },
            base_latency_ms: 55.0,
        }
    }

    /// Reads a complete configuration from YAML or JSON, chosen by extension.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = parse_document(path, &raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(config)
    }

    /// Rejects values that are not numbers at all. Range violations are left
    /// for the model to clamp.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("traffic.rps", self.traffic.rps),
            ("traffic.read_ratio", self.traffic.read_ratio),
            ("traffic.payload_kb", self.traffic.payload_kb),
            ("app.rps_per_instance", self.app.rps_per_instance),
            ("cache.base_hit_rate", self.cache.base_hit_rate),
            ("cache.rps_capacity", self.cache.rps_capacity),
            ("db.qps_capacity", self.db.qps_capacity),
            ("db.write_penalty", self.db.write_penalty),
            ("base_latency_ms", self.base_latency_ms),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                bail!("{name} must be a finite number, got {value}");
            }
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Shared YAML/JSON dispatch for the file-backed records in this crate.
pub fn parse_document<T>(path: &Path, raw: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("json") => Ok(serde_json::from_str(raw)?),
        Some("yaml") | Some("yml") | None => Ok(serde_yaml::from_str(raw)?),
        Some(other) => bail!("Unsupported config format: .{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_config() {
        let yaml = serde_yaml::to_string(&SimConfig::baseline()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = SimConfig::load_from_path(file.path()).unwrap();
        assert_eq!(loaded, SimConfig::baseline());
    }

    #[test]
    fn test_load_json_config() {
        let json = serde_json::to_string(&SimConfig::baseline()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = SimConfig::load_from_path(file.path()).unwrap();
        assert_eq!(loaded.traffic.rps, 250.0);
    }

    #[test]
    fn test_partial_config_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"traffic:\n  rps: 100\n  read_ratio: 0.5\n  payload_kb: 4\n")
            .unwrap();

        let err = SimConfig::load_from_path(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut value = serde_json::to_value(SimConfig::baseline()).unwrap();
        value["traffic"]["burstiness"] = serde_json::json!(2.0);
        let raw = value.to_string();

        let parsed: Result<SimConfig> = parse_document(Path::new("config.json"), &raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("traffic.rps"));

        config.traffic.rps = 10.0;
        config.db.write_penalty = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_values_pass_validation() {
        let mut config = SimConfig::baseline();
        config.traffic.rps = -40.0;
        config.traffic.read_ratio = 3.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unsupported_extension() {
        let parsed: Result<SimConfig> = parse_document(Path::new("config.toml"), "");
        assert!(parsed.unwrap_err().to_string().contains(".toml"));
    }
}
