use std::io::Write;

use tierlab::application::Runtime;
use tierlab::catalog::CatalogBackend;
use tierlab::domain::{ComponentId, SimConfig, SystemStatus, load_presets};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const LAB_PRESETS: &str = r#"
- key: lab
  name: Lab
  description: Small single-node setup.
  config:
    traffic: { rps: 120, read_ratio: 0.5, payload_kb: 4 }
    app: { instances: 1, rps_per_instance: 150, autoscale: false }
    cache: { enabled: false, base_hit_rate: 0.5, rps_capacity: 200 }
    db: { enabled: true, qps_capacity: 100, write_penalty: 1.2, replication: false, partitioning: false }
    base_latency_ms: 30
"#;

#[test]
fn test_preset_file_drives_runtime() {
    let presets = write_temp(".yaml", LAB_PRESETS);
    let backend = CatalogBackend::from_paths(Some(presets.path().to_path_buf()), None).unwrap();

    let runtime = Runtime::from_preset(backend.ports(), "lab").unwrap();
    let result = runtime.result();
    // 60 reads hit the database directly against a capacity of 100.
    assert_eq!(result.database.read_load, 60.0);
    assert_eq!(result.saturation.app, 0.8);
    assert_eq!(result.status, SystemStatus::Degraded);
    assert!(Runtime::from_preset(backend.ports(), "baseline").is_err());
}

#[test]
fn test_partial_preset_is_rejected() {
    let partial = write_temp(
        ".yaml",
        "- key: broken\n  name: Broken\n  description: Missing tiers\n  config:\n    traffic: { rps: 10, read_ratio: 0.5, payload_kb: 4 }\n",
    );
    assert!(load_presets(partial.path()).is_err());
    assert!(CatalogBackend::from_paths(Some(partial.path().to_path_buf()), None).is_err());
}

#[test]
fn test_json_config_round_trip() {
    let mut config = SimConfig::baseline();
    config.db.partitioning = true;
    let file = write_temp(".json", &serde_json::to_string_pretty(&config).unwrap());
    assert_eq!(SimConfig::load_from_path(file.path()).unwrap(), config);
}

#[test]
fn test_unknown_fields_are_rejected() {
    let file = write_temp(".json", r#"{"traffic": {"rps": 1}, "turbo": true}"#);
    let err = SimConfig::load_from_path(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config at"));
}

#[test]
fn test_pricing_file_changes_cost_only() {
    let pricing = write_temp(
        ".yaml",
        "app_instance_monthly: 0\ncache_base_monthly: 0\ncache_per_thousand_rps: 0\n\
         db_base_monthly: 0\ndb_per_hundred_qps: 0\nreplication_monthly: 0\npartitioning_monthly: 0\n",
    );
    let backend = CatalogBackend::from_paths(None, Some(pricing.path().to_path_buf())).unwrap();
    let runtime = Runtime::from_preset(backend.ports(), "baseline").unwrap();
    let reference = Runtime::default();

    assert_eq!(runtime.result().cost.monthly_total, 0.0);
    assert_eq!(runtime.result().latency, reference.result().latency);
    assert_eq!(runtime.result().saturation, reference.result().saturation);
    assert!(backend.ports().info.info(ComponentId::LatencySection).is_some());
}
