use std::path::Path;

use anyhow::Result;
use tracing::info;

use tierlab_domain::{Preset, SimConfig, load_presets};
use tierlab_ports::PresetPort;

/// The curated presets shipped with the binary.
#[derive(Clone, Default)]
pub struct BuiltinPresets;

impl PresetPort for BuiltinPresets {
    fn presets(&self) -> Vec<Preset> {
        builtin_presets()
    }
}

/// Presets read from a YAML/JSON file, replacing the built-in set.
#[derive(Clone)]
pub struct FilePresets {
    presets: Vec<Preset>,
}

impl FilePresets {
    pub fn load(path: &Path) -> Result<Self> {
        let presets = load_presets(path)?;
        info!(path = %path.display(), count = presets.len(), "loaded presets");
        Ok(Self { presets })
    }
}

impl PresetPort for FilePresets {
    fn presets(&self) -> Vec<Preset> {
        self.presets.clone()
    }
}

pub fn builtin_presets() -> Vec<Preset> {
    let base = SimConfig::baseline();

    let mut read_heavy = base.clone();
    read_heavy.traffic.rps = 500.0;
    read_heavy.traffic.read_ratio = 0.92;
    read_heavy.cache.base_hit_rate = 0.82;
    read_heavy.app.instances = 6;
    read_heavy.db.qps_capacity = 320.0;

    let mut write_heavy = base.clone();
    write_heavy.traffic.rps = 380.0;
    write_heavy.traffic.read_ratio = 0.45;
    write_heavy.cache.base_hit_rate = 0.55;
    write_heavy.db.write_penalty = 1.65;
    write_heavy.db.partitioning = true;
    write_heavy.app.instances = 6;
    write_heavy.db.qps_capacity = 320.0;

    let mut spiky = base.clone();
    spiky.traffic.rps = 820.0;
    spiky.traffic.read_ratio = 0.75;
    spiky.app.instances = 5;
    spiky.cache.base_hit_rate = 0.68;
    spiky.cache.rps_capacity = 650.0;
    spiky.db.qps_capacity = 320.0;

    let mut high_scale = base.clone();
    high_scale.traffic.rps = 1200.0;
    high_scale.traffic.read_ratio = 0.86;
    high_scale.app.instances = 14;
    high_scale.cache.rps_capacity = 2500.0;
    high_scale.db.qps_capacity = 650.0;
    high_scale.db.replication = true;
    high_scale.db.partitioning = true;
    high_scale.base_latency_ms = 48.0;

    vec![
        Preset::new(
            "baseline",
            "Baseline",
            "Balanced workload with cache + DB replication.",
            base,
        ),
        Preset::new(
            "read_heavy",
            "Read-heavy",
            "High read ratio; cache helps a lot.",
            read_heavy,
        ),
        Preset::new(
            "write_heavy",
            "Write-heavy",
            "Writes stress DB; partitioning helps.",
            write_heavy,
        ),
        Preset::new(
            "spiky_traffic",
            "Spiky traffic",
            "Short bursts exceed capacity; errors rise quickly.",
            spiky,
        ),
        Preset::new(
            "high_scale",
            "High scale",
            "Scaled out app + cache; DB kept stable.",
            high_scale,
        ),
    ]
}
