//! Builds the evaluation session a command works on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use tierlab_application::Runtime;
use tierlab_domain::{Knob, SimConfig};
use tierlab_ports::PortSet;

pub const CONFIG_PATH_ENV: &str = "TIERLAB_CONFIG_PATH";
pub const DEFAULT_PRESET: &str = "baseline";

/// Where the starting configuration comes from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSource {
    pub preset: Option<String>,
    pub config_path: Option<PathBuf>,
    pub overrides: Vec<(Knob, f64)>,
}

impl ConfigSource {
    /// Falls back to `env_config_path` only when neither a preset nor a
    /// config file was requested explicitly.
    pub fn with_env_fallback(mut self, env_config_path: Option<PathBuf>) -> Self {
        if self.preset.is_none() && self.config_path.is_none() {
            self.config_path = env_config_path;
        }
        self
    }
}

pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Starts a runtime from a config file, a named preset, or the baseline,
/// then applies the knob overrides in order.
pub fn start_session(ports: PortSet, source: &ConfigSource) -> Result<Runtime> {
    let mut runtime = match (&source.preset, &source.config_path) {
        (Some(_), Some(_)) => bail!("Use either --preset or --config, not both"),
        (None, Some(path)) => Runtime::new_with_ports(load_config(path)?, ports),
        (Some(key), None) => Runtime::from_preset(ports, key)?,
        (None, None) => {
            if ports.presets.preset(DEFAULT_PRESET).is_some() {
                Runtime::from_preset(ports, DEFAULT_PRESET)?
            } else {
                debug!("no {DEFAULT_PRESET} preset in catalogue, using built-in baseline");
                Runtime::new_with_ports(SimConfig::baseline(), ports)
            }
        }
    };

    for &(knob, value) in &source.overrides {
        runtime.set_knob(knob, value);
    }
    Ok(runtime)
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let config = SimConfig::load_from_path(path)
        .with_context(|| format!("Failed to load configuration at {}", path.display()))?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}
