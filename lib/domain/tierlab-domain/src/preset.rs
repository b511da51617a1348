//! Named, complete configuration bundles.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::{SimConfig, parse_document};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Stable lookup key, e.g. `read_heavy`.
    pub key: String,
    pub name: String,
    pub description: String,
    /// A preset always carries every field; partial bundles fail to parse.
    pub config: SimConfig,
}

impl Preset {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        config: SimConfig,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            config,
        }
    }
}

/// Loads a preset list and checks keys are unique and configs are numeric.
pub fn load_presets(path: &Path) -> Result<Vec<Preset>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read presets at {}", path.display()))?;
    let presets: Vec<Preset> = parse_document(path, &raw)
        .with_context(|| format!("Failed to parse presets at {}", path.display()))?;

    let mut seen = BTreeSet::new();
    for preset in &presets {
        if !seen.insert(preset.key.as_str()) {
            bail!("Duplicate preset key: {}", preset.key);
        }
        preset
            .config
            .validate()
            .with_context(|| format!("Invalid preset: {}", preset.key))?;
    }
    Ok(presets)
}
