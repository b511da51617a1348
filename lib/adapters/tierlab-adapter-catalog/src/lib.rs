//! Catalogue adapters: presets, component reference text and pricing,
//! either built in or loaded from disk.

mod component_info;
mod presets;
mod pricing;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use tierlab_ports::{DefaultPricingPort, PortSet, PresetPort, PricingPort};

pub use component_info::{StaticComponentInfo, component_info};
pub use presets::{BuiltinPresets, FilePresets, builtin_presets};
pub use pricing::FilePricing;

pub const PRESETS_PATH_ENV: &str = "TIERLAB_PRESETS_PATH";
pub const PRICING_PATH_ENV: &str = "TIERLAB_PRICING_PATH";

/// Ports backed by the built-in catalogue.
pub fn builtin_ports() -> PortSet {
    PortSet {
        presets: Arc::new(BuiltinPresets),
        info: Arc::new(StaticComponentInfo),
        pricing: Arc::new(DefaultPricingPort),
    }
}

pub struct CatalogBackend {
    pub presets_path: Option<PathBuf>,
    pub pricing_path: Option<PathBuf>,
    ports: PortSet,
}

impl CatalogBackend {
    pub fn from_env() -> Result<Self> {
        let presets_path = std::env::var(PRESETS_PATH_ENV).map(PathBuf::from).ok();
        let pricing_path = std::env::var(PRICING_PATH_ENV).map(PathBuf::from).ok();
        Self::from_paths(presets_path, pricing_path)
    }

    /// Missing paths fall back to the built-in catalogue.
    pub fn from_paths(
        presets_path: Option<PathBuf>,
        pricing_path: Option<PathBuf>,
    ) -> Result<Self> {
        let presets: Arc<dyn PresetPort> = match &presets_path {
            Some(path) => Arc::new(
                FilePresets::load(path)
                    .with_context(|| format!("Failed to load presets at {}", path.display()))?,
            ),
            None => Arc::new(BuiltinPresets),
        };
        let pricing: Arc<dyn PricingPort> = match &pricing_path {
            Some(path) => Arc::new(
                FilePricing::load(path)
                    .with_context(|| format!("Failed to load pricing at {}", path.display()))?,
            ),
            None => Arc::new(DefaultPricingPort),
        };
        let ports = PortSet {
            presets,
            info: Arc::new(StaticComponentInfo),
            pricing,
        };

        Ok(Self {
            presets_path,
            pricing_path,
            ports,
        })
    }

    pub fn ports(&self) -> PortSet {
        self.ports.clone()
    }
}
