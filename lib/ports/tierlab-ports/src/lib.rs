//! Collaborator interfaces the runtime depends on.

use std::sync::Arc;

use tierlab_domain::{ComponentId, ComponentInfo, CostTable, Preset};

pub trait PresetPort: Send + Sync {
    fn presets(&self) -> Vec<Preset>;

    fn preset(&self, key: &str) -> Option<Preset> {
        self.presets().into_iter().find(|preset| preset.key == key)
    }
}

pub trait ComponentInfoPort: Send + Sync {
    fn info(&self, id: ComponentId) -> Option<ComponentInfo>;
}

pub trait PricingPort: Send + Sync {
    fn cost_table(&self) -> CostTable;
}

#[derive(Clone)]
pub struct PortSet {
    pub presets: Arc<dyn PresetPort>,
    pub info: Arc<dyn ComponentInfoPort>,
    pub pricing: Arc<dyn PricingPort>,
}

impl PortSet {
    pub fn empty() -> Self {
        Self {
            presets: Arc::new(NullPresetPort),
            info: Arc::new(NullComponentInfoPort),
            pricing: Arc::new(DefaultPricingPort),
        }
    }
}

#[derive(Clone, Default)]
struct NullPresetPort;

impl PresetPort for NullPresetPort {
    fn presets(&self) -> Vec<Preset> {
        Vec::new()
    }
}

#[derive(Clone, Default)]
struct NullComponentInfoPort;

impl ComponentInfoPort for NullComponentInfoPort {
    fn info(&self, _id: ComponentId) -> Option<ComponentInfo> {
        None
    }
}

#[derive(Clone, Default)]
pub struct DefaultPricingPort;

impl PricingPort for DefaultPricingPort {
    fn cost_table(&self) -> CostTable {
        CostTable::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ports() {
        let ports = PortSet::empty();
        assert!(ports.presets.presets().is_empty());
        assert!(ports.presets.preset("baseline").is_none());
        assert!(ports.info.info(ComponentId::Db).is_none());
        assert_eq!(ports.pricing.cost_table(), CostTable::default());
    }
}
