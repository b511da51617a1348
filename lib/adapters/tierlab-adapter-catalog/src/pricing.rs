use std::path::Path;

use anyhow::Result;
use tracing::info;

use tierlab_domain::CostTable;
use tierlab_ports::PricingPort;

/// Pricing loaded from a YAML/JSON file.
#[derive(Clone)]
pub struct FilePricing {
    table: CostTable,
}

impl FilePricing {
    pub fn load(path: &Path) -> Result<Self> {
        let table = CostTable::load_from_path(path)?;
        info!(path = %path.display(), "loaded pricing table");
        Ok(Self { table })
    }
}

impl PricingPort for FilePricing {
    fn cost_table(&self) -> CostTable {
        self.table.clone()
    }
}
