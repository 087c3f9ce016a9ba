use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `GET /entities`: the entity list plus the branches each
/// entity owns. Drives the filter dropdowns and the advanced filter panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCatalog {
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub entity_branches: HashMap<String, Vec<String>>,
}

impl EntityCatalog {
    pub fn branches_for(&self, entity: &str) -> &[String] {
        self.entity_branches
            .get(entity)
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }
}

/// Response of `GET /part-branch-summary`: for each part number, the branches
/// stocking it. Fetched once after entities load and used only for
/// multi-branch enrichment.
pub type PartBranchMap = HashMap<String, Vec<String>>;
