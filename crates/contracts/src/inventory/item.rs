use serde::{Deserialize, Serialize};

/// One SKU-at-a-branch inventory record.
///
/// This is the canonical internal shape. The server sends camelCase fields;
/// rows coming through the dashboard fetch cycle are built by the frontend
/// normalization adapter, which also tolerates snake_case spellings, while
/// strictly-typed endpoints (part details) deserialize directly.
///
/// `multi_branch` / `branch_count` are not wire fields: enrichment fills them
/// in after the fetch from the global part-branch map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub mfg_name: String,
    #[serde(default)]
    pub mfg_part_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub inventory_balance: f64,
    #[serde(default)]
    pub quantity_on_hand: i64,
    #[serde(default)]
    pub average_cost: f64,
    #[serde(default)]
    pub latest_cost: f64,
    #[serde(default)]
    pub quantity_on_order: i64,
    #[serde(default)]
    pub t3m_qty_used: i64,
    #[serde(default)]
    pub t6m_qty_used: i64,
    #[serde(default)]
    pub ttm_qty_used: i64,
    #[serde(default)]
    pub months_of_coverage: f64,
    #[serde(default)]
    pub last_receipt: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub company_status: Option<String>,
    #[serde(default)]
    pub multi_branch: bool,
    #[serde(default)]
    pub branch_count: usize,
}

impl Default for InventoryItem {
    fn default() -> Self {
        Self {
            id: 0,
            entity: String::new(),
            branch: String::new(),
            part_number: String::new(),
            mfg_name: String::new(),
            mfg_part_number: String::new(),
            description: String::new(),
            family: None,
            category: None,
            inventory_balance: 0.0,
            quantity_on_hand: 0,
            average_cost: 0.0,
            latest_cost: 0.0,
            quantity_on_order: 0,
            t3m_qty_used: 0,
            t6m_qty_used: 0,
            ttm_qty_used: 0,
            months_of_coverage: 0.0,
            last_receipt: None,
            status: String::new(),
            company_status: None,
            multi_branch: false,
            branch_count: 0,
        }
    }
}

/// One page of the paginated inventory listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPage {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    #[serde(default)]
    pub total_count: i64,
}
