use serde::{Deserialize, Serialize};

/// The four dashboard tabs. `Overview` shows everything; the other three are
/// the inventory health buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    #[serde(rename = "overview")]
    Overview,
    #[serde(rename = "excess")]
    Excess,
    #[serde(rename = "lowStock")]
    LowStock,
    #[serde(rename = "deadStock")]
    DeadStock,
}

impl TabKind {
    pub const ALL: [TabKind; 4] = [
        TabKind::Overview,
        TabKind::Excess,
        TabKind::LowStock,
        TabKind::DeadStock,
    ];

    /// Key under which the server's `summaries` object carries this tab.
    pub fn wire_key(self) -> &'static str {
        match self {
            TabKind::Overview => "overview",
            TabKind::Excess => "excess",
            TabKind::LowStock => "lowStock",
            TabKind::DeadStock => "deadStock",
        }
    }

    /// Value of the `status` query parameter for this tab; the overview tab
    /// sends no status filter.
    pub fn status_param(self) -> Option<&'static str> {
        match self {
            TabKind::Overview => None,
            TabKind::Excess => Some("excess"),
            TabKind::LowStock => Some("low"),
            TabKind::DeadStock => Some("dead"),
        }
    }

    /// Whether an item with the given status string falls into this tab.
    pub fn matches_status(self, status: &str) -> bool {
        match self {
            TabKind::Overview => true,
            _ => ItemStatus::parse(status) == self.bucket_status(),
        }
    }

    fn bucket_status(self) -> ItemStatus {
        match self {
            TabKind::Overview => ItemStatus::Optimal,
            TabKind::Excess => ItemStatus::Excess,
            TabKind::LowStock => ItemStatus::Low,
            TabKind::DeadStock => ItemStatus::Dead,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TabKind::Overview => "Overview",
            TabKind::Excess => "Excess",
            TabKind::LowStock => "Low Stock",
            TabKind::DeadStock => "Dead Stock",
        }
    }
}

impl Default for TabKind {
    fn default() -> Self {
        TabKind::Overview
    }
}

/// Inventory health classification of a single item. The wire carries it as a
/// plain string; anything unrecognized counts as optimal stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Excess,
    Low,
    Dead,
    Optimal,
}

impl ItemStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "excess" => ItemStatus::Excess,
            "low" => ItemStatus::Low,
            "dead" => ItemStatus::Dead,
            _ => ItemStatus::Optimal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Excess => "excess",
            ItemStatus::Low => "low",
            ItemStatus::Dead => "dead",
            ItemStatus::Optimal => "optimal",
        }
    }
}

/// Aggregate figures for one tab. Recomputed every fetch cycle, either from
/// server aggregates or from a client-side reduction over the returned page
/// when a search narrows the result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSummary {
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub total_quantity: i64,
    #[serde(default)]
    pub branch_count: i64,
    #[serde(default)]
    pub entity_count: i64,
    #[serde(default)]
    pub inventory_turnover: f64,
}

/// One `TabSummary` per dashboard tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSummaries {
    #[serde(default)]
    pub overview: TabSummary,
    #[serde(default)]
    pub excess: TabSummary,
    #[serde(default)]
    pub low_stock: TabSummary,
    #[serde(default)]
    pub dead_stock: TabSummary,
}

impl TabSummaries {
    pub fn get(&self, tab: TabKind) -> &TabSummary {
        match tab {
            TabKind::Overview => &self.overview,
            TabKind::Excess => &self.excess,
            TabKind::LowStock => &self.low_stock,
            TabKind::DeadStock => &self.dead_stock,
        }
    }

    pub fn get_mut(&mut self, tab: TabKind) -> &mut TabSummary {
        match tab {
            TabKind::Overview => &mut self.overview,
            TabKind::Excess => &mut self.excess,
            TabKind::LowStock => &mut self.low_stock,
            TabKind::DeadStock => &mut self.dead_stock,
        }
    }
}

/// Headline metrics shown above the tabs, from the aggregate metrics
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[serde(default, rename = "totalSKUs")]
    pub total_skus: i64,
    #[serde(default)]
    pub excess_items: i64,
    #[serde(default)]
    pub low_stock_items: i64,
    #[serde(default)]
    pub dead_stock_items: i64,
    #[serde(default)]
    pub total_inventory_value: f64,
    #[serde(default)]
    pub inventory_turnover: f64,
    #[serde(default)]
    pub entity_count: i64,
    #[serde(default)]
    pub branch_count: i64,
}

/// SKU counts rendered on the tab labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCounts {
    #[serde(default)]
    pub overview: i64,
    #[serde(default)]
    pub excess: i64,
    #[serde(default)]
    pub low_stock: i64,
    #[serde(default)]
    pub dead_stock: i64,
}

impl FilterCounts {
    pub fn get(&self, tab: TabKind) -> i64 {
        match tab {
            TabKind::Overview => self.overview,
            TabKind::Excess => self.excess,
            TabKind::LowStock => self.low_stock,
            TabKind::DeadStock => self.dead_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_param_mapping() {
        assert_eq!(TabKind::Overview.status_param(), None);
        assert_eq!(TabKind::Excess.status_param(), Some("excess"));
        assert_eq!(TabKind::LowStock.status_param(), Some("low"));
        assert_eq!(TabKind::DeadStock.status_param(), Some("dead"));
    }

    #[test]
    fn test_matches_status() {
        assert!(TabKind::Overview.matches_status("excess"));
        assert!(TabKind::Overview.matches_status("anything"));
        assert!(TabKind::Excess.matches_status("excess"));
        assert!(!TabKind::Excess.matches_status("low"));
        assert!(TabKind::LowStock.matches_status("low"));
        assert!(TabKind::DeadStock.matches_status("dead"));
        assert!(!TabKind::DeadStock.matches_status("optimal"));
    }

    #[test]
    fn test_item_status_parse_unknown_is_optimal() {
        assert_eq!(ItemStatus::parse("excess"), ItemStatus::Excess);
        assert_eq!(ItemStatus::parse(""), ItemStatus::Optimal);
        assert_eq!(ItemStatus::parse("EXCESS"), ItemStatus::Optimal);
    }

    #[test]
    fn test_tab_kind_serde_uses_wire_keys() {
        let json = serde_json::to_string(&TabKind::LowStock).unwrap();
        assert_eq!(json, "\"lowStock\"");
        let back: TabKind = serde_json::from_str("\"deadStock\"").unwrap();
        assert_eq!(back, TabKind::DeadStock);
    }
}
