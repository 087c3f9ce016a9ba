//! Normalization adapter at the API boundary.
//!
//! The aggregate endpoints drifted between snake_case and camelCase field
//! names over time, and some spellings exist only in older deployments.
//! This module is the one place that resolves that variance: raw JSON goes
//! in, canonical `contracts` types come out, and the rest of the pipeline
//! never probes alternate spellings again.
//!
//! A zero aggregate is indistinguishable from an endpoint that omitted the
//! field, so probes treat both as absent and let the caller's fallback
//! chain decide.

use serde_json::Value;

use contracts::inventory::item::{InventoryItem, InventoryPage};
use contracts::inventory::summary::{DashboardMetrics, TabKind};

fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| value.get(k))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// First key that holds a non-zero number.
fn num_opt(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|k| value.get(k).and_then(as_number))
        .find(|n| *n != 0.0)
}

fn num(value: &Value, keys: &[&str]) -> f64 {
    num_opt(value, keys).unwrap_or(0.0)
}

fn int(value: &Value, keys: &[&str]) -> i64 {
    num(value, keys) as i64
}

fn text(value: &Value, keys: &[&str]) -> String {
    text_opt(value, keys).unwrap_or_default()
}

fn text_opt(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| value.get(k))
        .find_map(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Build one canonical inventory row from a raw JSON object.
pub fn item_from_value(value: &Value) -> InventoryItem {
    InventoryItem {
        id: int(value, &["id"]),
        entity: text(value, &["entity"]),
        branch: text(value, &["branch"]),
        part_number: text(value, &["partNumber", "part_number"]),
        mfg_name: text(value, &["mfgName", "mfg_name"]),
        mfg_part_number: text(value, &["mfgPartNumber", "mfg_part_number"]),
        description: text(value, &["description"]),
        family: text_opt(value, &["family"]),
        category: text_opt(value, &["category"]),
        inventory_balance: num(value, &["inventoryBalance", "inventory_balance"]),
        quantity_on_hand: int(value, &["quantityOnHand", "quantity_on_hand"]),
        average_cost: num(value, &["averageCost", "average_cost"]),
        latest_cost: num(value, &["latestCost", "latest_cost"]),
        quantity_on_order: int(value, &["quantityOnOrder", "quantity_on_order"]),
        t3m_qty_used: int(value, &["t3mQtyUsed", "t3m_qty_used"]),
        t6m_qty_used: int(value, &["t6mQtyUsed", "t6m_qty_used"]),
        ttm_qty_used: int(value, &["ttmQtyUsed", "ttm_qty_used"]),
        months_of_coverage: num(value, &["monthsOfCoverage", "months_of_coverage"]),
        last_receipt: text_opt(value, &["lastReceipt", "last_receipt"]),
        status: text(value, &["status"]),
        company_status: text_opt(value, &["companyStatus", "company_status"]),
        multi_branch: false,
        branch_count: 0,
    }
}

/// Build an inventory page from a raw response body. Missing or
/// non-array `items` yields an empty page rather than an error.
pub fn page_from_value(value: &Value) -> InventoryPage {
    let items = value
        .get("items")
        .and_then(|v| v.as_array())
        .map(|rows| rows.iter().map(item_from_value).collect())
        .unwrap_or_default();
    InventoryPage {
        items,
        total_count: int(value, &["totalCount", "total_count"]),
    }
}

fn array_len(value: &Value, key: &str) -> Option<f64> {
    let len = value.get(key)?.as_array()?.len();
    if len == 0 {
        None
    } else {
        Some(len as f64)
    }
}

fn overview_summary<'a>(value: &'a Value) -> Option<&'a Value> {
    value.get("summaries")?.get(TabKind::Overview.wire_key())
}

/// Canonical dashboard metrics from any of the metrics endpoints.
///
/// The advanced variant carries no flat value/turnover fields; those live
/// under `summaries.overview` and are promoted here so callers see one
/// shape. `prior_entity_count` backstops deployments that omit the count.
pub fn metrics_from_value(value: &Value, prior_entity_count: i64) -> DashboardMetrics {
    let overview = overview_summary(value);

    let total_inventory_value = num_opt(value, &["totalInventoryValue", "total_inventory_value"])
        .or_else(|| overview.and_then(|o| num_opt(o, &["totalValue", "total_value"])))
        .unwrap_or(0.0);

    let inventory_turnover = num_opt(
        value,
        &["inventoryTurnover", "inventory_turnover", "inventoryTurns"],
    )
    .or_else(|| overview.and_then(|o| num_opt(o, &["inventoryTurnover", "inventory_turnover"])))
    .unwrap_or(0.0);

    let entity_count = num_opt(value, &["entityCount", "entity_count"])
        .or_else(|| array_len(value, "entities_in_result"))
        .or_else(|| overview.and_then(|o| num_opt(o, &["entityCount", "entity_count"])))
        .map(|n| n as i64)
        .unwrap_or(prior_entity_count);

    let branch_count = num_opt(value, &["branchCount", "branch_count"])
        .or_else(|| array_len(value, "branches_in_result"))
        .or_else(|| overview.and_then(|o| num_opt(o, &["branchCount", "branch_count"])))
        .map(|n| n as i64)
        .unwrap_or(0);

    DashboardMetrics {
        total_skus: int(value, &["totalSKUs", "total_skus"]),
        excess_items: int(value, &["excessItems", "excess_items"]),
        low_stock_items: int(value, &["lowStockItems", "low_stock_items"]),
        dead_stock_items: int(value, &["deadStockItems", "dead_stock_items"]),
        total_inventory_value,
        inventory_turnover,
        entity_count,
        branch_count,
    }
}

/// Per-tab summary fields as the payload reported them. `None` means the
/// field was missing (or zero); the reconciler applies the fallback chain.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryProbe {
    pub total_value: Option<f64>,
    pub total_quantity: Option<f64>,
    pub branch_count: Option<f64>,
    pub entity_count: Option<f64>,
    pub inventory_turnover: Option<f64>,
}

/// Probe `payload.summaries[tab]` for aggregate figures.
pub fn summary_probe(payload: &Value, tab: TabKind) -> SummaryProbe {
    let Some(summary) = payload.get("summaries").and_then(|s| s.get(tab.wire_key())) else {
        return SummaryProbe::default();
    };
    SummaryProbe {
        total_value: num_opt(summary, &["totalValue", "total_value"]),
        total_quantity: num_opt(
            summary,
            &["totalQuantity", "sumOfQuantityOnHand", "total_quantity"],
        ),
        branch_count: num_opt(summary, &["branchCount", "branch_count"]),
        entity_count: num_opt(summary, &["entityCount", "entity_count"]),
        inventory_turnover: num_opt(summary, &["inventoryTurnover", "inventory_turnover"]),
    }
}

/// Probe a payload for the SKU count behind one tab badge.
///
/// Works against both the filter-counts body (`overviewItems`/`totalItems`)
/// and the advanced metrics body (`totalSKUs`).
pub fn count_probe(payload: &Value, tab: TabKind) -> Option<i64> {
    let keys: &[&str] = match tab {
        TabKind::Overview => &[
            "overviewItems",
            "totalItems",
            "total_items",
            "totalSKUs",
            "total_skus",
        ],
        TabKind::Excess => &["excessItems", "excess_items"],
        TabKind::LowStock => &["lowStockItems", "low_stock_items"],
        TabKind::DeadStock => &["deadStockItems", "dead_stock_items"],
    };
    num_opt(payload, keys).map(|n| n as i64)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_item_tolerates_both_spellings() {
        let camel = json!({
            "partNumber": "P-100",
            "quantityOnHand": 12,
            "inventoryBalance": 340.5,
            "ttmQtyUsed": 48,
            "status": "excess"
        });
        let item = item_from_value(&camel);
        assert_eq!(item.part_number, "P-100");
        assert_eq!(item.quantity_on_hand, 12);
        assert_eq!(item.inventory_balance, 340.5);
        assert_eq!(item.ttm_qty_used, 48);

        let snake = json!({
            "part_number": "P-100",
            "quantity_on_hand": 12,
            "inventory_balance": 340.5
        });
        let item = item_from_value(&snake);
        assert_eq!(item.part_number, "P-100");
        assert_eq!(item.quantity_on_hand, 12);
        assert_eq!(item.inventory_balance, 340.5);
    }

    #[test]
    fn test_item_defaults_never_panic() {
        let item = item_from_value(&json!({}));
        assert_eq!(item.part_number, "");
        assert_eq!(item.quantity_on_hand, 0);
        assert_eq!(item.inventory_balance, 0.0);
        assert_eq!(item.last_receipt, None);

        // scalars and nulls instead of an object
        let _ = item_from_value(&json!(null));
        let _ = item_from_value(&json!([1, 2, 3]));
        let _ = item_from_value(&json!("text"));
    }

    #[test]
    fn test_page_from_value_handles_missing_items() {
        let page = page_from_value(&json!({"totalCount": 7}));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 7);

        let page = page_from_value(&json!({"items": "not-an-array"}));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);

        let page = page_from_value(&json!({"items": [{"partNumber": "A"}], "total_count": 1}));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn test_metrics_resolves_field_variants() {
        let camel = json!({
            "totalSKUs": 1200,
            "excessItems": 300,
            "totalInventoryValue": 5_000_000.0,
            "inventoryTurnover": 1.8,
            "entityCount": 4,
            "branchCount": 12
        });
        let m = metrics_from_value(&camel, 0);
        assert_eq!(m.total_skus, 1200);
        assert_eq!(m.excess_items, 300);
        assert_eq!(m.total_inventory_value, 5_000_000.0);
        assert_eq!(m.inventory_turnover, 1.8);
        assert_eq!(m.entity_count, 4);
        assert_eq!(m.branch_count, 12);

        let snake = json!({
            "total_skus": 1200,
            "total_inventory_value": 5_000_000.0,
            "inventoryTurns": 1.8
        });
        let m = metrics_from_value(&snake, 0);
        assert_eq!(m.total_skus, 1200);
        assert_eq!(m.total_inventory_value, 5_000_000.0);
        assert_eq!(m.inventory_turnover, 1.8);
    }

    #[test]
    fn test_metrics_promotes_advanced_overview_summary() {
        let advanced = json!({
            "totalSKUs": 90,
            "excessItems": 25,
            "summaries": {
                "overview": {
                    "totalValue": 42_000.0,
                    "totalQuantity": 900,
                    "inventoryTurnover": 2.1,
                    "entityCount": 2,
                    "branchCount": 5
                }
            },
            "entities_in_result": ["East", "West"],
            "branches_in_result": ["B01", "B02", "B03", "B04", "B05"]
        });
        let m = metrics_from_value(&advanced, 0);
        assert_eq!(m.total_inventory_value, 42_000.0);
        assert_eq!(m.inventory_turnover, 2.1);
        assert_eq!(m.entity_count, 2);
        assert_eq!(m.branch_count, 5);
    }

    #[test]
    fn test_metrics_entity_count_falls_back_to_prior() {
        let m = metrics_from_value(&json!({}), 6);
        assert_eq!(m.entity_count, 6);
        assert_eq!(m.total_skus, 0);
        assert_eq!(m.total_inventory_value, 0.0);
    }

    #[test]
    fn test_summary_probe_reads_quantity_variants() {
        let payload = json!({
            "summaries": {
                "excess": {
                    "totalValue": 100.0,
                    "sumOfQuantityOnHand": 40,
                    "branchCount": 3
                }
            }
        });
        let probe = summary_probe(&payload, TabKind::Excess);
        assert_eq!(probe.total_value, Some(100.0));
        assert_eq!(probe.total_quantity, Some(40.0));
        assert_eq!(probe.branch_count, Some(3.0));
        assert_eq!(probe.entity_count, None);

        // zero reads as absent so fallbacks can engage
        let zeroed = json!({"summaries": {"excess": {"totalValue": 0}}});
        assert_eq!(summary_probe(&zeroed, TabKind::Excess).total_value, None);

        assert_eq!(summary_probe(&json!({}), TabKind::Overview), SummaryProbe::default());
    }

    #[test]
    fn test_count_probe_key_sets() {
        let fc = json!({
            "totalItems": 800,
            "excessItems": 120,
            "lowStockItems": 60,
            "deadStockItems": 20
        });
        assert_eq!(count_probe(&fc, TabKind::Overview), Some(800));
        assert_eq!(count_probe(&fc, TabKind::Excess), Some(120));
        assert_eq!(count_probe(&fc, TabKind::LowStock), Some(60));
        assert_eq!(count_probe(&fc, TabKind::DeadStock), Some(20));

        let advanced = json!({"totalSKUs": 90, "excessItems": 25});
        assert_eq!(count_probe(&advanced, TabKind::Overview), Some(90));
        assert_eq!(count_probe(&advanced, TabKind::Excess), Some(25));
        assert_eq!(count_probe(&advanced, TabKind::LowStock), None);
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let item = item_from_value(&json!({"quantityOnHand": "15", "averageCost": "2.5"}));
        assert_eq!(item.quantity_on_hand, 15);
        assert_eq!(item.average_cost, 2.5);
    }
}
