//! Merges the 2-3 payloads of one fetch cycle into a single view model.
//!
//! The inventory page, the metrics aggregate and the filter-counts summary
//! come from different endpoints with different notions of scope. This
//! module owns the fallback chain that turns them into one consistent set
//! of per-tab figures, and the search override that recomputes aggregates
//! from the returned rows when a search narrows the corpus.

use serde_json::Value;
use std::collections::HashSet;

use contracts::inventory::catalog::PartBranchMap;
use contracts::inventory::item::InventoryItem;
use contracts::inventory::summary::{
    DashboardMetrics, FilterCounts, TabKind, TabSummaries, TabSummary,
};

use super::enrich;
use super::normalize;

/// Everything the dashboard renders for one fetch cycle.
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    pub items: Vec<InventoryItem>,
    /// Pagination drives off this count, never off metrics figures.
    pub total_inventory_count: i64,
    pub metrics: DashboardMetrics,
    pub tab_summaries: TabSummaries,
    pub filter_counts: FilterCounts,
}

impl ViewModel {
    /// The cleared state shown after a failed cycle. Nothing stale survives.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Merge one cycle's payloads.
///
/// `filter_counts` is `None` for the advanced strategy, where the metrics
/// payload carries the summaries and counts. Never panics on malformed
/// input; every missing field lands on the fallback chain.
pub fn reconcile(
    inventory: &Value,
    metrics_payload: &Value,
    filter_counts: Option<&Value>,
    prior_entity_count: i64,
    search: &str,
    part_branch_map: &PartBranchMap,
) -> ViewModel {
    let page = normalize::page_from_value(inventory);
    let items = enrich::enrich_items(page.items, part_branch_map);
    let metrics = normalize::metrics_from_value(metrics_payload, prior_entity_count);
    let counts_source = filter_counts.unwrap_or(metrics_payload);

    let mut tab_summaries = base_summaries(counts_source, &metrics);
    let mut filter_counts = base_counts(counts_source, page.total_count);

    // Server aggregates describe the whole corpus. When a search narrowed
    // the result set, the returned rows are the only truthful source.
    if !search.is_empty() && !items.is_empty() {
        apply_search_override(&mut tab_summaries, &mut filter_counts, &items);
    }

    ViewModel {
        items,
        total_inventory_count: page.total_count,
        metrics,
        tab_summaries,
        filter_counts,
    }
}

/// Per-tab summaries from the summaries payload, falling back to the
/// metrics aggregate where a field is absent. Value and turnover only fall
/// back on the overview tab; the flat metrics figures describe the whole
/// corpus and would overstate a status slice.
fn base_summaries(counts_source: &Value, metrics: &DashboardMetrics) -> TabSummaries {
    let mut summaries = TabSummaries::default();
    for tab in TabKind::ALL {
        let probe = normalize::summary_probe(counts_source, tab);
        let is_overview = tab == TabKind::Overview;
        *summaries.get_mut(tab) = TabSummary {
            total_value: probe.total_value.unwrap_or(if is_overview {
                metrics.total_inventory_value
            } else {
                0.0
            }),
            total_quantity: probe.total_quantity.unwrap_or(0.0) as i64,
            branch_count: probe
                .branch_count
                .map(|n| n as i64)
                .unwrap_or(metrics.branch_count),
            entity_count: probe
                .entity_count
                .map(|n| n as i64)
                .unwrap_or(metrics.entity_count),
            inventory_turnover: probe.inventory_turnover.unwrap_or(if is_overview {
                metrics.inventory_turnover
            } else {
                0.0
            }),
        };
    }
    summaries
}

/// Tab badge counts. The overview badge backstops to the inventory
/// endpoint's total count so it never reads zero while rows are visible.
fn base_counts(counts_source: &Value, inventory_total: i64) -> FilterCounts {
    FilterCounts {
        overview: normalize::count_probe(counts_source, TabKind::Overview)
            .unwrap_or(inventory_total),
        excess: normalize::count_probe(counts_source, TabKind::Excess).unwrap_or(0),
        low_stock: normalize::count_probe(counts_source, TabKind::LowStock).unwrap_or(0),
        dead_stock: normalize::count_probe(counts_source, TabKind::DeadStock).unwrap_or(0),
    }
}

fn bucket<'a>(items: &'a [InventoryItem], tab: TabKind) -> Vec<&'a InventoryItem> {
    items
        .iter()
        .filter(|item| tab.matches_status(&item.status))
        .collect()
}

fn apply_search_override(
    summaries: &mut TabSummaries,
    counts: &mut FilterCounts,
    items: &[InventoryItem],
) {
    for tab in TabKind::ALL {
        let rows = bucket(items, tab);
        let quantity: i64 = rows.iter().map(|i| i.quantity_on_hand.max(0)).sum();
        let value: f64 = rows.iter().map(|i| i.inventory_balance).sum();
        let branches: HashSet<&str> = rows.iter().map(|i| i.branch.as_str()).collect();
        let ttm: i64 = rows.iter().map(|i| i.ttm_qty_used.max(0)).sum();

        let summary = summaries.get_mut(tab);
        summary.total_quantity = quantity;
        summary.total_value = value;
        summary.branch_count = branches.len() as i64;
        summary.inventory_turnover =
            search_turnover(ttm, quantity, value, summary.inventory_turnover);

        let count = rows.len() as i64;
        match tab {
            TabKind::Overview => counts.overview = count,
            TabKind::Excess => counts.excess = count,
            TabKind::LowStock => counts.low_stock = count,
            TabKind::DeadStock => counts.dead_stock = count,
        }
    }
}

/// Turnover over a filtered row set: annualized cost of goods at the
/// average unit cost, divided by the value on hand. When usage is zero the
/// server figure is the better estimate, so it is kept.
fn search_turnover(ttm: i64, quantity: i64, value: f64, server_turnover: f64) -> f64 {
    if ttm > 0 && quantity > 0 && value > 0.0 {
        let avg_cost = value / quantity as f64;
        (ttm as f64 * avg_cost) / value
    } else {
        server_turnover
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::collections::HashMap;

    use super::*;

    fn no_map() -> PartBranchMap {
        HashMap::new()
    }

    fn item(part: &str, branch: &str, status: &str, qty: i64, value: f64, ttm: i64) -> Value {
        json!({
            "partNumber": part,
            "branch": branch,
            "status": status,
            "quantityOnHand": qty,
            "inventoryBalance": value,
            "ttmQtyUsed": ttm
        })
    }

    #[test]
    fn test_reconcile_never_panics_on_malformed_input() {
        let vm = reconcile(&json!(null), &json!([]), Some(&json!("x")), 0, "", &no_map());
        assert!(vm.items.is_empty());
        assert_eq!(vm.total_inventory_count, 0);
        assert_eq!(vm.metrics.total_skus, 0);
        assert_eq!(vm.tab_summaries.overview.total_value, 0.0);
        assert_eq!(vm.filter_counts.overview, 0);
    }

    #[test]
    fn test_summaries_prefer_filter_counts_payload() {
        let filter_counts = json!({
            "totalItems": 500,
            "excessItems": 120,
            "summaries": {
                "overview": {"totalValue": 9000.0, "totalQuantity": 450, "branchCount": 7, "inventoryTurnover": 1.4},
                "excess": {"totalValue": 2000.0, "totalQuantity": 80, "branchCount": 4, "inventoryTurnover": 0.6}
            }
        });
        let metrics = json!({
            "totalInventoryValue": 1.0,
            "inventoryTurnover": 9.9,
            "branchCount": 99,
            "entityCount": 3
        });

        let vm = reconcile(
            &json!({"items": [], "totalCount": 500}),
            &metrics,
            Some(&filter_counts),
            0,
            "",
            &no_map(),
        );

        assert_eq!(vm.tab_summaries.overview.total_value, 9000.0);
        assert_eq!(vm.tab_summaries.overview.total_quantity, 450);
        assert_eq!(vm.tab_summaries.overview.branch_count, 7);
        assert_eq!(vm.tab_summaries.overview.inventory_turnover, 1.4);
        // entityCount is absent from the summaries, so the metrics figure wins
        assert_eq!(vm.tab_summaries.overview.entity_count, 3);
        assert_eq!(vm.tab_summaries.excess.total_value, 2000.0);
        assert_eq!(vm.filter_counts.overview, 500);
        assert_eq!(vm.filter_counts.excess, 120);
        assert_eq!(vm.filter_counts.low_stock, 0);
    }

    #[test]
    fn test_summaries_fall_back_to_metrics_then_prior_then_zero() {
        let metrics = json!({
            "totalInventoryValue": 123_000.0,
            "inventoryTurnover": 2.5,
            "branchCount": 11
        });

        // no summaries at all; entityCount missing from metrics too
        let vm = reconcile(
            &json!({"items": [], "totalCount": 0}),
            &metrics,
            Some(&json!({})),
            4,
            "",
            &no_map(),
        );

        let overview = &vm.tab_summaries.overview;
        assert_eq!(overview.total_value, 123_000.0);
        assert_eq!(overview.inventory_turnover, 2.5);
        assert_eq!(overview.branch_count, 11);
        assert_eq!(overview.entity_count, 4);

        // status tabs never inherit the corpus-wide value or turnover
        assert_eq!(vm.tab_summaries.excess.total_value, 0.0);
        assert_eq!(vm.tab_summaries.excess.inventory_turnover, 0.0);
        assert_eq!(vm.tab_summaries.excess.branch_count, 11);

        // nothing anywhere defaults to zero
        let bare = reconcile(&json!({}), &json!({}), Some(&json!({})), 0, "", &no_map());
        assert_eq!(bare.tab_summaries.overview.total_value, 0.0);
        assert_eq!(bare.tab_summaries.overview.entity_count, 0);
    }

    #[test]
    fn test_overview_count_falls_back_to_inventory_total() {
        let vm = reconcile(
            &json!({"items": [], "totalCount": 77}),
            &json!({}),
            Some(&json!({})),
            0,
            "",
            &no_map(),
        );
        assert_eq!(vm.filter_counts.overview, 77);
        assert_eq!(vm.total_inventory_count, 77);
    }

    #[test]
    fn test_advanced_payload_doubles_as_counts_source() {
        let advanced_metrics = json!({
            "totalSKUs": 60,
            "excessItems": 22,
            "lowStockItems": 8,
            "deadStockItems": 5,
            "summaries": {
                "overview": {"totalValue": 5000.0, "totalQuantity": 300, "entityCount": 2, "branchCount": 6, "inventoryTurnover": 1.1},
                "excess": {"totalValue": 900.0, "totalQuantity": 50, "entityCount": 2, "branchCount": 3, "inventoryTurnover": 0.4}
            }
        });

        let vm = reconcile(
            &json!({"items": [], "totalCount": 60}),
            &advanced_metrics,
            None,
            0,
            "",
            &no_map(),
        );

        assert_eq!(vm.filter_counts.overview, 60);
        assert_eq!(vm.filter_counts.excess, 22);
        assert_eq!(vm.filter_counts.low_stock, 8);
        assert_eq!(vm.tab_summaries.overview.total_value, 5000.0);
        assert_eq!(vm.tab_summaries.excess.branch_count, 3);
        assert_eq!(vm.metrics.total_inventory_value, 5000.0);
        assert_eq!(vm.metrics.entity_count, 2);
    }

    #[test]
    fn test_search_override_uses_returned_items() {
        let inventory = json!({
            "items": [
                item("ABC123", "B01", "excess", 10, 100.0, 0),
                item("ABC123", "B02", "low", 5, 50.0, 0),
                item("ABC123", "B03", "excess", 15, 150.0, 0)
            ],
            "totalCount": 3
        });
        // server aggregates describe the whole corpus and must be ignored
        let filter_counts = json!({
            "totalItems": 9999,
            "summaries": {
                "overview": {"totalValue": 5_000_000.0, "totalQuantity": 888_888, "branchCount": 40, "inventoryTurnover": 3.0}
            }
        });

        let vm = reconcile(
            &inventory,
            &json!({"branchCount": 40, "entityCount": 4}),
            Some(&filter_counts),
            0,
            "ABC123",
            &no_map(),
        );

        assert_eq!(vm.tab_summaries.overview.total_quantity, 30);
        assert_eq!(vm.tab_summaries.overview.total_value, 300.0);
        assert_eq!(vm.tab_summaries.overview.branch_count, 3);
        assert_eq!(vm.tab_summaries.excess.total_quantity, 25);
        assert_eq!(vm.tab_summaries.excess.total_value, 250.0);
        assert_eq!(vm.tab_summaries.excess.branch_count, 2);
        assert_eq!(vm.tab_summaries.low_stock.total_quantity, 5);
        assert_eq!(vm.tab_summaries.dead_stock.total_quantity, 0);
        assert_eq!(vm.filter_counts.overview, 3);
        assert_eq!(vm.filter_counts.excess, 2);
        assert_eq!(vm.filter_counts.low_stock, 1);
        assert_eq!(vm.filter_counts.dead_stock, 0);
        // pagination still follows the inventory endpoint
        assert_eq!(vm.total_inventory_count, 3);
    }

    #[test]
    fn test_search_with_no_items_keeps_server_summaries() {
        let filter_counts = json!({
            "summaries": {
                "overview": {"totalValue": 700.0, "totalQuantity": 12, "branchCount": 2, "inventoryTurnover": 0.9}
            }
        });
        let vm = reconcile(
            &json!({"items": [], "totalCount": 0}),
            &json!({}),
            Some(&filter_counts),
            0,
            "NOHIT",
            &no_map(),
        );
        assert_eq!(vm.tab_summaries.overview.total_quantity, 12);
        assert_eq!(vm.tab_summaries.overview.total_value, 700.0);
    }

    #[test]
    fn test_search_quantities_match_direct_bucket_reduction() {
        let rows = vec![
            item("P1", "B01", "excess", 7, 70.0, 2),
            item("P2", "B01", "dead", 3, 30.0, 0),
            item("P3", "B02", "low", 11, 110.0, 5),
            item("P4", "B03", "excess", 2, 20.0, 1),
            item("P5", "B02", "optimal", 6, 60.0, 9),
        ];
        let inventory = json!({"items": rows, "totalCount": 5});
        let vm = reconcile(&inventory, &json!({}), Some(&json!({})), 0, "P", &no_map());

        let expect = |status: &str| -> i64 {
            [("excess", 9), ("dead", 3), ("low", 11)]
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, q)| *q)
                .unwrap_or(0)
        };
        assert_eq!(vm.tab_summaries.excess.total_quantity, expect("excess"));
        assert_eq!(vm.tab_summaries.dead_stock.total_quantity, expect("dead"));
        assert_eq!(vm.tab_summaries.low_stock.total_quantity, expect("low"));
        assert_eq!(vm.tab_summaries.overview.total_quantity, 29);
    }

    #[test]
    fn test_search_turnover_formula_and_fallback() {
        // ttm 40, qty 20, value 200 -> avg cost 10, cogs 400, turnover 2.0
        let inventory = json!({
            "items": [item("P1", "B01", "optimal", 20, 200.0, 40)],
            "totalCount": 1
        });
        let vm = reconcile(&inventory, &json!({}), Some(&json!({})), 0, "P1", &no_map());
        assert!((vm.tab_summaries.overview.inventory_turnover - 2.0).abs() < 1e-9);

        // zero usage keeps the server figure
        let inventory = json!({
            "items": [item("P1", "B01", "optimal", 20, 200.0, 0)],
            "totalCount": 1
        });
        let server = json!({
            "summaries": {"overview": {"inventoryTurnover": 1.7, "totalQuantity": 20}}
        });
        let vm = reconcile(&inventory, &json!({}), Some(&server), 0, "P1", &no_map());
        assert!((vm.tab_summaries.overview.inventory_turnover - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_items_are_enriched_from_part_branch_map() {
        let mut map: PartBranchMap = HashMap::new();
        map.insert(
            "ABC123".to_string(),
            vec!["B01".to_string(), "B02".to_string(), "B03".to_string()],
        );
        let inventory = json!({
            "items": [item("ABC123", "B01", "optimal", 1, 1.0, 0)],
            "totalCount": 1
        });
        let vm = reconcile(&inventory, &json!({}), Some(&json!({})), 0, "", &map);
        assert!(vm.items[0].multi_branch);
        assert_eq!(vm.items[0].branch_count, 3);
    }
}
