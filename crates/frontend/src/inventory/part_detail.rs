//! Cross-branch part detail lookup.
//!
//! The detail modal shows every branch stocking a part. No single endpoint
//! is authoritative across deployments, so the lookup walks an ordered
//! list of strategies and takes the first one that yields rows. If all of
//! them fail, rows for the part are synthesized from the loaded page (or
//! the selected row alone), so the modal always opens.

use serde_json::Value;

use contracts::inventory::item::InventoryItem;

use crate::shared::api_utils::{self};

use super::normalize;

/// One lookup attempt: an endpoint and how to treat its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailStrategy {
    pub label: &'static str,
    pub path: String,
    /// The generic search endpoint matches loosely; its rows are narrowed
    /// to the exact part number afterwards.
    pub exact_match_only: bool,
}

/// The ordered lookup ladder for one part.
pub fn detail_strategies(part_number: &str, entity: &str) -> Vec<DetailStrategy> {
    let part = urlencoding::encode(part_number).into_owned();
    let entity = urlencoding::encode(entity).into_owned();
    vec![
        DetailStrategy {
            label: "all-entity part details",
            path: format!("/part-details/all/{}", part),
            exact_match_only: false,
        },
        DetailStrategy {
            label: "entity part details",
            path: format!("/part-details/{}/{}", entity, part),
            exact_match_only: false,
        },
        DetailStrategy {
            label: "inventory search",
            path: format!("/inventory/search?term={}", part),
            exact_match_only: true,
        },
    ]
}

/// Pull inventory rows out of either response shape: a bare array or an
/// object with an `items` array. Anything else yields no rows.
pub fn extract_rows(value: &Value) -> Vec<InventoryItem> {
    let rows = match value {
        Value::Array(rows) => rows.as_slice(),
        Value::Object(_) => value
            .get("items")
            .and_then(|v| v.as_array())
            .map(|rows| rows.as_slice())
            .unwrap_or(&[]),
        _ => &[],
    };
    rows.iter().map(normalize::item_from_value).collect()
}

pub fn exact_matches(rows: Vec<InventoryItem>, part_number: &str) -> Vec<InventoryItem> {
    rows.into_iter()
        .filter(|row| row.part_number == part_number)
        .collect()
}

/// Last-resort rows when every endpoint came up empty: any rows for the
/// same part already on the loaded page, or failing that the selected row
/// itself.
pub fn fallback_rows(item: &InventoryItem, loaded: &[InventoryItem]) -> Vec<InventoryItem> {
    let from_page: Vec<InventoryItem> = loaded
        .iter()
        .filter(|row| row.part_number == item.part_number)
        .cloned()
        .collect();
    if from_page.is_empty() {
        vec![item.clone()]
    } else {
        from_page
    }
}

/// Fetch the per-branch rows for one part, walking the strategy ladder.
///
/// Never fails: the worst case is synthesized from `loaded` (the current
/// page's rows), with the attempted endpoints logged.
pub async fn fetch_branch_details(
    item: &InventoryItem,
    loaded: &[InventoryItem],
) -> Vec<InventoryItem> {
    let mut failures: Vec<String> = Vec::new();

    for strategy in detail_strategies(&item.part_number, &item.entity) {
        let url = api_utils::api_url(&strategy.path);
        match api_utils::get_value(&url).await {
            Ok(value) => {
                let mut rows = extract_rows(&value);
                if strategy.exact_match_only {
                    rows = exact_matches(rows, &item.part_number);
                }
                if !rows.is_empty() {
                    log::info!(
                        "Part details for {} via {} ({} rows)",
                        item.part_number,
                        strategy.label,
                        rows.len()
                    );
                    return rows;
                }
                failures.push(format!("{}: no matching rows", strategy.label));
            }
            Err(e) => failures.push(format!("{}: {}", strategy.label, e)),
        }
    }

    log::warn!(
        "Part detail lookup failed for {}: {}",
        item.part_number,
        failures.join("; ")
    );
    fallback_rows(item, loaded)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_strategy_order_and_paths() {
        let strategies = detail_strategies("AB 12", "East");
        assert_eq!(strategies.len(), 3);
        assert_eq!(strategies[0].path, "/part-details/all/AB%2012");
        assert!(!strategies[0].exact_match_only);
        assert_eq!(strategies[1].path, "/part-details/East/AB%2012");
        assert_eq!(strategies[2].path, "/inventory/search?term=AB%2012");
        assert!(strategies[2].exact_match_only);
    }

    #[test]
    fn test_extract_rows_from_both_shapes() {
        let array = json!([{"partNumber": "P1", "branch": "B01"}]);
        let rows = extract_rows(&array);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].part_number, "P1");

        let object = json!({"items": [{"partNumber": "P1"}, {"partNumber": "P2"}]});
        assert_eq!(extract_rows(&object).len(), 2);

        assert!(extract_rows(&json!("nope")).is_empty());
        assert!(extract_rows(&json!({"rows": []})).is_empty());
        assert!(extract_rows(&json!(null)).is_empty());
    }

    #[test]
    fn test_exact_matches_narrows_search_rows() {
        let rows = extract_rows(&json!({"items": [
            {"partNumber": "ABC123", "branch": "B01"},
            {"partNumber": "ABC123X", "branch": "B02"},
            {"partNumber": "ABC123", "branch": "B03"}
        ]}));
        let exact = exact_matches(rows, "ABC123");
        assert_eq!(exact.len(), 2);
        assert!(exact.iter().all(|r| r.part_number == "ABC123"));
    }

    #[test]
    fn test_fallback_synthesizes_from_loaded_page() {
        let page = extract_rows(&json!([
            {"partNumber": "P1", "branch": "B01"},
            {"partNumber": "P2", "branch": "B02"},
            {"partNumber": "P1", "branch": "B03"}
        ]));
        let selected = page[0].clone();

        let rows = fallback_rows(&selected, &page);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.part_number == "P1"));

        // nothing else on the page: echo the selected row
        let rows = fallback_rows(&selected, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].branch, selected.branch);
    }
}
