//! Multi-branch enrichment of inventory rows.
//!
//! Each row is annotated with how many branches stock its part number,
//! using the global part-branch map fetched at startup. When that map is
//! unavailable the detection falls back to the rows on the current page,
//! which can only see branches that happen to share the page.

use std::collections::{HashMap, HashSet};

use contracts::inventory::catalog::PartBranchMap;
use contracts::inventory::item::InventoryItem;

/// Annotate every row with `multi_branch` / `branch_count`.
///
/// Total: always returns the same number of rows and never panics,
/// whatever the map contains.
pub fn enrich_items(items: Vec<InventoryItem>, map: &PartBranchMap) -> Vec<InventoryItem> {
    if items.is_empty() {
        return items;
    }
    if map.is_empty() {
        log::warn!(
            "Part-branch map unavailable; detecting multi-branch parts from the current page only"
        );
        return enrich_locally(items);
    }

    items
        .into_iter()
        .map(|mut item| {
            if item.part_number.is_empty() {
                return item;
            }
            let count = map
                .get(&item.part_number)
                .map(|branches| distinct(branches))
                .unwrap_or(0);
            item.branch_count = count;
            item.multi_branch = count > 1;
            item
        })
        .collect()
}

fn distinct(branches: &[String]) -> usize {
    branches.iter().collect::<HashSet<_>>().len()
}

fn enrich_locally(items: Vec<InventoryItem>) -> Vec<InventoryItem> {
    let mut page_map: HashMap<&str, HashSet<&str>> = HashMap::new();
    for item in &items {
        if item.part_number.is_empty() {
            continue;
        }
        page_map
            .entry(item.part_number.as_str())
            .or_default()
            .insert(item.branch.as_str());
    }

    let counts: HashMap<String, usize> = page_map
        .into_iter()
        .map(|(part, branches)| (part.to_string(), branches.len()))
        .collect();

    items
        .into_iter()
        .map(|mut item| {
            if item.part_number.is_empty() {
                return item;
            }
            let count = counts.get(&item.part_number).copied().unwrap_or(0);
            item.branch_count = count;
            item.multi_branch = count > 1;
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(part: &str, branch: &str) -> InventoryItem {
        InventoryItem {
            part_number: part.to_string(),
            branch: branch.to_string(),
            ..InventoryItem::default()
        }
    }

    fn map_of(entries: &[(&str, &[&str])]) -> PartBranchMap {
        entries
            .iter()
            .map(|(part, branches)| {
                (
                    part.to_string(),
                    branches.iter().map(|b| b.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_enrich_uses_global_map() {
        let map = map_of(&[("P1", &["B01", "B02", "B03"]), ("P2", &["B01"])]);
        let items = enrich_items(vec![row("P1", "B01"), row("P2", "B01")], &map);

        assert_eq!(items.len(), 2);
        assert!(items[0].multi_branch);
        assert_eq!(items[0].branch_count, 3);
        assert!(!items[1].multi_branch);
        assert_eq!(items[1].branch_count, 1);
    }

    #[test]
    fn test_part_missing_from_map_is_not_multi_branch() {
        let map = map_of(&[("OTHER", &["B01", "B02"])]);
        let items = enrich_items(vec![row("P1", "B01")], &map);
        assert!(!items[0].multi_branch);
        assert_eq!(items[0].branch_count, 0);
    }

    #[test]
    fn test_empty_map_falls_back_to_page_local_detection() {
        let items = enrich_items(
            vec![row("P1", "B01"), row("P1", "B02"), row("P2", "B01")],
            &PartBranchMap::new(),
        );
        assert_eq!(items.len(), 3);
        assert!(items[0].multi_branch);
        assert_eq!(items[0].branch_count, 2);
        assert!(items[1].multi_branch);
        assert!(!items[2].multi_branch);
        assert_eq!(items[2].branch_count, 1);
    }

    #[test]
    fn test_rows_without_part_number_pass_through() {
        let items = enrich_items(vec![row("", "B01"), row("", "B01")], &PartBranchMap::new());
        assert_eq!(items.len(), 2);
        assert!(!items[0].multi_branch);
        assert_eq!(items[0].branch_count, 0);
    }

    #[test]
    fn test_duplicate_branches_in_map_count_once() {
        let map = map_of(&[("P1", &["B01", "B01", "B02"])]);
        let items = enrich_items(vec![row("P1", "B01")], &map);
        assert_eq!(items[0].branch_count, 2);
    }

    #[test]
    fn test_empty_input_is_untouched() {
        let items = enrich_items(Vec::new(), &map_of(&[("P1", &["B01"])]));
        assert!(items.is_empty());
    }
}
