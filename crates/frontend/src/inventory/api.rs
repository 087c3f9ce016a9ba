//! Endpoint selection and URL construction for dashboard fetch cycles.
//!
//! URL builders are pure functions over a [`ViewIntent`] and return paths
//! relative to the API base. The async wrappers at the bottom do the
//! actual requests.

use contracts::inventory::catalog::{EntityCatalog, PartBranchMap};

use crate::shared::api_utils::{self, ApiError};

use super::intent::{AdvancedFilter, FetchStrategy, ViewIntent, PAGE_SIZE};

/// The URLs one fetch cycle will hit. `filter_counts` is `None` for the
/// advanced strategy, where the metrics payload carries the summaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleUrls {
    pub inventory: String,
    pub metrics: String,
    pub filter_counts: Option<String>,
}

impl CycleUrls {
    /// Every URL in the cycle, for error reporting.
    pub fn all(&self) -> Vec<&str> {
        let mut urls = vec![self.inventory.as_str(), self.metrics.as_str()];
        if let Some(fc) = &self.filter_counts {
            urls.push(fc.as_str());
        }
        urls
    }
}

/// Resolve which endpoints a view intent needs and build their URLs.
pub fn cycle_urls(intent: &ViewIntent) -> CycleUrls {
    match intent.strategy() {
        FetchStrategy::AllBranches => CycleUrls {
            inventory: all_branches_inventory_url(intent),
            metrics: with_search("/metrics/all/complete", &intent.search),
            filter_counts: Some(with_search("/filtercounts/all", &intent.search)),
        },
        FetchStrategy::Entity { entity, branch } => CycleUrls {
            inventory: entity_inventory_url(intent, entity, branch),
            metrics: entity_metrics_url(intent, entity, branch),
            filter_counts: Some(entity_filter_counts_url(intent, entity, branch)),
        },
        FetchStrategy::Advanced(filter) => CycleUrls {
            inventory: advanced_inventory_url(intent, filter),
            metrics: advanced_metrics_url(intent, filter),
            filter_counts: None,
        },
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn encode_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| encode(v))
        .collect::<Vec<_>>()
        .join(",")
}

fn with_search(path: &str, search: &str) -> String {
    if search.is_empty() {
        path.to_string()
    } else {
        format!("{}?search={}", path, encode(search))
    }
}

fn push_sort(params: &mut Vec<String>, intent: &ViewIntent) {
    params.push(format!("sort_by={}", intent.sort.key));
    params.push(format!("sort_dir={}", intent.sort.direction.wire()));
}

fn all_branches_inventory_url(intent: &ViewIntent) -> String {
    let mut params = vec![
        format!("limit={}", PAGE_SIZE),
        format!("offset={}", intent.offset()),
    ];
    if let Some(status) = intent.tab.status_param() {
        params.push(format!("status={}", status));
    }
    if !intent.search.is_empty() {
        params.push(format!("search={}", encode(&intent.search)));
    }
    if let Some(ns) = &intent.network_status {
        params.push(format!("network_status={}", encode(ns)));
    }
    push_sort(&mut params, intent);
    format!("/inventory?{}", params.join("&"))
}

fn entity_inventory_url(intent: &ViewIntent, entity: &str, branch: Option<&str>) -> String {
    let mut params = vec![
        format!("limit={}", PAGE_SIZE),
        format!("offset={}", intent.offset()),
    ];
    if let Some(branch) = branch {
        params.push(format!("branch={}", encode(branch)));
    }
    if let Some(status) = intent.tab.status_param() {
        params.push(format!("status={}", status));
    }
    if !intent.search.is_empty() {
        params.push(format!("search={}", encode(&intent.search)));
    }
    if let Some(ns) = &intent.network_status {
        params.push(format!("network_status={}", encode(ns)));
    }
    push_sort(&mut params, intent);
    format!("/inventory/{}?{}", encode(entity), params.join("&"))
}

fn entity_metrics_url(intent: &ViewIntent, entity: &str, branch: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(branch) = branch {
        params.push(format!("branch={}", encode(branch)));
    }
    if !intent.search.is_empty() {
        params.push(format!("search={}", encode(&intent.search)));
    }
    if params.is_empty() {
        format!("/metrics/{}", encode(entity))
    } else {
        format!("/metrics/{}?{}", encode(entity), params.join("&"))
    }
}

fn entity_filter_counts_url(intent: &ViewIntent, entity: &str, branch: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(branch) = branch {
        params.push(format!("branch={}", encode(branch)));
    }
    if !intent.search.is_empty() {
        params.push(format!("search={}", encode(&intent.search)));
    }
    if params.is_empty() {
        format!("/filtercounts/{}", encode(entity))
    } else {
        format!("/filtercounts/{}?{}", encode(entity), params.join("&"))
    }
}

fn advanced_metrics_url(intent: &ViewIntent, filter: &AdvancedFilter) -> String {
    let mut params = vec![format!("entities={}", encode_list(&filter.selected_entities))];
    let branches = filter.effective_branches();
    if !branches.is_empty() {
        params.push(format!("branches={}", encode_list(&branches)));
    }
    if let Some(status) = intent.tab.status_param() {
        params.push(format!("status={}", status));
    }
    if !intent.search.is_empty() {
        params.push(format!("search={}", encode(&intent.search)));
    }
    format!("/metrics/advanced?{}", params.join("&"))
}

fn advanced_inventory_url(intent: &ViewIntent, filter: &AdvancedFilter) -> String {
    let mut params = vec![
        format!("limit={}", PAGE_SIZE),
        format!("offset={}", intent.offset()),
        format!("entities={}", encode_list(&filter.selected_entities)),
    ];
    let branches = filter.effective_branches();
    if !branches.is_empty() {
        params.push(format!("branches={}", encode_list(&branches)));
    }
    if !intent.search.is_empty() {
        params.push(format!("search={}", encode(&intent.search)));
    }
    if let Some(status) = intent.tab.status_param() {
        params.push(format!("status={}", status));
    }
    if let Some(ns) = &intent.network_status {
        params.push(format!("network_status={}", encode(ns)));
    }
    push_sort(&mut params, intent);
    format!("/inventory/advanced?{}", params.join("&"))
}

/// Entity list plus the entity-to-branches map, fetched once at startup.
pub async fn fetch_entity_catalog() -> Result<EntityCatalog, ApiError> {
    api_utils::get_json(&api_utils::api_url("/entities")).await
}

/// Global part-to-branches map used for multi-branch enrichment.
pub async fn fetch_part_branch_map() -> Result<PartBranchMap, ApiError> {
    api_utils::get_json(&api_utils::api_url("/part-branch-summary")).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use contracts::inventory::summary::TabKind;

    use super::*;
    use crate::inventory::intent::{derive_intent, FilterState, SortDirection};

    fn intent_for(state: FilterState) -> ViewIntent {
        derive_intent(&state)
    }

    #[test]
    fn test_home_cycle_hits_three_endpoints() {
        let urls = cycle_urls(&intent_for(FilterState::default()));
        assert_eq!(
            urls.inventory,
            "/inventory?limit=20&offset=0&sort_by=partNumber&sort_dir=asc"
        );
        assert_eq!(urls.metrics, "/metrics/all/complete");
        assert_eq!(urls.filter_counts.as_deref(), Some("/filtercounts/all"));
        assert_eq!(urls.all().len(), 3);
    }

    #[test]
    fn test_home_cycle_with_search_and_tab() {
        let mut state = FilterState::default();
        state.search_query = "AB C".to_string();
        state.active_tab = TabKind::LowStock;
        state.page = 2;
        let urls = cycle_urls(&intent_for(state));
        assert_eq!(
            urls.inventory,
            "/inventory?limit=20&offset=20&status=low&search=AB%20C&sort_by=partNumber&sort_dir=asc"
        );
        assert_eq!(urls.metrics, "/metrics/all/complete?search=AB%20C");
        assert_eq!(
            urls.filter_counts.as_deref(),
            Some("/filtercounts/all?search=AB%20C")
        );
    }

    #[test]
    fn test_entity_cycle_urls() {
        let mut state = FilterState::default();
        state.entity = Some("East".to_string());
        state.branch = Some("B01".to_string());
        state.active_tab = TabKind::Excess;
        state.search_query = "bearing".to_string();
        state.network_status = Some("active".to_string());
        state.sort.key = "quantityOnHand".to_string();
        state.sort.direction = SortDirection::Descending;

        let urls = cycle_urls(&intent_for(state));
        assert_eq!(
            urls.inventory,
            "/inventory/East?limit=20&offset=0&branch=B01&status=excess&search=bearing&network_status=active&sort_by=quantityOnHand&sort_dir=desc"
        );
        assert_eq!(urls.metrics, "/metrics/East?branch=B01&search=bearing");
        assert_eq!(
            urls.filter_counts.as_deref(),
            Some("/filtercounts/East?branch=B01&search=bearing")
        );
    }

    #[test]
    fn test_entity_cycle_without_branch_or_search() {
        let mut state = FilterState::default();
        state.entity = Some("West".to_string());
        let urls = cycle_urls(&intent_for(state));
        assert_eq!(urls.metrics, "/metrics/West");
        assert_eq!(urls.filter_counts.as_deref(), Some("/filtercounts/West"));
    }

    #[test]
    fn test_advanced_cycle_show_all_branches_omits_branches_param() {
        let mut state = FilterState::default();
        state.advanced = Some(AdvancedFilter {
            selected_entities: vec!["East".to_string(), "West".to_string()],
            selected_branches: HashMap::new(),
            show_all_branches: true,
        });
        let urls = cycle_urls(&intent_for(state));
        assert_eq!(
            urls.inventory,
            "/inventory/advanced?limit=20&offset=0&entities=East,West&sort_by=partNumber&sort_dir=asc"
        );
        assert_eq!(urls.metrics, "/metrics/advanced?entities=East,West");
        assert!(urls.filter_counts.is_none());
        assert_eq!(urls.all().len(), 2);
        assert!(!urls.inventory.contains("branches="));
    }

    #[test]
    fn test_advanced_cycle_with_branches_status_and_search() {
        let mut branches = HashMap::new();
        branches.insert("East".to_string(), vec!["B01".to_string()]);
        let mut state = FilterState::default();
        state.advanced = Some(AdvancedFilter {
            selected_entities: vec!["East".to_string()],
            selected_branches: branches,
            show_all_branches: false,
        });
        state.active_tab = TabKind::DeadStock;
        state.search_query = "seal".to_string();

        let urls = cycle_urls(&intent_for(state));
        assert_eq!(
            urls.inventory,
            "/inventory/advanced?limit=20&offset=0&entities=East&branches=B01&search=seal&status=dead&sort_by=partNumber&sort_dir=asc"
        );
        assert_eq!(
            urls.metrics,
            "/metrics/advanced?entities=East&branches=B01&status=dead&search=seal"
        );
    }

    #[test]
    fn test_entity_names_are_url_encoded() {
        let mut state = FilterState::default();
        state.entity = Some("North East".to_string());
        let urls = cycle_urls(&intent_for(state));
        assert!(urls.inventory.starts_with("/inventory/North%20East?"));
        assert_eq!(urls.metrics, "/metrics/North%20East");
    }
}
