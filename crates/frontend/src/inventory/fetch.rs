//! Runs one fetch cycle: resolve the endpoint set for an intent, call the
//! endpoints concurrently, and reconcile the payloads.
//!
//! A cycle is all-or-nothing. If any leg fails, every result is discarded
//! and one aggregated error names each failing endpoint, so the UI never
//! renders a partial merge.

use futures::join;
use serde_json::Value;

use contracts::inventory::catalog::PartBranchMap;

use crate::shared::api_utils::{self, ApiError};

use super::api::cycle_urls;
use super::intent::ViewIntent;
use super::loading::{PROGRESS_FETCHED, PROGRESS_PARSED};
use super::reconcile::{self, ViewModel};

type Fetched = Result<Value, ApiError>;

/// Execute the fetch cycle for one view intent. `progress` receives the
/// coarse progress steps as the cycle advances.
pub async fn run_cycle(
    intent: &ViewIntent,
    prior_entity_count: i64,
    part_branch_map: &PartBranchMap,
    progress: impl Fn(u8),
) -> Result<ViewModel, String> {
    let urls = cycle_urls(intent);
    log::info!(
        "Fetch cycle: page {}, {} endpoint(s): {:?}",
        intent.page,
        urls.all().len(),
        urls.all()
    );

    let inventory_url = api_utils::api_url(&urls.inventory);
    let metrics_url = api_utils::api_url(&urls.metrics);

    let (inventory, metrics, filter_counts) = match &urls.filter_counts {
        Some(path) => {
            let fc_url = api_utils::api_url(path);
            let (inventory, metrics, fc) = join!(
                api_utils::get_value(&inventory_url),
                api_utils::get_value(&metrics_url),
                api_utils::get_value(&fc_url)
            );
            (inventory, metrics, Some(fc))
        }
        None => {
            let (inventory, metrics) = join!(
                api_utils::get_value(&inventory_url),
                api_utils::get_value(&metrics_url)
            );
            (inventory, metrics, None)
        }
    };

    progress(PROGRESS_FETCHED);

    let failures = collect_failures(&inventory, &metrics, filter_counts.as_ref());
    if !failures.is_empty() {
        let message = format!("Failed to load dashboard data: {}", failures.join("; "));
        log::error!("{}", message);
        return Err(message);
    }

    let inventory = inventory.unwrap_or_default();
    let metrics = metrics.unwrap_or_default();
    let filter_counts = filter_counts.map(|fc| fc.unwrap_or_default());
    progress(PROGRESS_PARSED);

    Ok(reconcile::reconcile(
        &inventory,
        &metrics,
        filter_counts.as_ref(),
        prior_entity_count,
        &intent.search,
        part_branch_map,
    ))
}

/// One line per failed leg, each naming its endpoint.
fn collect_failures(
    inventory: &Fetched,
    metrics: &Fetched,
    filter_counts: Option<&Fetched>,
) -> Vec<String> {
    let mut failures = Vec::new();
    if let Err(e) = inventory {
        failures.push(format!("Inventory: {}", e));
    }
    if let Err(e) = metrics {
        failures.push(format!("Metrics: {}", e));
    }
    if let Some(Err(e)) = filter_counts {
        failures.push(format!("Filter counts: {}", e));
    }
    failures
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn http_error(url: &str, status: u16) -> Fetched {
        Err(ApiError::Http {
            url: url.to_string(),
            status,
            detail: None,
        })
    }

    #[test]
    fn test_no_failures_when_all_legs_succeed() {
        let failures = collect_failures(&Ok(json!({})), &Ok(json!({})), Some(&Ok(json!({}))));
        assert!(failures.is_empty());
    }

    #[test]
    fn test_single_failed_leg_names_its_endpoint() {
        let failures = collect_failures(
            &Ok(json!({})),
            &http_error("http://api/metrics/all/complete", 500),
            Some(&Ok(json!({}))),
        );
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("Metrics:"));
        assert!(failures[0].contains("500"));
        assert!(failures[0].contains("http://api/metrics/all/complete"));
    }

    #[test]
    fn test_multiple_failures_each_reported() {
        let failures = collect_failures(
            &http_error("http://api/inventory", 502),
            &Ok(json!({})),
            Some(&http_error("http://api/filtercounts/all", 500)),
        );
        assert_eq!(failures.len(), 2);
        assert!(failures[0].starts_with("Inventory:"));
        assert!(failures[1].starts_with("Filter counts:"));
    }

    #[test]
    fn test_two_leg_cycle_skips_filter_counts() {
        let failures = collect_failures(&Ok(json!({})), &Ok(json!({})), None);
        assert!(failures.is_empty());
    }
}
