use leptos::prelude::*;

use crate::inventory::store::use_dashboard;
use crate::shared::components::summary_card::SummaryCard;
use crate::shared::number_format::{format_currency, format_with_commas};

/// Headline metric cards for the active tab.
///
/// Values render as a dash until the first cycle lands, so the header
/// never shows a zero that really means "not loaded yet".
#[component]
pub fn MetricsHeader() -> impl IntoView {
    let store = use_dashboard();

    let loaded = move || !store.loading.get().is_initializing;
    let summary = move || {
        let tab = store.intent.get().tab;
        store.view.with(|v| v.tab_summaries.get(tab).clone())
    };

    let sku_count = Signal::derive(move || {
        loaded().then(|| {
            let tab = store.intent.get().tab;
            format_with_commas(store.view.with(|v| v.filter_counts.get(tab)) as f64, 0)
        })
    });
    let total_value =
        Signal::derive(move || loaded().then(|| format_currency(summary().total_value)));
    let total_quantity = Signal::derive(move || {
        loaded().then(|| format_with_commas(summary().total_quantity as f64, 0))
    });
    let branch_count = Signal::derive(move || {
        loaded().then(|| format_with_commas(summary().branch_count as f64, 0))
    });
    let entity_count = Signal::derive(move || {
        loaded().then(|| format_with_commas(summary().entity_count as f64, 0))
    });
    let turnover = Signal::derive(move || {
        loaded().then(|| format_with_commas(summary().inventory_turnover, 2))
    });

    view! {
        <div class="metrics-header">
            <SummaryCard label="SKUs".to_string() icon_name="box".to_string() value=sku_count />
            <SummaryCard
                label="Inventory value".to_string()
                icon_name="orders".to_string()
                value=total_value
            />
            <SummaryCard
                label="Quantity on hand".to_string()
                icon_name="dashboard".to_string()
                value=total_quantity
            />
            <SummaryCard
                label="Branches".to_string()
                icon_name="building".to_string()
                value=branch_count
            />
            <SummaryCard
                label="Entities".to_string()
                icon_name="building".to_string()
                value=entity_count
            />
            <SummaryCard
                label="Turnover".to_string()
                icon_name="refresh".to_string()
                value=turnover
            />
        </div>
    }
}
