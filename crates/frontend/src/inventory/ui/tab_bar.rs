use leptos::prelude::*;

use contracts::inventory::summary::TabKind;

use crate::inventory::intent::FilterAction;
use crate::inventory::store::use_dashboard;
use crate::shared::number_format::format_with_commas;

/// The four dashboard tabs with their SKU count badges.
#[component]
pub fn TabBar() -> impl IntoView {
    let store = use_dashboard();

    view! {
        <div class="tab-bar" role="tablist">
            {TabKind::ALL
                .into_iter()
                .map(|tab| {
                    let count = move || {
                        format_with_commas(store.view.with(|v| v.filter_counts.get(tab)) as f64, 0)
                    };
                    view! {
                        <button
                            class="tab-bar__tab"
                            class:active=move || store.intent.get().tab == tab
                            role="tab"
                            on:click=move |_| store.dispatch(FilterAction::SetTab(tab))
                        >
                            <span class="tab-bar__label">{tab.label()}</span>
                            <span class="tab-bar__count">{count}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
