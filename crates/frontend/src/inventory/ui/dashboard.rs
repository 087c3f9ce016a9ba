use leptos::prelude::*;

use contracts::inventory::item::InventoryItem;

use crate::inventory::intent::FilterAction;
use crate::inventory::store::use_dashboard;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::loading_bar::LoadingBar;
use crate::shared::components::pagination_controls::PaginationControls;

use super::detail_modal::DetailModal;
use super::filter_bar::FilterBar;
use super::metrics_header::MetricsHeader;
use super::tab_bar::TabBar;
use super::table::InventoryTable;

/// The dashboard page. Pure rendering over the store; every interaction
/// goes back through [`FilterAction`] dispatch.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_dashboard();
    let selected = RwSignal::new(Option::<InventoryItem>::None);

    let loading_visible = Signal::derive(move || store.loading.get().any_loading());
    let progress = Signal::derive(move || store.loading.get().progress);
    let error = Signal::derive(move || store.error.get());

    let current_page = Signal::derive(move || store.intent.get().page);
    let total_pages = Signal::derive(move || store.total_pages());
    let total_count =
        Signal::derive(move || store.view.with(|v| v.total_inventory_count.max(0)) as usize);

    view! {
        <div class="dashboard">
            <LoadingBar visible=loading_visible progress=progress />
            <ErrorBanner
                error=error
                on_dismiss=Callback::new(move |()| store.dismiss_error())
            />
            <MetricsHeader />
            <FilterBar />
            <TabBar />
            <InventoryTable on_select=Callback::new(move |item| selected.set(Some(item))) />
            <PaginationControls
                current_page=current_page
                total_pages=total_pages
                total_count=total_count
                on_page_change=Callback::new(move |page| {
                    store.dispatch(FilterAction::SetPage(page));
                })
            />
            <DetailModal selected=selected />
        </div>
    }
}
