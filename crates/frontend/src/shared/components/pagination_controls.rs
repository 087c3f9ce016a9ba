use crate::shared::icons::icon;
use leptos::prelude::*;

/// Pagination controls shared by the inventory table and request pages.
///
/// Pages are 1-indexed to match the `page` field in the filter state.
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Total count of rows across all pages
    #[prop(into)]
    total_count: Signal<usize>,

    /// Callback when page changes
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || current_page.get() <= 1
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() <= 1
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let page = current_page.get();
                    let total = total_pages.get().max(1);
                    let count = total_count.get();
                    format!("Page {} of {} ({} items)", page, total, count)
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || current_page.get() >= total_pages.get()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total);
                    }
                }
                disabled=move || current_page.get() >= total_pages.get()
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
        </div>
    }
}
