use leptos::prelude::*;
use leptos::task::spawn_local;

use contracts::inventory::item::InventoryItem;

use crate::cart::ui::{OrderForm, TransferForm};
use crate::inventory::part_detail;
use crate::inventory::store::use_dashboard;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_currency, format_with_commas};
use crate::system::session::context::use_session;

#[derive(Clone, PartialEq)]
enum DetailMode {
    Branches,
    Order,
    Transfer(InventoryItem),
}

/// Cross-branch detail view for one part, opened from a table row.
///
/// Branch rows come from the ordered lookup cascade; worst case the view
/// shows the selected row alone. Each row offers a transfer from its
/// branch, and the header offers an order for the selected branch.
#[component]
pub fn DetailModal(selected: RwSignal<Option<InventoryItem>>) -> impl IntoView {
    let store = use_dashboard();
    let session = use_session();

    let rows = RwSignal::new(Vec::<InventoryItem>::new());
    let is_loading = RwSignal::new(false);
    let mode = RwSignal::new(DetailMode::Branches);

    Effect::new(move |_| {
        let Some(item) = selected.get() else {
            return;
        };
        mode.set(DetailMode::Branches);
        rows.set(Vec::new());
        is_loading.set(true);
        let page_rows = store.view.with_untracked(|v| v.items.clone());
        spawn_local(async move {
            let fetched = part_detail::fetch_branch_details(&item, &page_rows).await;
            // ignore the result if the modal moved on to another part
            let still_current = selected
                .with_untracked(|s| s.as_ref().map(|i| i.part_number.clone()))
                .as_deref()
                == Some(item.part_number.as_str());
            if still_current {
                rows.set(fetched);
                is_loading.set(false);
            }
        });
    });

    let close = move || {
        selected.set(None);
        mode.set(DetailMode::Branches);
    };

    // Transfer destinations: the source row's entity branches, or every
    // branch seen across the fetched rows when the catalog lacks them.
    let destinations_for = move |source: &InventoryItem| -> Vec<String> {
        let from_catalog = store
            .entity_branches
            .with_untracked(|map| map.get(&source.entity).cloned())
            .unwrap_or_default();
        if !from_catalog.is_empty() {
            return from_catalog;
        }
        let mut branches: Vec<String> = rows
            .with_untracked(|r| r.iter().map(|i| i.branch.clone()).collect());
        branches.sort();
        branches.dedup();
        branches
    };

    let can_edit = move || session.with(|s| s.can_edit());

    view! {
        <Show when=move || selected.get().is_some()>
            <div class="modal-backdrop" on:click=move |_| close()>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <div class="modal__header">
                        <h3>
                            {move || {
                                selected
                                    .get()
                                    .map(|i| format!("{} \u{2014} {}", i.part_number, i.description))
                                    .unwrap_or_default()
                            }}
                        </h3>
                        <button class="btn-icon" title="Close" on:click=move |_| close()>
                            {icon("x")}
                        </button>
                    </div>

                    {move || match mode.get() {
                        DetailMode::Order => selected
                            .get()
                            .map(|item| {
                                view! {
                                    <OrderForm
                                        item=item
                                        on_done=Callback::new(move |()| mode.set(DetailMode::Branches))
                                    />
                                }
                                .into_any()
                            })
                            .unwrap_or_else(|| ().into_any()),
                        DetailMode::Transfer(source) => {
                            let destinations = destinations_for(&source);
                            view! {
                                <TransferForm
                                    source=source
                                    destinations=destinations
                                    on_done=Callback::new(move |()| mode.set(DetailMode::Branches))
                                />
                            }
                            .into_any()
                        }
                        DetailMode::Branches => view! {
                            <div class="modal__body">
                                <div class="modal__actions">
                                    <button
                                        class="btn-primary"
                                        disabled=move || !can_edit()
                                        on:click=move |_| mode.set(DetailMode::Order)
                                    >
                                        {icon("cart")}
                                        " Order this part"
                                    </button>
                                </div>
                                <Show
                                    when=move || !is_loading.get()
                                    fallback=|| {
                                        view! { <p class="modal__loading">"Loading branches\u{2026}"</p> }
                                    }
                                >
                                    <table class="detail-table">
                                        <thead>
                                            <tr>
                                                <th>"Branch"</th>
                                                <th>"Entity"</th>
                                                <th>"On hand"</th>
                                                <th>"Value"</th>
                                                <th>"TTM used"</th>
                                                <th>"Status"</th>
                                                <th></th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            <For
                                                each=move || rows.get()
                                                key=|row| (row.branch.clone(), row.entity.clone())
                                                children=move |row| {
                                                    let source = row.clone();
                                                    view! {
                                                        <tr>
                                                            <td>{row.branch.clone()}</td>
                                                            <td>{row.entity.clone()}</td>
                                                            <td class="num">
                                                                {format_with_commas(row.quantity_on_hand as f64, 0)}
                                                            </td>
                                                            <td class="num">
                                                                {format_currency(row.inventory_balance)}
                                                            </td>
                                                            <td class="num">
                                                                {format_with_commas(row.ttm_qty_used as f64, 0)}
                                                            </td>
                                                            <td>{row.status.clone()}</td>
                                                            <td>
                                                                <button
                                                                    class="btn-icon"
                                                                    title="Transfer from this branch"
                                                                    disabled=move || !can_edit()
                                                                    on:click=move |_| {
                                                                        mode.set(DetailMode::Transfer(source.clone()))
                                                                    }
                                                                >
                                                                    {icon("transfers")}
                                                                </button>
                                                            </td>
                                                        </tr>
                                                    }
                                                }
                                            />
                                        </tbody>
                                    </table>
                                </Show>
                            </div>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </Show>
    }
}
