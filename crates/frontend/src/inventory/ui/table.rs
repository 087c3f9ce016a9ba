use leptos::prelude::*;

use contracts::inventory::item::InventoryItem;

use crate::inventory::intent::{FilterAction, SortDirection};
use crate::inventory::store::use_dashboard;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_currency, format_with_commas};

const COLUMNS: [(&str, &str); 9] = [
    ("partNumber", "Part"),
    ("mfgPartNumber", "Mfg part"),
    ("description", "Description"),
    ("branch", "Branch"),
    ("quantityOnHand", "On hand"),
    ("inventoryBalance", "Value"),
    ("ttmQtyUsed", "TTM used"),
    ("monthsOfCoverage", "Coverage"),
    ("lastReceipt", "Last receipt"),
];

/// The inventory page table. Header clicks re-sort through the store;
/// row clicks open the cross-branch detail view.
#[component]
pub fn InventoryTable(on_select: Callback<InventoryItem>) -> impl IntoView {
    let store = use_dashboard();

    let sort_indicator = move |key: &'static str| {
        let sort = store.intent.get().sort;
        if sort.key != key {
            return view! { <span class="sort-indicator"></span> }.into_any();
        }
        let name = match sort.direction {
            SortDirection::Ascending => "arrow-up",
            SortDirection::Descending => "arrow-down",
        };
        view! { <span class="sort-indicator">{icon(name)}</span> }.into_any()
    };

    let is_empty = move || store.view.with(|v| v.items.is_empty());

    view! {
        <div class="inventory-table__wrap">
            <table class="inventory-table">
                <thead>
                    <tr>
                        {COLUMNS
                            .into_iter()
                            .map(|(key, label)| {
                                view! {
                                    <th
                                        class="inventory-table__sortable"
                                        on:click=move |_| {
                                            store.dispatch(FilterAction::ToggleSort(key.to_string()))
                                        }
                                    >
                                        {label}
                                        {move || sort_indicator(key)}
                                    </th>
                                }
                            })
                            .collect_view()}
                        <th>"Status"</th>
                        <th>"Branches"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.view.with(|v| v.items.clone())
                        key=|item| (item.id, item.part_number.clone(), item.branch.clone())
                        children=move |item| {
                            let row = item.clone();
                            let status_class = format!("status-badge status-badge--{}", item.status);
                            view! {
                                <tr
                                    class="inventory-table__row"
                                    on:click=move |_| on_select.run(row.clone())
                                >
                                    <td class="inventory-table__part">{item.part_number.clone()}</td>
                                    <td>{item.mfg_part_number.clone()}</td>
                                    <td class="inventory-table__description">
                                        {item.description.clone()}
                                    </td>
                                    <td>{item.branch.clone()}</td>
                                    <td class="num">
                                        {format_with_commas(item.quantity_on_hand as f64, 0)}
                                    </td>
                                    <td class="num">{format_currency(item.inventory_balance)}</td>
                                    <td class="num">
                                        {format_with_commas(item.ttm_qty_used as f64, 0)}
                                    </td>
                                    <td class="num">
                                        {format_with_commas(item.months_of_coverage, 1)}
                                    </td>
                                    <td>
                                        {item.last_receipt.as_deref().map(format_date).unwrap_or_default()}
                                    </td>
                                    <td>
                                        <span class=status_class>{item.status.clone()}</span>
                                    </td>
                                    <td>
                                        {item
                                            .multi_branch
                                            .then(|| {
                                                view! {
                                                    <span
                                                        class="multi-branch-badge"
                                                        title="Stocked at multiple branches"
                                                    >
                                                        {icon("building")}
                                                        {format!(" {}", item.branch_count)}
                                                    </span>
                                                }
                                            })}
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || is_empty() && !store.loading.get().any_loading()>
                <p class="inventory-table__empty">"No inventory matches the current filters."</p>
            </Show>
        </div>
    }
}
