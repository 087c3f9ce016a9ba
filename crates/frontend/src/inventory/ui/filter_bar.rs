use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::inventory::intent::{AdvancedFilter, FilterAction};
use crate::inventory::store::use_dashboard;
use crate::shared::icons::icon;

/// Filter row: entity/branch dropdowns, search box, network status filter
/// and the advanced multi-entity panel. Single-select and advanced scope
/// are mutually exclusive; the reducer enforces it, this just renders it.
#[component]
pub fn FilterBar() -> impl IntoView {
    let store = use_dashboard();
    let filters = store.filters();

    let (search_draft, set_search_draft) = signal(String::new());
    let panel_open = RwSignal::new(false);

    let selected_entity = move || filters.with(|f| f.entity.clone().unwrap_or_default());
    let selected_branch = move || filters.with(|f| f.branch.clone().unwrap_or_default());

    // Distinct companyStatus values seen on the current page feed the
    // network status dropdown.
    let network_statuses = move || {
        store.view.with(|v| {
            v.items
                .iter()
                .filter_map(|i| i.company_status.clone())
                .filter(|s| !s.is_empty())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect::<Vec<_>>()
        })
    };

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        store.dispatch(FilterAction::SubmitSearch(search_draft.get()));
    };

    let advanced_active = move || filters.with(|f| f.advanced.is_some());

    view! {
        <div class="filter-bar">
            <select
                class="filter-bar__entity"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    store.dispatch(FilterAction::SetEntity(
                        Some(value).filter(|v| !v.is_empty()),
                    ));
                }
            >
                <option value="" selected=move || selected_entity().is_empty()>
                    "All entities"
                </option>
                <For
                    each=move || store.entities.get()
                    key=|entity| entity.clone()
                    children=move |entity| {
                        let value = entity.clone();
                        let check = entity.clone();
                        view! {
                            <option value=value selected=move || selected_entity() == check>
                                {entity.clone()}
                            </option>
                        }
                    }
                />
            </select>

            <select
                class="filter-bar__branch"
                disabled=move || filters.with(|f| f.entity.is_none())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    store.dispatch(FilterAction::SetBranch(
                        Some(value).filter(|v| !v.is_empty()),
                    ));
                }
            >
                <option value="" selected=move || selected_branch().is_empty()>
                    "All branches"
                </option>
                <For
                    each=move || store.branches_for_selected()
                    key=|branch| branch.clone()
                    children=move |branch| {
                        let value = branch.clone();
                        let check = branch.clone();
                        view! {
                            <option value=value selected=move || selected_branch() == check>
                                {branch.clone()}
                            </option>
                        }
                    }
                />
            </select>

            <form class="filter-bar__search" on:submit=on_search>
                <input
                    type="text"
                    placeholder="Search part number or description"
                    value=move || search_draft.get()
                    on:input=move |ev| set_search_draft.set(event_target_value(&ev))
                />
                <button type="submit" title="Search">{icon("search")}</button>
            </form>

            <select
                class="filter-bar__network-status"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    store.dispatch(FilterAction::SetNetworkStatus(
                        Some(value).filter(|v| !v.is_empty()),
                    ));
                }
            >
                <option value="">"Any network status"</option>
                <For
                    each=network_statuses
                    key=|status| status.clone()
                    children=move |status| {
                        let value = status.clone();
                        let check = status.clone();
                        view! {
                            <option
                                value=value
                                selected=move || {
                                    filters.with(|f| f.network_status.as_deref() == Some(check.as_str()))
                                }
                            >
                                {status.clone()}
                            </option>
                        }
                    }
                />
            </select>

            <button
                class="filter-bar__advanced-toggle"
                class:active=advanced_active
                on:click=move |_| panel_open.update(|open| *open = !*open)
            >
                {icon("filter")}
                " Advanced"
            </button>

            <button
                class="filter-bar__clear"
                on:click=move |_| {
                    set_search_draft.set(String::new());
                    store.dispatch(FilterAction::ClearAll);
                }
            >
                "Clear"
            </button>

            <Show when=move || panel_open.get()>
                <AdvancedFilterPanel on_close=Callback::new(move |()| panel_open.set(false)) />
            </Show>
        </div>
    }
}

/// Multi-entity/branch selection panel. Edits accumulate in a local draft
/// and reach the store only on apply.
#[component]
fn AdvancedFilterPanel(on_close: Callback<()>) -> impl IntoView {
    let store = use_dashboard();
    let draft = RwSignal::new(
        store
            .filters()
            .with_untracked(|f| f.advanced.clone())
            .unwrap_or_default(),
    );

    let toggle_entity = move |entity: String| {
        draft.update(|d| {
            if let Some(pos) = d.selected_entities.iter().position(|e| *e == entity) {
                d.selected_entities.remove(pos);
                d.selected_branches.remove(&entity);
            } else {
                d.selected_entities.push(entity);
            }
        });
    };

    let toggle_branch = move |entity: String, branch: String| {
        draft.update(|d| {
            let branches = d.selected_branches.entry(entity).or_default();
            if let Some(pos) = branches.iter().position(|b| *b == branch) {
                branches.remove(pos);
            } else {
                branches.push(branch);
            }
        });
    };

    view! {
        <div class="advanced-panel">
            <div class="advanced-panel__header">
                <h4>"Advanced filter"</h4>
                <button class="btn-icon" title="Close" on:click=move |_| on_close.run(())>
                    {icon("x")}
                </button>
            </div>

            <label class="advanced-panel__all-branches">
                <input
                    type="checkbox"
                    checked=move || draft.with(|d| d.show_all_branches)
                    on:change=move |_| draft.update(|d| d.show_all_branches = !d.show_all_branches)
                />
                "All branches of the selected entities"
            </label>

            <div class="advanced-panel__entities">
                <For
                    each=move || store.entities.get()
                    key=|entity| entity.clone()
                    children=move |entity| {
                        let check = entity.clone();
                        let toggle = entity.clone();
                        let branch_entity = entity.clone();
                        let entity_selected =
                            move || draft.with(|d| d.selected_entities.contains(&check));
                        let show_branches = {
                            let selected = entity_selected.clone();
                            move || selected() && !draft.with(|d| d.show_all_branches)
                        };
                        view! {
                            <div class="advanced-panel__entity">
                                <label>
                                    <input
                                        type="checkbox"
                                        checked=entity_selected.clone()
                                        on:change=move |_| toggle_entity(toggle.clone())
                                    />
                                    {entity.clone()}
                                </label>
                                <Show when=show_branches>
                                    {
                                        let branch_entity = branch_entity.clone();
                                        view! {
                                            <div class="advanced-panel__branches">
                                                <For
                                                    each={
                                                        let entity = branch_entity.clone();
                                                        move || {
                                                            store.entity_branches.with(|map| {
                                                                map.get(&entity).cloned().unwrap_or_default()
                                                            })
                                                        }
                                                    }
                                                    key=|branch| branch.clone()
                                                    children={
                                                        let entity = branch_entity.clone();
                                                        move |branch| {
                                                            let entity = entity.clone();
                                                            let check_entity = entity.clone();
                                                            let check = branch.clone();
                                                            let toggle = branch.clone();
                                                            view! {
                                                                <label class="advanced-panel__branch">
                                                                    <input
                                                                        type="checkbox"
                                                                        checked=move || {
                                                                            draft.with(|d| {
                                                                                d.selected_branches
                                                                                    .get(&check_entity)
                                                                                    .map(|b| b.contains(&check))
                                                                                    .unwrap_or(false)
                                                                            })
                                                                        }
                                                                        on:change=move |_| {
                                                                            toggle_branch(entity.clone(), toggle.clone())
                                                                        }
                                                                    />
                                                                    {branch.clone()}
                                                                </label>
                                                            }
                                                        }
                                                    }
                                                />
                                            </div>
                                        }
                                    }
                                </Show>
                            </div>
                        }
                    }
                />
            </div>

            <div class="advanced-panel__actions">
                <button
                    on:click=move |_| {
                        draft.set(AdvancedFilter::default());
                        store.dispatch(FilterAction::ClearAdvanced);
                    }
                >
                    "Reset"
                </button>
                <button
                    class="btn-primary"
                    on:click=move |_| {
                        store.dispatch(FilterAction::ApplyAdvanced(draft.get()));
                        on_close.run(());
                    }
                >
                    "Apply"
                </button>
            </div>
        </div>
    }
}
