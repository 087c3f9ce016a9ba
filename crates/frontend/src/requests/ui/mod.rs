//! Request lifecycle pages: active cart plus the pending, completed and
//! cancelled sections for one request kind.

use leptos::prelude::*;
use leptos::task::spawn_local;

use contracts::orders::dto::OrderLine;
use contracts::transfers::dto::TransferLine;

use crate::cart::api::CartKind;
use crate::cart::ui::CartPanel;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::status_message::use_status;
use crate::system::session::context::use_session;

use super::api::{self, RequestSection, StatusChange};

/// Display-ready projection of one submitted request line.
#[derive(Clone, PartialEq)]
struct RequestRow {
    id: i64,
    part: String,
    description: String,
    quantity: i64,
    route: String,
    requested_by: String,
    requested_at: String,
}

impl RequestRow {
    fn from_order(line: OrderLine) -> Self {
        Self {
            id: line.order_request_id,
            part: line.mfg_part_number,
            description: line.item_description.unwrap_or_default(),
            quantity: line.quantity_requested,
            route: line.requesting_branch,
            requested_by: line.requested_by_user_email.unwrap_or_default(),
            requested_at: line
                .requested_at_utc
                .map(|t| format_datetime(&t))
                .unwrap_or_default(),
        }
    }

    fn from_transfer(line: TransferLine) -> Self {
        Self {
            id: line.transfer_request_id,
            part: line.mfg_part_number,
            description: line.item_description.unwrap_or_default(),
            quantity: line.quantity_requested,
            route: format!("{} \u{2192} {}", line.source_branch, line.destination_branch),
            requested_by: line.requested_by_user_email,
            requested_at: line
                .requested_at
                .map(|t| format_datetime(&t))
                .unwrap_or_default(),
        }
    }
}

async fn fetch_rows(kind: CartKind, section: RequestSection) -> Result<Vec<RequestRow>, String> {
    match kind {
        CartKind::Orders => api::fetch_orders(section)
            .await
            .map(|lines| lines.into_iter().map(RequestRow::from_order).collect())
            .map_err(|e| e.to_string()),
        CartKind::Transfers => api::fetch_transfers(section)
            .await
            .map(|lines| lines.into_iter().map(RequestRow::from_transfer).collect())
            .map_err(|e| e.to_string()),
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Page-level reload stamps, one per lifecycle bucket, so a mutation in one
/// section can force the sections it affects to refetch.
#[derive(Clone, Copy)]
struct SectionRefresh {
    pending: RwSignal<u32>,
    completed: RwSignal<u32>,
    cancelled: RwSignal<u32>,
}

impl SectionRefresh {
    fn new() -> Self {
        Self {
            pending: RwSignal::new(0),
            completed: RwSignal::new(0),
            cancelled: RwSignal::new(0),
        }
    }

    fn stamp(self, section: RequestSection) -> RwSignal<u32> {
        match section {
            RequestSection::Pending => self.pending,
            RequestSection::Completed => self.completed,
            RequestSection::Cancelled => self.cancelled,
        }
    }

    fn bump(self, section: RequestSection) {
        self.stamp(section).update(|n| *n += 1);
    }
}

/// A status change removes the request from pending and lands it in the
/// target bucket, so both sections must refetch.
fn refresh_targets(change: StatusChange) -> [RequestSection; 2] {
    [RequestSection::Pending, change.target_section()]
}

/// One lifecycle page: the active cart on top, a list section per bucket
/// below. Sections fetch when the page mounts and on explicit refresh.
#[component]
pub fn RequestsPage(kind: CartKind) -> impl IntoView {
    let title = match kind {
        CartKind::Orders => "Order requests",
        CartKind::Transfers => "Transfer requests",
    };

    let refresh = SectionRefresh::new();

    view! {
        <div class="requests-page">
            <h2>{title}</h2>
            <CartPanel kind=kind />
            {RequestSection::ALL
                .into_iter()
                .map(|section| {
                    view! { <RequestListSection kind=kind section=section refresh=refresh /> }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn RequestListSection(
    kind: CartKind,
    section: RequestSection,
    refresh: SectionRefresh,
) -> impl IntoView {
    let session = use_session();
    let status = use_status();

    let rows = RwSignal::new(Vec::<RequestRow>::new());
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let load = move || {
        is_loading.set(true);
        error.set(None);
        spawn_local(async move {
            match fetch_rows(kind, section).await {
                Ok(fetched) => rows.set(fetched),
                Err(message) => {
                    log::error!("{} {} load failed: {}", section.label(), kind.label(), message);
                    rows.set(Vec::new());
                    error.set(Some(message));
                }
            }
            is_loading.set(false);
        });
    };

    // Loads on mount and again whenever this section's stamp is bumped.
    let stamp = refresh.stamp(section);
    Effect::new(move |_| {
        stamp.get();
        load();
    });

    let change_status = move |id: i64, change: StatusChange| {
        if !confirm(&format!("{}?", change.label())) {
            return;
        }
        spawn_local(async move {
            match api::update_status(kind, id, change).await {
                Ok(()) => {
                    status.success(format!("Request {} {}", id, change.wire().to_lowercase()));
                    for affected in refresh_targets(change) {
                        refresh.bump(affected);
                    }
                }
                Err(e) => {
                    log::error!("Status update for {} failed: {}", id, e);
                    status.error(format!("Could not update request: {}", e));
                }
            }
        });
    };

    let delete = move |id: i64| {
        if !confirm("Delete this request?") {
            return;
        }
        spawn_local(async move {
            match api::delete_request(kind, id).await {
                Ok(()) => {
                    status.success(format!("Request {} deleted", id));
                    load();
                }
                Err(e) => {
                    log::error!("Delete of {} failed: {}", id, e);
                    status.error(format!("Could not delete request: {}", e));
                }
            }
        });
    };

    let can_edit = move || session.with(|s| s.can_edit());
    let is_pending = section == RequestSection::Pending;

    view! {
        <div class="request-section">
            <div class="request-section__header">
                <h3>{section.label()}</h3>
                <button class="btn-icon" title="Refresh" on:click=move |_| load()>
                    {icon("refresh")}
                </button>
            </div>

            <Show when=move || error.get().is_some()>
                <div class="request-section__error">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! { <p class="request-section__loading">"Loading\u{2026}"</p> }
            >
                <Show
                    when=move || !rows.with(|r| r.is_empty())
                    fallback=move || {
                        view! {
                            <p class="request-section__empty">
                                {format!("No {} requests.", section.label().to_lowercase())}
                            </p>
                        }
                    }
                >
                    <table class="request-table">
                        <thead>
                            <tr>
                                <th>"Part"</th>
                                <th>"Description"</th>
                                <th>{if kind == CartKind::Orders { "Branch" } else { "Route" }}</th>
                                <th>"Qty"</th>
                                <th>"Requested by"</th>
                                <th>"Requested"</th>
                                {is_pending.then(|| view! { <th></th> })}
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || rows.get()
                                key=|row| row.id
                                children=move |row| {
                                    let id = row.id;
                                    view! {
                                        <tr>
                                            <td class="request-table__part">{row.part}</td>
                                            <td>{row.description}</td>
                                            <td>{row.route}</td>
                                            <td>{row.quantity}</td>
                                            <td>{row.requested_by}</td>
                                            <td>{row.requested_at}</td>
                                            {is_pending
                                                .then(|| {
                                                    view! {
                                                        <td class="request-table__actions">
                                                            <button
                                                                class="btn-icon"
                                                                title=StatusChange::Complete.label()
                                                                disabled=move || !can_edit()
                                                                on:click=move |_| change_status(id, StatusChange::Complete)
                                                            >
                                                                {icon("check")}
                                                            </button>
                                                            <button
                                                                class="btn-icon"
                                                                title=StatusChange::Cancel.label()
                                                                disabled=move || !can_edit()
                                                                on:click=move |_| change_status(id, StatusChange::Cancel)
                                                            >
                                                                {icon("x")}
                                                            </button>
                                                            <button
                                                                class="btn-icon"
                                                                title="Delete"
                                                                disabled=move || !can_edit()
                                                                on:click=move |_| delete(id)
                                                            >
                                                                {icon("trash")}
                                                            </button>
                                                        </td>
                                                    }
                                                })}
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_change_refreshes_pending_and_target_bucket() {
        assert_eq!(
            refresh_targets(StatusChange::Complete),
            [RequestSection::Pending, RequestSection::Completed]
        );
        assert_eq!(
            refresh_targets(StatusChange::Cancel),
            [RequestSection::Pending, RequestSection::Cancelled]
        );
    }
}
