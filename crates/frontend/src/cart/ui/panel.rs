use leptos::prelude::*;

use crate::cart::api::CartKind;
use crate::cart::state::use_cart;
use crate::shared::icons::icon;
use crate::system::session::context::use_session;

/// Active cart for one request kind: line list with editable quantities,
/// plus the clear and submit controls. The rendered lines always mirror
/// the server; edits round-trip through it.
#[component]
pub fn CartPanel(kind: CartKind) -> impl IntoView {
    let cart = use_cart();
    let session = use_session();

    let email = move || session.with(|s| s.email().map(String::from));
    let can_edit = move || session.with(|s| s.can_edit());
    let count = move || cart.line_count(kind);
    let is_empty = move || count() == 0;

    let on_clear = move |_| {
        if let Some(email) = email() {
            cart.clear(kind, email);
        }
    };
    let on_submit = move |_| {
        if let Some(email) = email() {
            cart.submit(kind, email);
        }
    };

    let lines = move || match kind {
        CartKind::Orders => cart
            .orders
            .get()
            .into_iter()
            .map(|line| CartLineRow {
                id: line.order_request_id,
                part: line.mfg_part_number,
                description: line.item_description.unwrap_or_default(),
                quantity: line.quantity_requested,
                route: line.requesting_branch,
            })
            .collect::<Vec<_>>(),
        CartKind::Transfers => cart
            .transfers
            .get()
            .into_iter()
            .map(|line| CartLineRow {
                id: line.transfer_request_id,
                part: line.mfg_part_number,
                description: line.item_description.unwrap_or_default(),
                quantity: line.quantity_requested,
                route: format!("{} \u{2192} {}", line.source_branch, line.destination_branch),
            })
            .collect::<Vec<_>>(),
    };

    view! {
        <div class="cart-panel">
            <div class="cart-panel__header">
                <h3>
                    {icon("cart")}
                    {move || format!(" Active {} cart ({})", kind.label(), count())}
                </h3>
            </div>

            <Show
                when=move || !is_empty()
                fallback=move || view! { <p class="cart-panel__empty">"Cart is empty."</p> }
            >
                <table class="cart-table">
                    <thead>
                        <tr>
                            <th>"Part"</th>
                            <th>"Description"</th>
                            <th>{if kind == CartKind::Orders { "Branch" } else { "Route" }}</th>
                            <th>"Qty"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=lines
                            key=|line| line.id
                            children=move |line| {
                                let id = line.id;
                                view! {
                                    <tr>
                                        <td class="cart-table__part">{line.part}</td>
                                        <td>{line.description}</td>
                                        <td>{line.route}</td>
                                        <td>
                                            <input
                                                type="number"
                                                min="1"
                                                class="cart-table__qty"
                                                value=line.quantity.to_string()
                                                disabled=move || !can_edit()
                                                on:change=move |ev| {
                                                    if let (Some(email), Ok(qty)) = (
                                                        session.with_untracked(|s| s.email().map(String::from)),
                                                        event_target_value(&ev).trim().parse::<i64>(),
                                                    ) {
                                                        cart.update_quantity(kind, id, qty, email);
                                                    }
                                                }
                                            />
                                        </td>
                                        <td>
                                            <button
                                                class="btn-icon"
                                                title="Remove"
                                                disabled=move || !can_edit()
                                                on:click=move |_| {
                                                    if let Some(email) =
                                                        session.with_untracked(|s| s.email().map(String::from))
                                                    {
                                                        cart.remove_line(kind, id, email);
                                                    }
                                                }
                                            >
                                                {icon("trash")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <div class="cart-panel__actions">
                <button
                    on:click=on_clear
                    disabled=move || is_empty() || !can_edit()
                >
                    "Clear cart"
                </button>
                <button
                    class="btn-primary"
                    on:click=on_submit
                    disabled=move || {
                        is_empty() || !can_edit() || cart.is_submitting.get()
                    }
                >
                    {move || {
                        if cart.is_submitting.get() {
                            "Submitting\u{2026}".to_string()
                        } else {
                            format!("Submit {} requests", kind.label())
                        }
                    }}
                </button>
            </div>
        </div>
    }
}

#[derive(Clone)]
struct CartLineRow {
    id: i64,
    part: String,
    description: String,
    quantity: i64,
    route: String,
}
