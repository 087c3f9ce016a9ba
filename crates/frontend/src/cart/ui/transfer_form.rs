use leptos::prelude::*;

use contracts::inventory::item::InventoryItem;
use contracts::transfers::dto::NewTransferLine;

use crate::cart::state::use_cart;
use crate::system::session::context::use_session;

/// Add-to-transfer-cart form. `source` is the branch row the part moves
/// from; `destinations` lists every branch it could move to.
#[component]
pub fn TransferForm(
    source: InventoryItem,
    destinations: Vec<String>,
    on_done: Callback<()>,
) -> impl IntoView {
    let cart = use_cart();
    let session = use_session();

    let source_branch = source.branch.clone();
    let options: Vec<String> = destinations
        .into_iter()
        .filter(|b| *b != source_branch)
        .collect();
    let first_destination = options.first().cloned().unwrap_or_default();

    let (quantity, set_quantity) = signal("1".to_string());
    let (destination, set_destination) = signal(first_destination);
    let (notes, set_notes) = signal(String::new());

    let part_number = source.mfg_part_number.clone();
    let internal_part = source.part_number.clone();
    let description = source.description.clone();
    let title_part = part_number.clone();
    let from_branch = source_branch.clone();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email = match session.with_untracked(|s| s.email().map(String::from)) {
            Some(email) => email,
            None => return,
        };
        let line = NewTransferLine {
            mfg_part_number: part_number.clone(),
            internal_part_number: Some(internal_part.clone()).filter(|p| !p.is_empty()),
            item_description: Some(description.clone()).filter(|d| !d.is_empty()),
            quantity_requested: quantity.get().trim().parse().unwrap_or(0),
            source_branch: source_branch.clone(),
            destination_branch: destination.get(),
            requested_by_user_email: email.clone(),
            notes: Some(notes.get().trim().to_string()).filter(|n| !n.is_empty()),
        };
        cart.add_transfer(line, email);
        on_done.run(());
    };

    view! {
        <form class="cart-form" on:submit=on_submit>
            <h4>"Transfer " {title_part} " from " {from_branch}</h4>
            <div class="form-group">
                <label>"Quantity"</label>
                <input
                    type="number"
                    min="1"
                    value=move || quantity.get()
                    on:input=move |ev| set_quantity.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label>"Destination branch"</label>
                <select on:change=move |ev| set_destination.set(event_target_value(&ev))>
                    {options
                        .iter()
                        .map(|branch| {
                            let value = branch.clone();
                            view! { <option value=value.clone()>{value.clone()}</option> }
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label>"Notes"</label>
                <input
                    type="text"
                    placeholder="Optional"
                    value=move || notes.get()
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                />
            </div>
            <div class="cart-form__actions">
                <button type="submit" class="btn-primary">"Add to transfer cart"</button>
                <button type="button" on:click=move |_| on_done.run(())>"Cancel"</button>
            </div>
        </form>
    }
}
