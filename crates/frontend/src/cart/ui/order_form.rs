use leptos::prelude::*;

use contracts::inventory::item::InventoryItem;
use contracts::orders::dto::NewOrderLine;

use crate::cart::state::use_cart;
use crate::system::session::context::use_session;

/// Add-to-order-cart form, prefilled from the selected inventory row.
#[component]
pub fn OrderForm(item: InventoryItem, on_done: Callback<()>) -> impl IntoView {
    let cart = use_cart();
    let session = use_session();

    let (quantity, set_quantity) = signal("1".to_string());
    let (vendor, set_vendor) = signal(item.mfg_name.clone());
    let (notes, set_notes) = signal(String::new());

    let part_number = item.mfg_part_number.clone();
    let internal_part = item.part_number.clone();
    let description = item.description.clone();
    let branch = item.branch.clone();
    let title_part = part_number.clone();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let email = match session.with_untracked(|s| s.email().map(String::from)) {
            Some(email) => email,
            None => return,
        };
        let line = NewOrderLine {
            mfg_part_number: part_number.clone(),
            internal_part_number: Some(internal_part.clone()).filter(|p| !p.is_empty()),
            item_description: Some(description.clone()).filter(|d| !d.is_empty()),
            quantity_requested: quantity.get().trim().parse().unwrap_or(0),
            vendor_name: Some(vendor.get().trim().to_string()).filter(|v| !v.is_empty()),
            notes: Some(notes.get().trim().to_string()).filter(|n| !n.is_empty()),
            requesting_branch: branch.clone(),
            requested_by_user_email: Some(email.clone()),
        };
        cart.add_order(line, email);
        on_done.run(());
    };

    view! {
        <form class="cart-form" on:submit=on_submit>
            <h4>"Order " {title_part}</h4>
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
                <label>"Vendor"</label>
                <input
                    type="text"
                    value=move || vendor.get()
                    on:input=move |ev| set_vendor.set(event_target_value(&ev))
                />
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
                <button type="submit" class="btn-primary">"Add to order cart"</button>
                <button type="button" on:click=move |_| on_done.run(())>"Cancel"</button>
            </div>
        </form>
    }
}
