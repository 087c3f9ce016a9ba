//! Cart context: server-held state with a refetch-after-mutate discipline.
//!
//! The server owns the cart. Every mutation goes to the API and is
//! followed by a full reload of the affected cart, never an optimistic
//! local edit, so the rendered lines are always what the server holds.
//! Outcomes are reported through the shared status channel.

use leptos::prelude::*;
use leptos::task::spawn_local;

use contracts::orders::dto::{NewOrderLine, OrderLine};
use contracts::transfers::dto::{NewTransferLine, TransferLine};

use crate::shared::status_message::StatusChannel;

use super::api::{self, CartKind};

#[derive(Clone, Copy)]
pub struct CartStore {
    pub orders: RwSignal<Vec<OrderLine>>,
    pub transfers: RwSignal<Vec<TransferLine>>,
    pub is_loading: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    status: StatusChannel,
}

impl CartStore {
    pub fn new(status: StatusChannel) -> Self {
        Self {
            orders: RwSignal::new(Vec::new()),
            transfers: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
            status,
        }
    }

    pub fn line_count(&self, kind: CartKind) -> usize {
        match kind {
            CartKind::Orders => self.orders.with(|o| o.len()),
            CartKind::Transfers => self.transfers.with(|t| t.len()),
        }
    }

    pub fn total_lines(&self) -> usize {
        self.line_count(CartKind::Orders) + self.line_count(CartKind::Transfers)
    }

    /// Reload both carts from the server. A failed leg empties that cart
    /// and logs; the other cart still loads.
    pub fn load(&self, email: String) {
        let store = *self;
        store.is_loading.set(true);
        spawn_local(async move {
            match api::fetch_active_orders(&email).await {
                Ok(lines) => store.orders.set(lines),
                Err(e) => {
                    log::error!("Active orders load failed: {}", e);
                    store.orders.set(Vec::new());
                }
            }
            match api::fetch_active_transfers(&email).await {
                Ok(lines) => store.transfers.set(lines),
                Err(e) => {
                    log::error!("Active transfers load failed: {}", e);
                    store.transfers.set(Vec::new());
                }
            }
            store.is_loading.set(false);
        });
    }

    async fn reload(self, kind: CartKind, email: &str) {
        match kind {
            CartKind::Orders => match api::fetch_active_orders(email).await {
                Ok(lines) => self.orders.set(lines),
                Err(e) => log::error!("Cart refetch failed: {}", e),
            },
            CartKind::Transfers => match api::fetch_active_transfers(email).await {
                Ok(lines) => self.transfers.set(lines),
                Err(e) => log::error!("Cart refetch failed: {}", e),
            },
        }
    }

    pub fn add_order(&self, line: NewOrderLine, email: String) {
        if let Err(e) = line.validate() {
            self.status.error(e.to_string());
            return;
        }
        let store = *self;
        spawn_local(async move {
            match api::add_order_line(&line).await {
                Ok(()) => {
                    store.status.success(format!(
                        "Added {} to the order cart",
                        line.mfg_part_number
                    ));
                    store.reload(CartKind::Orders, &email).await;
                }
                Err(e) => {
                    log::error!("Add order line failed: {}", e);
                    store.status.error(format!("Could not add to order cart: {}", e));
                }
            }
        });
    }

    pub fn add_transfer(&self, line: NewTransferLine, email: String) {
        if let Err(e) = line.validate() {
            self.status.error(e.to_string());
            return;
        }
        let store = *self;
        spawn_local(async move {
            match api::add_transfer_line(&line).await {
                Ok(()) => {
                    store.status.success(format!(
                        "Added {} to the transfer cart",
                        line.mfg_part_number
                    ));
                    store.reload(CartKind::Transfers, &email).await;
                }
                Err(e) => {
                    log::error!("Add transfer line failed: {}", e);
                    store
                        .status
                        .error(format!("Could not add to transfer cart: {}", e));
                }
            }
        });
    }

    pub fn remove_line(&self, kind: CartKind, id: i64, email: String) {
        let store = *self;
        spawn_local(async move {
            match api::remove_line(kind, id, &email).await {
                Ok(()) => store.reload(kind, &email).await,
                Err(e) => {
                    log::error!("Remove {} line failed: {}", kind.label(), e);
                    store.status.error(format!("Could not remove item: {}", e));
                }
            }
        });
    }

    pub fn update_quantity(&self, kind: CartKind, id: i64, quantity: i64, email: String) {
        if quantity < 1 {
            self.status.error("Quantity must be at least 1".to_string());
            return;
        }
        let store = *self;
        spawn_local(async move {
            let outcome = match kind {
                CartKind::Orders => api::update_order_quantity(id, quantity, &email).await,
                CartKind::Transfers => api::update_transfer_quantity(id, quantity, &email).await,
            };
            match outcome {
                Ok(()) => store.reload(kind, &email).await,
                Err(e) => {
                    log::error!("Quantity update failed: {}", e);
                    store.status.error(format!("Could not update quantity: {}", e));
                }
            }
        });
    }

    pub fn clear(&self, kind: CartKind, email: String) {
        let store = *self;
        spawn_local(async move {
            match api::clear_cart(kind, &email).await {
                Ok(()) => {
                    store.status.success(format!("Cleared the {} cart", kind.label()));
                    store.reload(kind, &email).await;
                }
                Err(e) => {
                    log::error!("Clear {} cart failed: {}", kind.label(), e);
                    store.status.error(format!("Could not clear cart: {}", e));
                }
            }
        });
    }

    /// Finalize the cart into persisted requests. `is_submitting` gates
    /// the submit control while the call is in flight.
    pub fn submit(&self, kind: CartKind, email: String) {
        if self.is_submitting.get_untracked() {
            return;
        }
        let store = *self;
        store.is_submitting.set(true);
        spawn_local(async move {
            let outcome = match kind {
                CartKind::Orders => api::submit_orders(&email).await.map(|r| r.message),
                CartKind::Transfers => api::submit_transfers(&email).await.map(|r| r.message),
            };
            match outcome {
                Ok(message) => {
                    let text = if message.is_empty() {
                        format!("Submitted {} requests", kind.label())
                    } else {
                        message
                    };
                    log::info!("{}", text);
                    store.status.success(text);
                    store.reload(kind, &email).await;
                }
                Err(e) => {
                    log::error!("Submit {} cart failed: {}", kind.label(), e);
                    store.status.error(format!("Submission failed: {}", e));
                }
            }
            store.is_submitting.set(false);
        });
    }
}

pub fn provide_cart_store(status: StatusChannel) -> CartStore {
    let store = CartStore::new(status);
    provide_context(store);
    store
}

pub fn use_cart() -> CartStore {
    use_context::<CartStore>().expect("CartStore should be provided at the app root")
}
