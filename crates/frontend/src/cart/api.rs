//! CartGateway endpoints.
//!
//! Every active-cart call is scoped to the signed-in user's email, and the
//! order and transfer carts share the same URL scheme. The quantity update
//! is the one asymmetry: orders carry the email in the body, transfers in
//! the query string.

use serde_json::Value;

use contracts::orders::dto::{NewOrderLine, OrderLine, OrderQuantityUpdate, OrdersSubmitResult};
use contracts::transfers::dto::{
    NewTransferLine, TransferLine, TransferQuantityUpdate, TransfersSubmitResult,
};

use crate::shared::api_utils::{self, ApiError};

/// Which active cart a call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartKind {
    Orders,
    Transfers,
}

impl CartKind {
    pub fn base(self) -> &'static str {
        match self {
            CartKind::Orders => "active-orders",
            CartKind::Transfers => "active-transfers",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CartKind::Orders => "order",
            CartKind::Transfers => "transfer",
        }
    }
}

fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

pub fn list_path(kind: CartKind, email: &str) -> String {
    format!("/{}?user_email={}", kind.base(), encode(email))
}

pub fn add_item_path(kind: CartKind) -> String {
    format!("/{}/item", kind.base())
}

pub fn remove_item_path(kind: CartKind, id: i64, email: &str) -> String {
    format!("/{}/item/{}?user_email={}", kind.base(), id, encode(email))
}

pub fn clear_path(kind: CartKind, email: &str) -> String {
    format!("/{}/all?user_email={}", kind.base(), encode(email))
}

pub fn submit_path(kind: CartKind, email: &str) -> String {
    format!("/submit-{}?user_email={}", kind.base(), encode(email))
}

pub fn quantity_path(kind: CartKind, id: i64, email: &str) -> String {
    match kind {
        CartKind::Orders => format!("/active-orders/item/{}/quantity", id),
        CartKind::Transfers => format!(
            "/active-transfers/item/{}/quantity?user_email={}",
            id,
            encode(email)
        ),
    }
}

pub async fn fetch_active_orders(email: &str) -> Result<Vec<OrderLine>, ApiError> {
    let url = api_utils::api_url(&list_path(CartKind::Orders, email));
    api_utils::get_json(&url).await
}

pub async fn fetch_active_transfers(email: &str) -> Result<Vec<TransferLine>, ApiError> {
    let url = api_utils::api_url(&list_path(CartKind::Transfers, email));
    api_utils::get_json(&url).await
}

pub async fn add_order_line(line: &NewOrderLine) -> Result<(), ApiError> {
    let url = api_utils::api_url(&add_item_path(CartKind::Orders));
    api_utils::post_json::<_, Value>(&url, line).await.map(|_| ())
}

pub async fn add_transfer_line(line: &NewTransferLine) -> Result<(), ApiError> {
    let url = api_utils::api_url(&add_item_path(CartKind::Transfers));
    api_utils::post_json::<_, Value>(&url, line).await.map(|_| ())
}

pub async fn remove_line(kind: CartKind, id: i64, email: &str) -> Result<(), ApiError> {
    let url = api_utils::api_url(&remove_item_path(kind, id, email));
    api_utils::delete(&url).await
}

pub async fn clear_cart(kind: CartKind, email: &str) -> Result<(), ApiError> {
    let url = api_utils::api_url(&clear_path(kind, email));
    api_utils::delete(&url).await
}

pub async fn update_order_quantity(id: i64, quantity: i64, email: &str) -> Result<(), ApiError> {
    let url = api_utils::api_url(&quantity_path(CartKind::Orders, id, email));
    let body = OrderQuantityUpdate {
        quantity,
        user_email: email.to_string(),
    };
    api_utils::put_json::<_, Value>(&url, &body).await.map(|_| ())
}

pub async fn update_transfer_quantity(id: i64, quantity: i64, email: &str) -> Result<(), ApiError> {
    let url = api_utils::api_url(&quantity_path(CartKind::Transfers, id, email));
    let body = TransferQuantityUpdate { new_quantity: quantity };
    api_utils::put_json::<_, Value>(&url, &body).await.map(|_| ())
}

pub async fn submit_orders(email: &str) -> Result<OrdersSubmitResult, ApiError> {
    let url = api_utils::api_url(&submit_path(CartKind::Orders, email));
    api_utils::post_empty(&url).await
}

pub async fn submit_transfers(email: &str) -> Result<TransfersSubmitResult, ApiError> {
    let url = api_utils::api_url(&submit_path(CartKind::Transfers, email));
    api_utils::post_empty(&url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path_encodes_email() {
        assert_eq!(
            list_path(CartKind::Orders, "buyer+x@example.com"),
            "/active-orders?user_email=buyer%2Bx%40example.com"
        );
        assert_eq!(
            list_path(CartKind::Transfers, "a@b.c"),
            "/active-transfers?user_email=a%40b.c"
        );
    }

    #[test]
    fn test_item_and_clear_paths() {
        assert_eq!(add_item_path(CartKind::Orders), "/active-orders/item");
        assert_eq!(add_item_path(CartKind::Transfers), "/active-transfers/item");
        assert_eq!(
            remove_item_path(CartKind::Orders, 42, "a@b.c"),
            "/active-orders/item/42?user_email=a%40b.c"
        );
        assert_eq!(
            clear_path(CartKind::Transfers, "a@b.c"),
            "/active-transfers/all?user_email=a%40b.c"
        );
    }

    #[test]
    fn test_submit_paths() {
        assert_eq!(
            submit_path(CartKind::Orders, "a@b.c"),
            "/submit-active-orders?user_email=a%40b.c"
        );
        assert_eq!(
            submit_path(CartKind::Transfers, "a@b.c"),
            "/submit-active-transfers?user_email=a%40b.c"
        );
    }

    #[test]
    fn test_quantity_path_asymmetry() {
        // orders carry the email in the request body
        assert_eq!(
            quantity_path(CartKind::Orders, 7, "a@b.c"),
            "/active-orders/item/7/quantity"
        );
        assert_eq!(
            quantity_path(CartKind::Transfers, 7, "a@b.c"),
            "/active-transfers/item/7/quantity?user_email=a%40b.c"
        );
    }
}
