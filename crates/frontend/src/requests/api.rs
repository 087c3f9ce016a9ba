//! Request lifecycle endpoints: the pending/completed/cancelled lists and
//! the per-request status and delete operations.

use serde_json::Value;

use contracts::orders::dto::{OrderLine, OrderStatusUpdate};
use contracts::transfers::dto::{TransferLine, TransferStatusUpdate};

use crate::cart::api::CartKind;
use crate::shared::api_utils::{self, ApiError};

/// Lifecycle buckets a submitted request moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSection {
    Pending,
    Completed,
    Cancelled,
}

impl RequestSection {
    pub const ALL: [RequestSection; 3] = [
        RequestSection::Pending,
        RequestSection::Completed,
        RequestSection::Cancelled,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            RequestSection::Pending => "pending",
            RequestSection::Completed => "completed",
            RequestSection::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestSection::Pending => "Pending",
            RequestSection::Completed => "Completed",
            RequestSection::Cancelled => "Cancelled",
        }
    }
}

/// Target status for a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Complete,
    Cancel,
}

impl StatusChange {
    /// Wire value for the status update payload. The server validates the
    /// exact capitalized strings and rejects anything else with a 400.
    pub fn wire(self) -> &'static str {
        match self {
            StatusChange::Complete => "Completed",
            StatusChange::Cancel => "Cancelled",
        }
    }

    /// Lifecycle bucket the request lands in after this change.
    pub fn target_section(self) -> RequestSection {
        match self {
            StatusChange::Complete => RequestSection::Completed,
            StatusChange::Cancel => RequestSection::Cancelled,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusChange::Complete => "Mark completed",
            StatusChange::Cancel => "Cancel request",
        }
    }
}

pub fn list_path(kind: CartKind, section: RequestSection) -> String {
    let noun = match kind {
        CartKind::Orders => "orders",
        CartKind::Transfers => "transfers",
    };
    format!("/{}-{}", section.slug(), noun)
}

fn request_base(kind: CartKind) -> &'static str {
    match kind {
        CartKind::Orders => "order-request",
        CartKind::Transfers => "transfer-request",
    }
}

pub fn status_path(kind: CartKind, id: i64) -> String {
    format!("/{}/{}/status", request_base(kind), id)
}

pub fn delete_path(kind: CartKind, id: i64) -> String {
    format!("/{}/{}", request_base(kind), id)
}

pub async fn fetch_orders(section: RequestSection) -> Result<Vec<OrderLine>, ApiError> {
    let url = api_utils::api_url(&list_path(CartKind::Orders, section));
    api_utils::get_json(&url).await
}

pub async fn fetch_transfers(section: RequestSection) -> Result<Vec<TransferLine>, ApiError> {
    let url = api_utils::api_url(&list_path(CartKind::Transfers, section));
    api_utils::get_json(&url).await
}

pub async fn update_status(kind: CartKind, id: i64, change: StatusChange) -> Result<(), ApiError> {
    let url = api_utils::api_url(&status_path(kind, id));
    match kind {
        CartKind::Orders => {
            let body = OrderStatusUpdate {
                new_status: change.wire().to_string(),
            };
            api_utils::put_json::<_, Value>(&url, &body).await.map(|_| ())
        }
        CartKind::Transfers => {
            let body = TransferStatusUpdate {
                new_status: change.wire().to_string(),
            };
            api_utils::put_json::<_, Value>(&url, &body).await.map(|_| ())
        }
    }
}

pub async fn delete_request(kind: CartKind, id: i64) -> Result<(), ApiError> {
    let url = api_utils::api_url(&delete_path(kind, id));
    api_utils::delete(&url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_paths() {
        assert_eq!(list_path(CartKind::Orders, RequestSection::Pending), "/pending-orders");
        assert_eq!(
            list_path(CartKind::Orders, RequestSection::Completed),
            "/completed-orders"
        );
        assert_eq!(
            list_path(CartKind::Transfers, RequestSection::Cancelled),
            "/cancelled-transfers"
        );
    }

    #[test]
    fn test_request_paths() {
        assert_eq!(status_path(CartKind::Orders, 12), "/order-request/12/status");
        assert_eq!(status_path(CartKind::Transfers, 12), "/transfer-request/12/status");
        assert_eq!(delete_path(CartKind::Orders, 12), "/order-request/12");
        assert_eq!(delete_path(CartKind::Transfers, 3), "/transfer-request/3");
    }

    #[test]
    fn test_status_change_wire_values_are_capitalized() {
        assert_eq!(StatusChange::Complete.wire(), "Completed");
        assert_eq!(StatusChange::Cancel.wire(), "Cancelled");
    }

    #[test]
    fn test_status_change_target_section() {
        assert_eq!(
            StatusChange::Complete.target_section(),
            RequestSection::Completed
        );
        assert_eq!(StatusChange::Cancel.target_section(), RequestSection::Cancelled);
    }
}
