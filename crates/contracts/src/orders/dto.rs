use anyhow::bail;
use serde::{Deserialize, Serialize};

/// One order request line as the server returns it, both for the active cart
/// (`GET /active-orders`) and for the lifecycle lists
/// (`/pending-orders`, `/completed-orders`, `/cancelled-orders`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default)]
    pub order_request_id: i64,
    #[serde(default)]
    pub mfg_part_number: String,
    #[serde(default)]
    pub internal_part_number: Option<String>,
    #[serde(default)]
    pub item_description: Option<String>,
    #[serde(default)]
    pub quantity_requested: i64,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub requesting_branch: String,
    #[serde(default)]
    pub requested_by_user_email: Option<String>,
    #[serde(default)]
    pub requested_at_utc: Option<String>,
    #[serde(default)]
    pub last_modified_at_utc: Option<String>,
    #[serde(default)]
    pub order_status: String,
}

/// Body of `POST /active-orders/item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderLine {
    pub mfg_part_number: String,
    pub internal_part_number: Option<String>,
    pub item_description: Option<String>,
    pub quantity_requested: i64,
    pub vendor_name: Option<String>,
    pub notes: Option<String>,
    pub requesting_branch: String,
    pub requested_by_user_email: Option<String>,
}

impl NewOrderLine {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.mfg_part_number.trim().is_empty() {
            bail!("Manufacturer part number is required");
        }
        if self.requesting_branch.trim().is_empty() {
            bail!("Requesting branch is required");
        }
        if self.quantity_requested < 1 {
            bail!("Quantity must be at least 1");
        }
        Ok(())
    }
}

/// Body of `PUT /active-orders/item/{id}/quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderQuantityUpdate {
    pub quantity: i64,
    pub user_email: String,
}

/// Body of `PUT /order-request/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub new_status: String,
}

/// Response of `POST /submit-active-orders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersSubmitResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub order_request_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_line() -> NewOrderLine {
        NewOrderLine {
            mfg_part_number: "AB-100".to_string(),
            internal_part_number: Some("100200".to_string()),
            item_description: Some("Bearing".to_string()),
            quantity_requested: 2,
            vendor_name: Some("Acme".to_string()),
            notes: None,
            requesting_branch: "Dallas".to_string(),
            requested_by_user_email: Some("user@example.com".to_string()),
        }
    }

    #[test]
    fn test_validate_accepts_complete_line() {
        assert!(valid_line().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut line = valid_line();
        line.quantity_requested = 0;
        assert!(line.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_part_number() {
        let mut line = valid_line();
        line.mfg_part_number = "  ".to_string();
        assert!(line.validate().is_err());
    }

    #[test]
    fn test_order_line_tolerates_missing_fields() {
        let line: OrderLine = serde_json::from_str("{\"order_request_id\": 7}").unwrap();
        assert_eq!(line.order_request_id, 7);
        assert_eq!(line.quantity_requested, 0);
        assert!(line.vendor_name.is_none());
    }
}
