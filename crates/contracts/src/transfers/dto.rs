use anyhow::bail;
use serde::{Deserialize, Serialize};

/// One transfer request line as the server returns it, for the active cart
/// and for the lifecycle lists. Unlike orders, the transfer timestamps come
/// without the `_utc` suffix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferLine {
    #[serde(default)]
    pub transfer_request_id: i64,
    #[serde(default)]
    pub mfg_part_number: String,
    #[serde(default)]
    pub internal_part_number: Option<String>,
    #[serde(default)]
    pub item_description: Option<String>,
    #[serde(default)]
    pub quantity_requested: i64,
    #[serde(default)]
    pub source_branch: String,
    #[serde(default)]
    pub destination_branch: String,
    #[serde(default)]
    pub requested_by_user_email: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub requested_at: Option<String>,
    #[serde(default)]
    pub last_modified_at: Option<String>,
}

/// Body of `POST /active-transfers/item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransferLine {
    pub mfg_part_number: String,
    pub internal_part_number: Option<String>,
    pub item_description: Option<String>,
    pub quantity_requested: i64,
    pub source_branch: String,
    pub destination_branch: String,
    pub requested_by_user_email: String,
    pub notes: Option<String>,
}

impl NewTransferLine {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.mfg_part_number.trim().is_empty() {
            bail!("Manufacturer part number is required");
        }
        if self.source_branch.trim().is_empty() {
            bail!("Source branch is required");
        }
        if self.destination_branch.trim().is_empty() {
            bail!("Destination branch is required");
        }
        if self.source_branch == self.destination_branch {
            bail!("Source and destination branch must differ");
        }
        if self.quantity_requested < 1 {
            bail!("Quantity must be at least 1");
        }
        Ok(())
    }
}

/// Body of `PUT /active-transfers/item/{id}/quantity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferQuantityUpdate {
    pub new_quantity: i64,
}

/// Body of `PUT /transfer-request/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferStatusUpdate {
    pub new_status: String,
}

/// Response of `POST /submit-active-transfers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransfersSubmitResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub transfer_request_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_line() -> NewTransferLine {
        NewTransferLine {
            mfg_part_number: "AB-100".to_string(),
            internal_part_number: None,
            item_description: Some("Bearing".to_string()),
            quantity_requested: 1,
            source_branch: "Dallas".to_string(),
            destination_branch: "Houston".to_string(),
            requested_by_user_email: "user@example.com".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_validate_accepts_complete_line() {
        assert!(valid_line().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_same_branch() {
        let mut line = valid_line();
        line.destination_branch = "Dallas".to_string();
        assert!(line.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut line = valid_line();
        line.quantity_requested = 0;
        assert!(line.validate().is_err());
    }
}
