//! Inter-location stock transfers.
//!
//! The transfer itself is a backend operation; this module carries the form
//! draft, the request payload, and the receipt the backend returns with
//! resolved names and post-transfer quantities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockdesk_core::{DomainError, DomainResult, LocationId, ProductId, TransferId};

/// `POST /transfers` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreateTransfer {
    pub product_id: ProductId,
    pub from_location_id: LocationId,
    pub to_location_id: LocationId,
    pub quantity: u32,
}

/// Completed transfer as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReceipt {
    #[serde(default)]
    pub transfer_id: Option<TransferId>,
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: Option<String>,
    pub from_location_id: LocationId,
    #[serde(default)]
    pub from_location_name: Option<String>,
    pub to_location_id: LocationId,
    #[serde(default)]
    pub to_location_name: Option<String>,
    /// Signed on the wire (movement direction); use [`Self::quantity_moved`]
    /// for display.
    pub quantity: i64,
    #[serde(default, alias = "from_qty_after", alias = "from_quantity_after")]
    pub from_quantity_on_hand: Option<u32>,
    #[serde(default, alias = "to_qty_after", alias = "to_quantity_after")]
    pub to_quantity_on_hand: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TransferReceipt {
    pub fn quantity_moved(&self) -> u64 {
        self.quantity.unsigned_abs()
    }
}

/// Transfer form state before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferDraft {
    pub product_id: Option<ProductId>,
    pub from_location_id: Option<LocationId>,
    pub to_location_id: Option<LocationId>,
    pub quantity: Option<u32>,
}

impl TransferDraft {
    /// Keep the selections, clear the quantity (post-submit reset).
    pub fn reset_quantity(&mut self) {
        self.quantity = None;
    }

    pub fn validate(&self) -> DomainResult<CreateTransfer> {
        let (Some(product_id), Some(from_location_id), Some(to_location_id)) =
            (self.product_id, self.from_location_id, self.to_location_id)
        else {
            return Err(DomainError::validation(
                "Please select product and both locations.",
            ));
        };

        if from_location_id == to_location_id {
            return Err(DomainError::validation(
                "Source and destination locations must be different.",
            ));
        }

        let Some(quantity) = self.quantity.filter(|&qty| qty > 0) else {
            return Err(DomainError::validation(
                "Quantity must be a positive number.",
            ));
        };

        Ok(CreateTransfer {
            product_id,
            from_location_id,
            to_location_id,
            quantity,
        })
    }
}
