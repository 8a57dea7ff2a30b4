//! Stock level rows as returned by the stock-per-location endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockdesk_core::{LocationId, ProductId};

/// One `(product, location)` on-hand quantity row.
///
/// Quantity is non-negative by wire contract; the backend's triggers keep it
/// from going below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub quantity_on_hand: u32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}
