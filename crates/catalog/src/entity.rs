//! Fetched master-data entities, shaped as the list endpoints return them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockdesk_core::{CategoryId, LocationId, ProductId, SupplierId};

use crate::status::{EntityStatus, LocationKind};

/// Product read model.
///
/// `unit_price` is the list price used for sales lines and as the default
/// for purchase lines; it is a backend DECIMAL, carried as an exact string
/// on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub category: CategoryId,
    #[serde(default)]
    pub category_name: Option<String>,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    pub unit_of_measure: String,
    pub reorder_level: u32,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Label used in pickers: `Name (SKU)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.sku)
    }
}

/// Stock location read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub location_id: LocationId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    #[serde(default)]
    pub address: Option<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
}

/// Supplier read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: SupplierId,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
}

/// Category read model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: EntityStatus,
}
