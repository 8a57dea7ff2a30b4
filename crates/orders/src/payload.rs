//! Submission payloads, shaped exactly as the backend expects them.
//!
//! Prices travel as exact decimal strings; quantities as plain integers.
//! These types are produced by the validator only; a draft never serializes
//! directly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use stockdesk_core::{LocationId, ProductId, SupplierId};

/// `POST /purchase-orders` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePurchaseOrder {
    pub supplier_id: SupplierId,
    pub location_id: LocationId,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    pub items: Vec<PurchaseItemInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseItemInput {
    pub product_id: ProductId,
    pub ordered_qty: u32,
    /// `None` lets the backend substitute the product's list price.
    #[serde(with = "rust_decimal::serde::str_option")]
    pub unit_price: Option<Decimal>,
}

/// `POST /sales-orders` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSalesOrder {
    pub location_id: LocationId,
    pub order_date: NaiveDate,
    pub customer_name: Option<String>,
    pub items: Vec<SalesItemInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesItemInput {
    pub product_id: ProductId,
    pub quantity: u32,
}
