//! Persisted orders and lifecycle classification.
//!
//! Order lifecycle is server-authoritative. This module reads persisted
//! state and answers two questions per order: how to describe it, and which
//! transition actions the view may offer. It gates actions client-side even
//! though the backend would reject an invalid transition anyway: offering a
//! dead button is a UI bug, not a server error.
//!
//! Purchase orders walk DRAFT → APPROVED → PARTIALLY_RECEIVED → CLOSED.
//! Sales orders walk DRAFT → CONFIRMED → PARTIALLY_SHIPPED → CLOSED, with
//! CANCELLED reachable from CONFIRMED only. Unknown status strings become
//! `Unrecognized`: displayed verbatim and offered no transitions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockdesk_core::{LocationId, ProductId, PurchaseOrderId, SalesOrderId, SupplierId, UserId};

/// Purchase order lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PurchaseOrderStatus {
    Draft,
    Approved,
    PartiallyReceived,
    Closed,
    Cancelled,
    Unrecognized(String),
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PurchaseOrderStatus::Draft => "DRAFT",
            PurchaseOrderStatus::Approved => "APPROVED",
            PurchaseOrderStatus::PartiallyReceived => "PARTIALLY_RECEIVED",
            PurchaseOrderStatus::Closed => "CLOSED",
            PurchaseOrderStatus::Cancelled => "CANCELLED",
            PurchaseOrderStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Closed | PurchaseOrderStatus::Cancelled
        )
    }

    /// Open = a recognized, non-terminal state.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Draft
                | PurchaseOrderStatus::Approved
                | PurchaseOrderStatus::PartiallyReceived
        )
    }
}

impl From<String> for PurchaseOrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DRAFT" => PurchaseOrderStatus::Draft,
            "APPROVED" => PurchaseOrderStatus::Approved,
            "PARTIALLY_RECEIVED" => PurchaseOrderStatus::PartiallyReceived,
            "CLOSED" => PurchaseOrderStatus::Closed,
            "CANCELLED" => PurchaseOrderStatus::Cancelled,
            _ => {
                tracing::warn!(status = %raw, "unrecognized purchase order status");
                PurchaseOrderStatus::Unrecognized(raw)
            }
        }
    }
}

impl From<PurchaseOrderStatus> for String {
    fn from(status: PurchaseOrderStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// Sales order lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SalesOrderStatus {
    Draft,
    Confirmed,
    PartiallyShipped,
    Closed,
    Cancelled,
    Unrecognized(String),
}

impl SalesOrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SalesOrderStatus::Draft => "DRAFT",
            SalesOrderStatus::Confirmed => "CONFIRMED",
            SalesOrderStatus::PartiallyShipped => "PARTIALLY_SHIPPED",
            SalesOrderStatus::Closed => "CLOSED",
            SalesOrderStatus::Cancelled => "CANCELLED",
            SalesOrderStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SalesOrderStatus::Closed | SalesOrderStatus::Cancelled
        )
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self,
            SalesOrderStatus::Draft
                | SalesOrderStatus::Confirmed
                | SalesOrderStatus::PartiallyShipped
        )
    }
}

impl From<String> for SalesOrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DRAFT" => SalesOrderStatus::Draft,
            "CONFIRMED" => SalesOrderStatus::Confirmed,
            "PARTIALLY_SHIPPED" => SalesOrderStatus::PartiallyShipped,
            "CLOSED" => SalesOrderStatus::Closed,
            "CANCELLED" => SalesOrderStatus::Cancelled,
            _ => {
                tracing::warn!(status = %raw, "unrecognized sales order status");
                SalesOrderStatus::Unrecognized(raw)
            }
        }
    }
}

impl From<SalesOrderStatus> for String {
    fn from(status: SalesOrderStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// One line of a persisted purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPurchaseOrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, alias = "product_sku")]
    pub sku: Option<String>,
    pub ordered_qty: u32,
    pub received_qty: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub line_total: Decimal,
}

impl PersistedPurchaseOrderItem {
    pub fn remaining_qty(&self) -> u32 {
        self.ordered_qty.saturating_sub(self.received_qty)
    }
}

/// Persisted purchase order with its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPurchaseOrder {
    pub po_id: PurchaseOrderId,
    pub supplier_id: SupplierId,
    #[serde(default)]
    pub supplier_name: Option<String>,
    pub location_id: LocationId,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub created_by_id: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<PersistedPurchaseOrderItem>,
}

impl PersistedPurchaseOrder {
    /// True when any line still has undelivered quantity.
    pub fn has_remaining(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.ordered_qty > item.received_qty)
    }

    /// Whether the view may offer "receive all": a recognized open state
    /// with something left to receive. Unrecognized states get no actions.
    pub fn can_receive_all(&self) -> bool {
        self.status.is_open() && self.has_remaining()
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// One line of a persisted sales order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSalesOrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, alias = "product_sku")]
    pub sku: Option<String>,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(default, alias = "discount_amount")]
    pub discount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub line_total: Decimal,
}

/// Persisted sales order with its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSalesOrder {
    pub so_id: SalesOrderId,
    pub location_id: LocationId,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub status: SalesOrderStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub created_by_id: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<PersistedSalesOrderItem>,
}

impl PersistedSalesOrder {
    /// Cancellation is offered from CONFIRMED only.
    pub fn can_cancel(&self) -> bool {
        self.status == SalesOrderStatus::Confirmed
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Replace the entry matching `updated.po_id` with the server's returned
/// representation. Returns whether a match was found; a miss is logged so
/// the view can refetch.
pub fn replace_purchase_order(
    orders: &mut [PersistedPurchaseOrder],
    updated: PersistedPurchaseOrder,
) -> bool {
    match orders.iter_mut().find(|o| o.po_id == updated.po_id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => {
            tracing::warn!(po_id = %updated.po_id, "updated purchase order not in local list");
            false
        }
    }
}

/// Sales-order counterpart of [`replace_purchase_order`].
pub fn replace_sales_order(
    orders: &mut [PersistedSalesOrder],
    updated: PersistedSalesOrder,
) -> bool {
    match orders.iter_mut().find(|o| o.so_id == updated.so_id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => {
            tracing::warn!(so_id = %updated.so_id, "updated sales order not in local list");
            false
        }
    }
}
