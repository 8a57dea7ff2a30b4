//! Status counts and recent-order selection.

use chrono::NaiveDate;
use serde::Serialize;

use stockdesk_orders::{PersistedPurchaseOrder, PersistedSalesOrder};

/// Dashboard card numbers for purchase orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseOrderMetrics {
    pub total: usize,
    /// DRAFT, APPROVED, or PARTIALLY_RECEIVED.
    pub open: usize,
    pub closed: usize,
}

/// Dashboard card numbers for sales orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalesOrderMetrics {
    pub total: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    /// Everything outside CLOSED / CANCELLED (and unrecognized states).
    pub open: usize,
}

pub fn purchase_order_metrics(orders: &[PersistedPurchaseOrder]) -> PurchaseOrderMetrics {
    PurchaseOrderMetrics {
        total: orders.len(),
        open: orders.iter().filter(|o| o.status.is_open()).count(),
        closed: orders
            .iter()
            .filter(|o| o.status == stockdesk_orders::PurchaseOrderStatus::Closed)
            .count(),
    }
}

pub fn sales_order_metrics(orders: &[PersistedSalesOrder]) -> SalesOrderMetrics {
    SalesOrderMetrics {
        total: orders.len(),
        confirmed: orders
            .iter()
            .filter(|o| o.status == stockdesk_orders::SalesOrderStatus::Confirmed)
            .count(),
        cancelled: orders
            .iter()
            .filter(|o| o.status == stockdesk_orders::SalesOrderStatus::Cancelled)
            .count(),
        open: orders.iter().filter(|o| o.status.is_open()).count(),
    }
}

/// Something with a "first present date" in the dashboard's preference
/// order: the order date, else the creation timestamp's date.
pub trait Dated {
    fn effective_date(&self) -> Option<NaiveDate>;
}

impl Dated for PersistedPurchaseOrder {
    fn effective_date(&self) -> Option<NaiveDate> {
        self.order_date
            .or_else(|| self.created_at.map(|at| at.date_naive()))
    }
}

impl Dated for PersistedSalesOrder {
    fn effective_date(&self) -> Option<NaiveDate> {
        self.order_date
            .or_else(|| self.created_at.map(|at| at.date_naive()))
    }
}

/// The `n` most recent items: dated ones first in descending date order,
/// undated ones after all dated ones, input order preserved among ties.
pub fn recent<T: Dated + Clone>(items: &[T], n: usize) -> Vec<T> {
    let mut sorted: Vec<T> = items.to_vec();
    sorted.sort_by(|a, b| match (a.effective_date(), b.effective_date()) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted.truncate(n);
    sorted
}
