//! Client-side filters for the order list views.
//!
//! Free-text fields match case-insensitive substrings against resolved
//! names; the status filter is exact. Orders without a resolved name match
//! only the empty filter, same as an empty string would.

use crate::lifecycle::{
    PersistedPurchaseOrder, PersistedSalesOrder, PurchaseOrderStatus, SalesOrderStatus,
};

fn text_matches(filter: &str, value: Option<&str>) -> bool {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return true;
    }
    value
        .map(|v| v.to_lowercase().contains(&filter))
        .unwrap_or(false)
}

/// Filter state of the purchase orders list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PurchaseOrderFilter {
    pub supplier: String,
    pub location: String,
    pub status: Option<PurchaseOrderStatus>,
}

impl PurchaseOrderFilter {
    pub fn matches(&self, order: &PersistedPurchaseOrder) -> bool {
        text_matches(&self.supplier, order.supplier_name.as_deref())
            && text_matches(&self.location, order.location_name.as_deref())
            && self
                .status
                .as_ref()
                .is_none_or(|status| order.status == *status)
    }
}

/// Filter state of the sales orders list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalesOrderFilter {
    pub customer: String,
    pub location: String,
    pub status: Option<SalesOrderStatus>,
}

impl SalesOrderFilter {
    pub fn matches(&self, order: &PersistedSalesOrder) -> bool {
        text_matches(&self.customer, order.customer_name.as_deref())
            && text_matches(&self.location, order.location_name.as_deref())
            && self
                .status
                .as_ref()
                .is_none_or(|status| order.status == *status)
    }
}
