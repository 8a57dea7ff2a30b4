//! Purchase and sales order list views.
//!
//! Lists are fetched whole and filtered client-side. Lifecycle actions are
//! gated by the classifier before any request leaves, and a successful
//! action replaces the affected entry with the server's returned order,
//! never a local recomputation of status or quantities.

use std::cmp::Ordering;

use stockdesk_core::{PurchaseOrderId, SalesOrderId};
use stockdesk_orders::{
    PersistedPurchaseOrder, PersistedSalesOrder, PurchaseOrderFilter, SalesOrderFilter,
    replace_purchase_order, replace_sales_order,
};
use stockdesk_reports::{Pager, TablePage, TableSpec};

use crate::api::Backend;

fn newest_first<T>(
    a_created: Option<chrono::DateTime<chrono::Utc>>,
    b_created: Option<chrono::DateTime<chrono::Utc>>,
    a_id: T,
    b_id: T,
) -> Ordering
where
    T: Ord,
{
    match (a_created, b_created) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b_id.cmp(&a_id))
}

struct PurchaseOrderListSpec;

impl TableSpec for PurchaseOrderListSpec {
    type Row = PersistedPurchaseOrder;

    fn search_text<'a>(&self, _row: &'a PersistedPurchaseOrder) -> Vec<&'a str> {
        Vec::new() // field filters run before the pipeline
    }

    fn compare(&self, a: &PersistedPurchaseOrder, b: &PersistedPurchaseOrder) -> Ordering {
        newest_first(a.created_at, b.created_at, a.po_id, b.po_id)
    }
}

struct SalesOrderListSpec;

impl TableSpec for SalesOrderListSpec {
    type Row = PersistedSalesOrder;

    fn search_text<'a>(&self, _row: &'a PersistedSalesOrder) -> Vec<&'a str> {
        Vec::new()
    }

    fn compare(&self, a: &PersistedSalesOrder, b: &PersistedSalesOrder) -> Ordering {
        newest_first(a.created_at, b.created_at, a.so_id, b.so_id)
    }
}

/// Purchase orders list with filters, pagination, and the receive-all
/// action.
#[derive(Debug, Default)]
pub struct PurchaseOrdersView {
    orders: Vec<PersistedPurchaseOrder>,
    pub filter: PurchaseOrderFilter,
    pub pager: Pager,
    pub error: Option<String>,
}

impl PurchaseOrdersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[PersistedPurchaseOrder] {
        &self.orders
    }

    pub async fn refresh(&mut self, backend: &impl Backend) {
        self.error = None;
        match backend.list_purchase_orders().await {
            Ok(orders) => self.orders = orders,
            Err(error) => {
                tracing::error!(%error, "failed to load purchase orders");
                self.error = Some("Failed to load purchase orders. Please try again.".into());
            }
        }
    }

    /// Filtered, sorted, paginated page of orders.
    pub fn visible_page(&mut self) -> TablePage<PersistedPurchaseOrder> {
        let filtered: Vec<PersistedPurchaseOrder> = self
            .orders
            .iter()
            .filter(|order| self.filter.matches(order))
            .cloned()
            .collect();
        self.pager.apply(&PurchaseOrderListSpec, &filtered)
    }

    /// Prepend an order created through the modal for instant feedback.
    pub fn prepend_created(&mut self, created: PersistedPurchaseOrder) {
        self.orders.insert(0, created);
    }

    /// Receive all remaining items. Gated client-side: offering the action
    /// on a closed or fully received order is a UI bug, so the view refuses
    /// before any request is made.
    pub async fn receive_all(&mut self, backend: &impl Backend, po_id: PurchaseOrderId) -> bool {
        self.error = None;

        let Some(order) = self.orders.iter().find(|o| o.po_id == po_id) else {
            self.error = Some("Purchase order not found.".into());
            return false;
        };

        if !order.can_receive_all() {
            self.error =
                Some("All items in this purchase order have already been received.".into());
            return false;
        }

        match backend.receive_all(po_id).await {
            Ok(updated) => {
                replace_purchase_order(&mut self.orders, updated);
                true
            }
            Err(error) => {
                tracing::error!(%error, %po_id, "receive-all failed");
                self.error = Some(
                    "Failed to receive all items for this purchase order. Please try again."
                        .into(),
                );
                false
            }
        }
    }
}

/// Sales orders list with filters, pagination, and cancellation.
#[derive(Debug, Default)]
pub struct SalesOrdersView {
    orders: Vec<PersistedSalesOrder>,
    pub filter: SalesOrderFilter,
    pub pager: Pager,
    pub error: Option<String>,
}

impl SalesOrdersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[PersistedSalesOrder] {
        &self.orders
    }

    pub async fn refresh(&mut self, backend: &impl Backend) {
        self.error = None;
        match backend.list_sales_orders().await {
            Ok(orders) => self.orders = orders,
            Err(error) => {
                tracing::error!(%error, "failed to load sales orders");
                self.error = Some("Failed to load sales orders. Please try again.".into());
            }
        }
    }

    pub fn visible_page(&mut self) -> TablePage<PersistedSalesOrder> {
        let filtered: Vec<PersistedSalesOrder> = self
            .orders
            .iter()
            .filter(|order| self.filter.matches(order))
            .cloned()
            .collect();
        self.pager.apply(&SalesOrderListSpec, &filtered)
    }

    pub fn prepend_created(&mut self, created: PersistedSalesOrder) {
        self.orders.insert(0, created);
    }

    /// Cancel a confirmed order. Only offered from CONFIRMED; anything else
    /// is refused locally.
    pub async fn cancel_order(&mut self, backend: &impl Backend, so_id: SalesOrderId) -> bool {
        self.error = None;

        let Some(order) = self.orders.iter().find(|o| o.so_id == so_id) else {
            self.error = Some("Sales order not found.".into());
            return false;
        };

        if !order.can_cancel() {
            self.error = Some("Only confirmed sales orders can be cancelled.".into());
            return false;
        }

        match backend.cancel_sales_order(so_id).await {
            Ok(updated) => {
                replace_sales_order(&mut self.orders, updated);
                true
            }
            Err(error) => {
                tracing::error!(%error, %so_id, "cancel failed");
                self.error = Some("Failed to cancel this sales order. Please try again.".into());
                false
            }
        }
    }
}
