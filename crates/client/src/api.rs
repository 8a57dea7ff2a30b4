//! The collaborator boundary: every backend operation the console consumes.
//!
//! The trait is the seam between the core and the network. Views are
//! generic over it; production uses [`crate::http::HttpBackend`], tests an
//! in-memory mock. Exact paths and verbs live behind the implementations.

use stockdesk_catalog::{EntityStatus, Location, Product, Supplier};
use stockdesk_core::{LocationId, PurchaseOrderId, SalesOrderId};
use stockdesk_inventory::{CreateTransfer, StockLevel, TransferReceipt};
use stockdesk_orders::{
    CreatePurchaseOrder, CreateSalesOrder, PersistedPurchaseOrder, PersistedSalesOrder,
};
use stockdesk_reports::{LowStockRow, OverviewReport, StockPerLocationRow, TopSellingRow};

use crate::error::ApiResult;
use crate::page::PageChunk;

/// Parameters accepted by the master-data list endpoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub status: Option<EntityStatus>,
}

impl ListQuery {
    /// Active entries ordered by name, which is what pickers want.
    pub fn active_by_name() -> Self {
        Self {
            ordering: Some("name".into()),
            status: Some(EntityStatus::Active),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Backend operations, one method per endpoint the console consumes.
///
/// The client is single-threaded and cooperative; futures here are awaited
/// on the UI task and never handed across threads.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn list_products(&self, query: &ListQuery) -> ApiResult<PageChunk<Product>>;
    async fn list_locations(&self, query: &ListQuery) -> ApiResult<PageChunk<Location>>;
    async fn list_suppliers(&self, query: &ListQuery) -> ApiResult<PageChunk<Supplier>>;

    /// Stock snapshot rows for one location.
    async fn stock_snapshot(&self, location_id: LocationId) -> ApiResult<Vec<StockLevel>>;

    async fn list_purchase_orders(&self) -> ApiResult<Vec<PersistedPurchaseOrder>>;
    async fn create_purchase_order(
        &self,
        payload: &CreatePurchaseOrder,
    ) -> ApiResult<PersistedPurchaseOrder>;
    async fn receive_all(&self, po_id: PurchaseOrderId) -> ApiResult<PersistedPurchaseOrder>;

    async fn list_sales_orders(&self) -> ApiResult<Vec<PersistedSalesOrder>>;
    async fn create_sales_order(
        &self,
        payload: &CreateSalesOrder,
    ) -> ApiResult<PersistedSalesOrder>;
    async fn cancel_sales_order(&self, so_id: SalesOrderId) -> ApiResult<PersistedSalesOrder>;

    async fn create_transfer(&self, payload: &CreateTransfer) -> ApiResult<TransferReceipt>;
    async fn list_transfers(&self, limit: u32) -> ApiResult<Vec<TransferReceipt>>;

    async fn overview_report(&self) -> ApiResult<OverviewReport>;
    async fn low_stock_report(&self) -> ApiResult<Vec<LowStockRow>>;
    async fn top_selling_report(&self) -> ApiResult<Vec<TopSellingRow>>;
    async fn stock_per_location_report(
        &self,
        location_id: Option<LocationId>,
    ) -> ApiResult<Vec<StockPerLocationRow>>;
}
