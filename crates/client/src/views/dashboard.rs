//! Dashboard: KPI cards, trend series, and highlight lists.

use chrono::NaiveDate;

use stockdesk_metrics::{
    DayBucket, PurchaseOrderMetrics, RevenuePoint, SalesOrderMetrics, orders_per_day,
    purchase_order_metrics, revenue_per_day, sales_order_metrics,
};
use stockdesk_orders::{PersistedPurchaseOrder, PersistedSalesOrder};
use stockdesk_reports::{LowStockRow, OverviewReport, TopSellingRow};

use crate::api::Backend;

const PREVIEW_LIMIT: usize = 6;

/// Trend ranges offered by the dashboard.
pub const RANGE_OPTIONS: [u32; 3] = [7, 14, 30];

/// Dashboard state: one joint fetch feeds every card and chart.
#[derive(Debug, Default)]
pub struct Dashboard {
    overview: Option<OverviewReport>,
    low_stock: Vec<LowStockRow>,
    top_selling: Vec<TopSellingRow>,
    purchase_orders: Vec<PersistedPurchaseOrder>,
    sales_orders: Vec<PersistedSalesOrder>,
    po_metrics: Option<PurchaseOrderMetrics>,
    so_metrics: Option<SalesOrderMetrics>,
    pub range_days: u32,
    pub error: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            range_days: 14,
            ..Self::default()
        }
    }

    pub fn overview(&self) -> Option<&OverviewReport> {
        self.overview.as_ref()
    }

    pub fn po_metrics(&self) -> Option<PurchaseOrderMetrics> {
        self.po_metrics
    }

    pub fn so_metrics(&self) -> Option<SalesOrderMetrics> {
        self.so_metrics
    }

    /// Fetch everything the dashboard shows, concurrently and jointly: one
    /// failing source fails the load (the cards would otherwise silently
    /// disagree with each other).
    pub async fn load(&mut self, backend: &impl Backend) {
        self.error = None;

        let result = tokio::try_join!(
            backend.overview_report(),
            backend.low_stock_report(),
            backend.top_selling_report(),
            backend.list_purchase_orders(),
            backend.list_sales_orders(),
        );

        match result {
            Ok((overview, low_stock, top_selling, purchase_orders, sales_orders)) => {
                self.po_metrics = Some(purchase_order_metrics(&purchase_orders));
                self.so_metrics = Some(sales_order_metrics(&sales_orders));
                self.overview = Some(overview);
                self.low_stock = low_stock;
                self.top_selling = top_selling;
                self.purchase_orders = purchase_orders;
                self.sales_orders = sales_orders;
            }
            Err(error) => {
                tracing::error!(%error, "failed to load dashboard data");
                self.error = Some("Failed to load dashboard data. Please try again.".into());
            }
        }
    }

    pub fn orders_series(&self, today: NaiveDate) -> Vec<DayBucket> {
        orders_per_day(
            &self.purchase_orders,
            &self.sales_orders,
            self.range_days,
            today,
        )
    }

    pub fn revenue_series(&self, today: NaiveDate) -> Vec<RevenuePoint> {
        revenue_per_day(&self.sales_orders, self.range_days, today)
    }

    pub fn low_stock_preview(&self) -> &[LowStockRow] {
        &self.low_stock[..self.low_stock.len().min(PREVIEW_LIMIT)]
    }

    pub fn low_stock_total(&self) -> usize {
        self.low_stock.len()
    }

    pub fn top_selling_preview(&self) -> &[TopSellingRow] {
        &self.top_selling[..self.top_selling.len().min(PREVIEW_LIMIT)]
    }

    pub fn top_selling_total(&self) -> usize {
        self.top_selling.len()
    }
}
