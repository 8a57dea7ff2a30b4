//! `stockdesk-metrics` — dashboard aggregation over fetched order lists.
//!
//! Everything here is a pure reduction of collections the dashboard already
//! holds; nothing is fetched and no server-owned number is recomputed.
//! "Today" is always a parameter so the series builders stay deterministic.

pub mod aggregate;
pub mod series;

pub use aggregate::{
    Dated, PurchaseOrderMetrics, SalesOrderMetrics, purchase_order_metrics, recent,
    sales_order_metrics,
};
pub use series::{DayBucket, RevenuePoint, orders_per_day, revenue_per_day};
