//! View states: the composition layer over drafts, caches, and reports.
//!
//! Each view owns the collections it fetched; nothing is shared across
//! views. Lookup batches are awaited jointly and fail as a whole: there is
//! no degraded mode with half the pickers empty.

pub mod dashboard;
pub mod orders_list;
pub mod purchase_form;
pub mod reports_view;
pub mod sales_form;
pub mod transfers;

pub use dashboard::Dashboard;
pub use orders_list::{PurchaseOrdersView, SalesOrdersView};
pub use purchase_form::PurchaseOrderForm;
pub use reports_view::{ReportTab, ReportsView};
pub use sales_form::SalesOrderForm;
pub use transfers::TransfersView;

#[cfg(test)]
pub(crate) mod mock;
