//! `stockdesk-orders` — order drafts, validation, and lifecycle reads.
//!
//! Drafts live entirely client-side until the validator turns them into a
//! submission payload. Persisted orders are server-authoritative: this crate
//! classifies their lifecycle state and gates the actions a view may offer,
//! but never recomputes server-owned fields locally.

pub mod draft;
pub mod filters;
pub mod lifecycle;
pub mod payload;
pub mod validate;

pub use draft::{PurchaseDraft, PurchaseDraftLine, SalesDraft, SalesDraftLine};
pub use filters::{PurchaseOrderFilter, SalesOrderFilter};
pub use lifecycle::{
    PersistedPurchaseOrder, PersistedPurchaseOrderItem, PersistedSalesOrder,
    PersistedSalesOrderItem, PurchaseOrderStatus, SalesOrderStatus, replace_purchase_order,
    replace_sales_order,
};
pub use payload::{CreatePurchaseOrder, CreateSalesOrder, PurchaseItemInput, SalesItemInput};
pub use validate::{
    DraftRejection, estimated_purchase_total, estimated_sales_total, validate_purchase,
    validate_sales,
};
