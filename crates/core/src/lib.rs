//! `stockdesk-core` — shared building blocks for the console core.
//!
//! This crate contains **pure domain** primitives (no transport concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{
    CategoryId, LocationId, ProductId, PurchaseOrderId, SalesOrderId, SupplierId, TransferId,
    UserId,
};
