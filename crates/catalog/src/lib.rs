//! `stockdesk-catalog` — master-data read models.
//!
//! Products, locations, suppliers, and categories are owned by the backend:
//! the console fetches them, keys drafts and reports by them, and never
//! mutates them locally. Replacement happens wholesale on refetch.

pub mod entity;
pub mod status;

pub use entity::{Category, Location, Product, Supplier};
pub use status::{EntityStatus, LocationKind};
