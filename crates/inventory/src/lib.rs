//! `stockdesk-inventory` — point-in-time stock availability.
//!
//! A snapshot is a read of on-hand quantity per product at one location. It
//! is valid at validation time only; the backend remains the authority at
//! commit time.

pub mod level;
pub mod snapshot;
pub mod transfer;

pub use level::StockLevel;
pub use snapshot::{RefreshTicket, StockSnapshot};
pub use transfer::{CreateTransfer, TransferDraft, TransferReceipt};
