//! `stockdesk-reports` — tabular derivation pipeline and report rows.
//!
//! One pipeline (`filter → sort → paginate`) serves every tabular view in
//! the console: the three operational reports, the order lists, and the
//! recent-transfers table. Report kinds differ only in their searchable
//! fields and comparator chains.

pub mod engine;
pub mod row;

pub use engine::{PAGE_SIZES, Pager, TablePage, TableQuery, TableSpec, run};
pub use row::{
    LowStockRow, LowStockSpec, OverviewReport, StockPerLocationRow, StockPerLocationSpec,
    TopSellingRow, TopSellingSpec,
};
