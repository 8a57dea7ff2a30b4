//! Tabbed operational reports.

use stockdesk_catalog::Location;
use stockdesk_core::LocationId;
use stockdesk_reports::{
    LowStockRow, LowStockSpec, Pager, StockPerLocationRow, StockPerLocationSpec, TablePage,
    TopSellingRow, TopSellingSpec,
};

use crate::api::{Backend, ListQuery};
use crate::page::fetch_all;

/// The three report tabs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReportTab {
    LowStock,
    StockPerLocation,
    TopSelling,
}

/// Reports page state: active tab, shared search/pager, optional location
/// filter.
#[derive(Debug)]
pub struct ReportsView {
    tab: ReportTab,
    location_filter: Option<LocationId>,
    locations: Vec<Location>,
    low_stock: Vec<LowStockRow>,
    stock_rows: Vec<StockPerLocationRow>,
    top_selling: Vec<TopSellingRow>,
    pub pager: Pager,
    pub error: Option<String>,
}

impl Default for ReportsView {
    fn default() -> Self {
        Self {
            tab: ReportTab::LowStock,
            location_filter: None,
            locations: Vec::new(),
            low_stock: Vec::new(),
            stock_rows: Vec::new(),
            top_selling: Vec::new(),
            pager: Pager::new(),
            error: None,
        }
    }
}

impl ReportsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> ReportTab {
        self.tab
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location_filter(&self) -> Option<LocationId> {
        self.location_filter
    }

    /// Location options for the filter dropdown. A failure here only logs:
    /// the reports stay usable without the filter.
    pub async fn load_locations(&mut self, backend: &impl Backend) {
        let query = ListQuery {
            ordering: Some("name".into()),
            page_size: Some(1000),
            ..ListQuery::default()
        };
        match fetch_all(async |page| backend.list_locations(&query.clone().with_page(page)).await)
            .await
        {
            Ok(locations) => self.locations = locations,
            Err(error) => tracing::warn!(%error, "failed to load report location filter"),
        }
    }

    pub fn set_tab(&mut self, tab: ReportTab) {
        if tab != self.tab {
            self.tab = tab;
            self.pager.set_page(1);
        }
    }

    pub fn set_location_filter(&mut self, location_id: Option<LocationId>) {
        self.location_filter = location_id;
        self.pager.set_page(1);
    }

    /// Fetch the active tab's rows. The low-stock endpoint has no location
    /// parameter, so its filter is applied client-side; stock-per-location
    /// filters on the server.
    pub async fn refresh(&mut self, backend: &impl Backend) {
        self.error = None;

        let result = match self.tab {
            ReportTab::LowStock => backend.low_stock_report().await.map(|rows| {
                self.low_stock = match self.location_filter {
                    Some(location_id) => rows
                        .into_iter()
                        .filter(|row| row.location_id == Some(location_id))
                        .collect(),
                    None => rows,
                };
            }),
            ReportTab::StockPerLocation => backend
                .stock_per_location_report(self.location_filter)
                .await
                .map(|rows| {
                    self.stock_rows = rows;
                }),
            ReportTab::TopSelling => backend.top_selling_report().await.map(|rows| {
                self.top_selling = rows;
            }),
        };

        if let Err(error) = result {
            tracing::error!(%error, tab = ?self.tab, "failed to load report data");
            self.error = Some("Failed to load report data. Please try again.".into());
        }
    }

    pub fn low_stock_page(&mut self) -> TablePage<LowStockRow> {
        self.pager.apply(&LowStockSpec, &self.low_stock)
    }

    pub fn stock_per_location_page(&mut self) -> TablePage<StockPerLocationRow> {
        self.pager.apply(&StockPerLocationSpec, &self.stock_rows)
    }

    pub fn top_selling_page(&mut self) -> TablePage<TopSellingRow> {
        self.pager.apply(&TopSellingSpec, &self.top_selling)
    }
}
