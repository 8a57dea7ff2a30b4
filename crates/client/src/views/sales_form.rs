//! Sales order creation form.
//!
//! The one form whose validation depends on fetched stock. Selecting a
//! location synchronously clears the snapshot and only a completed fetch
//! repopulates it, so a validation can never read the previous location's
//! quantities.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use stockdesk_catalog::{Location, Product};
use stockdesk_core::LocationId;
use stockdesk_inventory::StockSnapshot;
use stockdesk_orders::{
    PersistedSalesOrder, SalesDraft, estimated_sales_total, validate_sales,
};

use crate::api::{Backend, ListQuery};
use crate::error::FormErrors;
use crate::page::fetch_all;

/// State of the "new sales order" modal.
#[derive(Debug)]
pub struct SalesOrderForm {
    pub draft: SalesDraft,
    locations: Vec<Location>,
    products: Vec<Product>,
    snapshot: StockSnapshot,
    lookups_loaded: bool,
    pub errors: FormErrors,
}

impl SalesOrderForm {
    pub fn open(today: NaiveDate) -> Self {
        Self {
            draft: SalesDraft::new(today),
            locations: Vec::new(),
            products: Vec::new(),
            snapshot: StockSnapshot::new(),
            lookups_loaded: false,
            errors: FormErrors::default(),
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn snapshot(&self) -> &StockSnapshot {
        &self.snapshot
    }

    pub fn lookups_loaded(&self) -> bool {
        self.lookups_loaded
    }

    /// Fetch locations and products concurrently; all-or-nothing.
    pub async fn load_lookups(&mut self, backend: &impl Backend) {
        let query = ListQuery::active_by_name();

        let result = tokio::try_join!(
            fetch_all(async |page| backend
                .list_locations(&query.clone().with_page(page))
                .await),
            fetch_all(async |page| backend
                .list_products(&query.clone().with_page(page))
                .await),
        );

        match result {
            Ok((locations, products)) => {
                self.locations = locations;
                self.products = products;
                self.lookups_loaded = true;
            }
            Err(error) => {
                self.lookups_loaded = false;
                self.errors.absorb_api_error(
                    &error,
                    "Failed to load locations and products.",
                    "Failed to load locations and products.",
                );
            }
        }
    }

    /// Select the store location and refresh its stock snapshot.
    ///
    /// The snapshot is cleared before the fetch is issued; until the fetch
    /// lands every product reads as out of stock, and a submission in that
    /// window is rejected with a "still loading" message rather than
    /// validated against stale numbers.
    pub async fn select_location(&mut self, backend: &impl Backend, location_id: LocationId) {
        self.draft.location_id = Some(location_id);
        let ticket = self.snapshot.begin_refresh(location_id);

        match backend.stock_snapshot(location_id).await {
            Ok(rows) => {
                self.snapshot.complete_refresh(ticket, &rows);
            }
            Err(error) => {
                self.errors.absorb_api_error(
                    &error,
                    "Failed to load stock for the selected location.",
                    "Failed to load stock for the selected location.",
                );
            }
        }
    }

    pub fn estimated_total(&self) -> Decimal {
        estimated_sales_total(&self.draft, &self.products)
    }

    /// Validate against the snapshot and submit. Insufficient stock found
    /// by the backend (a race with our read) arrives as a structured 400
    /// and lands on the same error surface as local problems.
    pub async fn submit(&mut self, backend: &impl Backend) -> Option<PersistedSalesOrder> {
        self.errors.clear();

        let payload = match validate_sales(&self.draft, &self.snapshot, &self.products) {
            Ok(payload) => payload,
            Err(rejection) => {
                self.errors.set_rejection(rejection);
                return None;
            }
        };

        match backend.create_sales_order(&payload).await {
            Ok(created) => Some(created),
            Err(error) => {
                self.errors.absorb_api_error(
                    &error,
                    "Failed to create sales order. Please fix the highlighted errors.",
                    "Failed to create sales order. Please try again.",
                );
                None
            }
        }
    }
}
