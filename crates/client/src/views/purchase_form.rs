//! Purchase order creation form.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use stockdesk_catalog::{Location, Product, Supplier};
use stockdesk_core::{DomainError, DomainResult, ProductId};
use stockdesk_orders::{
    PersistedPurchaseOrder, PurchaseDraft, estimated_purchase_total, validate_purchase,
};

use crate::api::{Backend, ListQuery};
use crate::error::FormErrors;
use crate::page::fetch_all;

/// State of the "new purchase order" modal.
#[derive(Debug)]
pub struct PurchaseOrderForm {
    pub draft: PurchaseDraft,
    suppliers: Vec<Supplier>,
    locations: Vec<Location>,
    products: Vec<Product>,
    lookups_loaded: bool,
    pub errors: FormErrors,
}

impl PurchaseOrderForm {
    /// Fresh form dated `today`, with one empty line.
    pub fn open(today: NaiveDate) -> Self {
        Self {
            draft: PurchaseDraft::new(today),
            suppliers: Vec::new(),
            locations: Vec::new(),
            products: Vec::new(),
            lookups_loaded: false,
            errors: FormErrors::default(),
        }
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn lookups_loaded(&self) -> bool {
        self.lookups_loaded
    }

    /// Fetch suppliers, locations, and products concurrently. One failure
    /// fails the batch: the form shows a single lookup error rather than a
    /// partially usable set of pickers.
    pub async fn load_lookups(&mut self, backend: &impl Backend) {
        let query = ListQuery::active_by_name();

        let result = tokio::try_join!(
            fetch_all(async |page| backend
                .list_suppliers(&query.clone().with_page(page))
                .await),
            fetch_all(async |page| backend
                .list_locations(&query.clone().with_page(page))
                .await),
            fetch_all(async |page| backend
                .list_products(&query.clone().with_page(page))
                .await),
        );

        match result {
            Ok((suppliers, locations, products)) => {
                self.suppliers = suppliers;
                self.locations = locations;
                self.products = products;
                self.lookups_loaded = true;
            }
            Err(error) => {
                self.lookups_loaded = false;
                self.errors.absorb_api_error(
                    &error,
                    "Failed to load suppliers/locations/products.",
                    "Failed to load suppliers/locations/products.",
                );
            }
        }
    }

    /// Select a product on a line, pre-filling the list price unless the
    /// user already touched the price field.
    pub fn select_product(&mut self, index: usize, product_id: ProductId) -> DomainResult<()> {
        let product = self
            .products
            .iter()
            .find(|p| p.product_id == product_id)
            .ok_or(DomainError::NotFound)?
            .clone();
        self.draft.select_product(index, &product)
    }

    pub fn estimated_total(&self) -> Decimal {
        estimated_purchase_total(&self.draft)
    }

    /// Validate and submit. On success the created order is returned for the
    /// caller to prepend to its list; on any failure the errors surface is
    /// populated and the draft is left untouched.
    pub async fn submit(&mut self, backend: &impl Backend) -> Option<PersistedPurchaseOrder> {
        self.errors.clear();

        let payload = match validate_purchase(&self.draft) {
            Ok(payload) => payload,
            Err(rejection) => {
                self.errors.set_rejection(rejection);
                return None;
            }
        };

        match backend.create_purchase_order(&payload).await {
            Ok(created) => Some(created),
            Err(error) => {
                self.errors.absorb_api_error(
                    &error,
                    "Failed to create purchase order. Please fix the highlighted errors.",
                    "Failed to create purchase order. Please try again.",
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::mock::MockBackend;
    use stockdesk_core::{LocationId, SupplierId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    #[tokio::test]
    async fn lookup_failure_fails_the_whole_batch() {
        let mut backend = MockBackend::with_catalog();
        backend.fail_suppliers = true;

        let mut form = PurchaseOrderForm::open(today());
        form.load_lookups(&backend).await;

        assert!(!form.lookups_loaded());
        assert!(form.errors.message.is_some());
        // No partial pickers: the batch failed as one.
        assert!(form.locations().is_empty());
        assert!(form.products().is_empty());
    }

    #[tokio::test]
    async fn submit_rejects_locally_without_touching_the_network() {
        let backend = MockBackend::with_catalog();
        let mut form = PurchaseOrderForm::open(today());
        form.load_lookups(&backend).await;

        // Header incomplete: no supplier/location selected.
        let created = form.submit(&backend).await;
        assert!(created.is_none());
        assert_eq!(backend.created_purchase_orders(), 0);
        assert_eq!(
            form.errors.message.as_deref(),
            Some("Supplier and location are required.")
        );
    }

    #[tokio::test]
    async fn successful_submit_returns_the_created_order() {
        let backend = MockBackend::with_catalog();
        let mut form = PurchaseOrderForm::open(today());
        form.load_lookups(&backend).await;

        form.draft.supplier_id = Some(SupplierId::new(1));
        form.draft.location_id = Some(LocationId::new(1));
        form.select_product(0, ProductId::new(1)).unwrap();
        form.draft.set_quantity(0, Some(4)).unwrap();

        let created = form.submit(&backend).await.expect("order created");
        assert_eq!(created.items.len(), 1);
        assert_eq!(backend.created_purchase_orders(), 1);
        assert!(form.errors.is_empty());
    }

    #[tokio::test]
    async fn server_rejection_merges_into_the_error_surface() {
        let mut backend = MockBackend::with_catalog();
        backend.reject_purchase_create = Some(serde_json::json!({
            "supplier_id": ["Supplier does not exist."]
        }));

        let mut form = PurchaseOrderForm::open(today());
        form.load_lookups(&backend).await;
        form.draft.supplier_id = Some(SupplierId::new(77));
        form.draft.location_id = Some(LocationId::new(1));
        form.select_product(0, ProductId::new(1)).unwrap();
        form.draft.set_quantity(0, Some(1)).unwrap();

        let draft_before = form.draft.clone();
        assert!(form.submit(&backend).await.is_none());

        assert!(form.errors.fields.contains_key("supplier_id"));
        // A failed submission never clears what the user entered.
        assert_eq!(form.draft, draft_before);
    }

    #[tokio::test]
    async fn transport_failure_reports_the_generic_retry_message() {
        let mut backend = MockBackend::with_catalog();
        backend.fail_purchase_create = true;

        let mut form = PurchaseOrderForm::open(today());
        form.load_lookups(&backend).await;
        form.draft.supplier_id = Some(SupplierId::new(1));
        form.draft.location_id = Some(LocationId::new(1));
        form.select_product(0, ProductId::new(1)).unwrap();
        form.draft.set_quantity(0, Some(1)).unwrap();

        assert!(form.submit(&backend).await.is_none());
        assert_eq!(
            form.errors.message.as_deref(),
            Some("Failed to create purchase order. Please try again.")
        );
    }
}
