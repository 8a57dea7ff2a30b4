//! Inter-location stock transfer page.

use std::cmp::Ordering;

use stockdesk_catalog::{Location, Product};
use stockdesk_inventory::{TransferDraft, TransferReceipt};
use stockdesk_reports::{Pager, TablePage, TableSpec};

use crate::api::{Backend, ListQuery};
use crate::error::FormErrors;
use crate::page::fetch_all;

const HISTORY_LIMIT: u32 = 5000;

struct RecentTransfersSpec;

impl TableSpec for RecentTransfersSpec {
    type Row = TransferReceipt;

    fn search_text<'a>(&self, _row: &'a TransferReceipt) -> Vec<&'a str> {
        Vec::new()
    }

    fn compare(&self, a: &TransferReceipt, b: &TransferReceipt) -> Ordering {
        match (a.created_at, b.created_at) {
            (Some(ca), Some(cb)) => cb.cmp(&ca),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Transfer form plus the recent-transfers table.
#[derive(Debug, Default)]
pub struct TransfersView {
    pub draft: TransferDraft,
    products: Vec<Product>,
    locations: Vec<Location>,
    recent: Vec<TransferReceipt>,
    lookups_loaded: bool,
    pub pager: Pager,
    pub errors: FormErrors,
    pub success: Option<String>,
}

impl TransfersView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn lookups_loaded(&self) -> bool {
        self.lookups_loaded
    }

    pub fn recent(&self) -> &[TransferReceipt] {
        &self.recent
    }

    /// Active products and locations, ordered by name, all pages.
    pub async fn load_lookups(&mut self, backend: &impl Backend) {
        let query = ListQuery::active_by_name();

        let result = tokio::try_join!(
            fetch_all(async |page| backend
                .list_products(&query.clone().with_page(page))
                .await),
            fetch_all(async |page| backend
                .list_locations(&query.clone().with_page(page))
                .await),
        );

        match result {
            Ok((products, locations)) => {
                self.products = products;
                self.locations = locations;
                self.lookups_loaded = true;
            }
            Err(error) => {
                self.lookups_loaded = false;
                self.errors.absorb_api_error(
                    &error,
                    "Failed to load products and locations. Please try again.",
                    "Failed to load products and locations. Please try again.",
                );
            }
        }
    }

    /// Transfer history, newest first. A failure only logs; the form stays
    /// usable without the table.
    pub async fn load_history(&mut self, backend: &impl Backend) {
        match backend.list_transfers(HISTORY_LIMIT).await {
            Ok(transfers) => self.recent = transfers,
            Err(error) => tracing::warn!(%error, "failed to load transfer history"),
        }
    }

    pub fn recent_page(&mut self) -> TablePage<TransferReceipt> {
        self.pager.apply(&RecentTransfersSpec, &self.recent)
    }

    /// Validate and submit the transfer. On success: a confirmation message
    /// with the resolved names, a reloaded history, and the quantity field
    /// cleared (selections kept for repeat transfers).
    pub async fn submit(&mut self, backend: &impl Backend) -> bool {
        self.errors.clear();
        self.success = None;

        let payload = match self.draft.validate() {
            Ok(payload) => payload,
            Err(error) => {
                self.errors.message = Some(error.to_string());
                return false;
            }
        };

        match backend.create_transfer(&payload).await {
            Ok(receipt) => {
                self.success = Some(format!(
                    "Transferred {} units of \"{}\" from \"{}\" to \"{}\".",
                    receipt.quantity_moved(),
                    receipt.product_name.as_deref().unwrap_or("-"),
                    receipt.from_location_name.as_deref().unwrap_or("-"),
                    receipt.to_location_name.as_deref().unwrap_or("-"),
                ));
                self.load_history(backend).await;
                self.draft.reset_quantity();
                true
            }
            Err(error) => {
                self.errors.absorb_api_error(
                    &error,
                    "Transfer failed. Please check input and try again.",
                    "Transfer failed. Please try again.",
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::mock::MockBackend;
    use stockdesk_core::{LocationId, ProductId};

    fn ready_draft() -> TransferDraft {
        TransferDraft {
            product_id: Some(ProductId::new(1)),
            from_location_id: Some(LocationId::new(2)),
            to_location_id: Some(LocationId::new(1)),
            quantity: Some(3),
        }
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_backend() {
        let backend = MockBackend::with_catalog();
        let mut view = TransfersView::new();
        view.draft = ready_draft();
        view.draft.to_location_id = view.draft.from_location_id;

        assert!(!view.submit(&backend).await);
        assert!(view.errors.message.as_deref().unwrap().contains("must be different"));
        assert!(backend.transfers.borrow().is_empty());
    }

    #[tokio::test]
    async fn successful_transfer_reports_names_and_resets_quantity() {
        let backend = MockBackend::with_catalog();
        let mut view = TransfersView::new();
        view.load_lookups(&backend).await;
        view.draft = ready_draft();

        assert!(view.submit(&backend).await);
        let message = view.success.as_deref().unwrap();
        assert!(message.contains("3 units"));
        assert!(message.contains("Arabica Beans"));
        assert!(message.contains("Saigon Warehouse"));
        assert!(message.contains("Hanoi Store"));

        // Selections survive, quantity clears, history reloaded.
        assert_eq!(view.draft.product_id, Some(ProductId::new(1)));
        assert_eq!(view.draft.quantity, None);
        assert_eq!(view.recent().len(), 1);
    }

    #[tokio::test]
    async fn server_rejection_surfaces_the_detail_message() {
        let mut backend = MockBackend::with_catalog();
        backend.reject_transfer_create = Some(serde_json::json!({
            "detail": "Insufficient stock at source location."
        }));

        let mut view = TransfersView::new();
        view.draft = ready_draft();

        assert!(!view.submit(&backend).await);
        assert_eq!(
            view.errors.message.as_deref(),
            Some("Insufficient stock at source location.")
        );
    }

    #[tokio::test]
    async fn history_is_paginated_newest_first() {
        let backend = MockBackend::with_catalog();
        let mut view = TransfersView::new();
        view.load_lookups(&backend).await;

        for _ in 0..12 {
            view.draft = ready_draft();
            assert!(view.submit(&backend).await);
        }

        let page = view.recent_page();
        assert_eq!(page.total_count, 12);
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.total_pages, 2);
    }
}
