//! Submit-readiness checks and estimated totals.
//!
//! Validation is local and non-fatal: a rejection populates error state and
//! leaves the draft untouched. The backend revalidates on submission (stock
//! may have moved between our read and the commit), so a passing result
//! here is a gate, not a guarantee.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use stockdesk_catalog::Product;
use stockdesk_core::ProductId;
use stockdesk_inventory::StockSnapshot;

use crate::draft::{PurchaseDraft, SalesDraft};
use crate::payload::{CreatePurchaseOrder, CreateSalesOrder, PurchaseItemInput, SalesItemInput};

/// Why a draft cannot be submitted: an optional header-level message plus
/// per-product problem strings for the line items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftRejection {
    pub header: Option<String>,
    pub items: Vec<String>,
}

impl DraftRejection {
    fn header(msg: impl Into<String>) -> Self {
        Self {
            header: Some(msg.into()),
            items: Vec::new(),
        }
    }

    fn items(problems: Vec<String>) -> Self {
        Self {
            header: None,
            items: problems,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.items.is_empty()
    }
}

fn product_label(products: &[Product], product_id: ProductId) -> String {
    products
        .iter()
        .find(|p| p.product_id == product_id)
        .map(|p| p.display_label())
        .unwrap_or_else(|| format!("product #{product_id}"))
}

fn list_price(products: &[Product], product_id: ProductId) -> Decimal {
    products
        .iter()
        .find(|p| p.product_id == product_id)
        .map(|p| p.unit_price)
        .unwrap_or(Decimal::ZERO)
}

/// Estimated purchase total: Σ quantity × entered price over valid lines.
/// Lines without a price contribute nothing (the final price is decided by
/// the backend).
pub fn estimated_purchase_total(draft: &PurchaseDraft) -> Decimal {
    draft
        .valid_lines()
        .map(|line| {
            let qty = Decimal::from(line.ordered_qty.unwrap_or(0));
            qty * line.unit_price.unwrap_or(Decimal::ZERO)
        })
        .sum()
}

/// Estimated sales total: Σ quantity × catalog list price over valid lines.
pub fn estimated_sales_total(draft: &SalesDraft, products: &[Product]) -> Decimal {
    draft
        .valid_lines()
        .map(|line| {
            let qty = Decimal::from(line.quantity.unwrap_or(0));
            let price = line
                .product_id
                .map(|id| list_price(products, id))
                .unwrap_or(Decimal::ZERO);
            qty * price
        })
        .sum()
}

/// Validate a purchase draft.
///
/// Purchasing increases stock, so there is no availability check: the draft
/// needs a supplier, a location, and at least one valid line.
pub fn validate_purchase(draft: &PurchaseDraft) -> Result<CreatePurchaseOrder, DraftRejection> {
    let (Some(supplier_id), Some(location_id)) = (draft.supplier_id, draft.location_id) else {
        return Err(DraftRejection::header("Supplier and location are required."));
    };

    let items: Vec<PurchaseItemInput> = draft
        .valid_lines()
        .filter_map(|line| {
            Some(PurchaseItemInput {
                product_id: line.product_id?,
                ordered_qty: line.ordered_qty?,
                unit_price: line.unit_price,
            })
        })
        .collect();

    if items.is_empty() {
        return Err(DraftRejection::items(vec![
            "At least one line item with product and quantity > 0 is required.".into(),
        ]));
    }

    Ok(CreatePurchaseOrder {
        supplier_id,
        location_id,
        order_date: draft.order_date,
        expected_date: draft.expected_date,
        items,
    })
}

/// Validate a sales draft against the stock snapshot for its location.
///
/// Valid lines are grouped by product with quantities summed: two lines for
/// the same product draw from the same pool. Each product's requested total
/// must fit within `available_quantity`; any shortfall rejects the whole
/// draft (no partial submission of the lines that would fit).
pub fn validate_sales(
    draft: &SalesDraft,
    snapshot: &StockSnapshot,
    products: &[Product],
) -> Result<CreateSalesOrder, DraftRejection> {
    let Some(location_id) = draft.location_id else {
        return Err(DraftRejection::header("Location is required."));
    };

    let valid: Vec<_> = draft.valid_lines().collect();
    if valid.is_empty() {
        return Err(DraftRejection::items(vec![
            "At least one line item with product and quantity > 0 is required.".into(),
        ]));
    }

    if snapshot.location_id() != Some(location_id) || !snapshot.is_ready() {
        // The owning view clears and refetches the snapshot on every
        // location change, so hitting this means submit raced the fetch.
        tracing::warn!(
            draft_location = %location_id,
            snapshot_location = ?snapshot.location_id(),
            ready = snapshot.is_ready(),
            "sales draft validated before its stock snapshot settled"
        );
        return Err(DraftRejection::header(
            "Stock availability for the selected location is still loading. Please retry.",
        ));
    }

    // BTreeMap keeps problem strings in a stable product order.
    let mut requested: BTreeMap<ProductId, u64> = BTreeMap::new();
    for line in &valid {
        let (Some(product_id), Some(qty)) = (line.product_id, line.quantity) else {
            continue;
        };
        *requested.entry(product_id).or_default() += u64::from(qty);
    }

    let problems: Vec<String> = requested
        .iter()
        .filter_map(|(&product_id, &qty)| {
            let available = u64::from(snapshot.available_quantity(product_id));
            (qty > available).then(|| {
                format!(
                    "{}: requested {}, available {}",
                    product_label(products, product_id),
                    qty,
                    available
                )
            })
        })
        .collect();

    if !problems.is_empty() {
        return Err(DraftRejection::items(problems));
    }

    let customer_name = draft.customer_name.trim();

    Ok(CreateSalesOrder {
        location_id,
        order_date: draft.order_date,
        customer_name: (!customer_name.is_empty()).then(|| customer_name.to_owned()),
        items: valid
            .iter()
            .filter_map(|line| {
                Some(SalesItemInput {
                    product_id: line.product_id?,
                    quantity: line.quantity?,
                })
            })
            .collect(),
    })
}
