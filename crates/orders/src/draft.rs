//! Mutable order drafts being composed before submission.
//!
//! A draft always keeps at least one editable line; removing the last line
//! is refused. "Valid lines" are recomputed from current state on every
//! read; there is no cached validity flag to fall out of sync with edits.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use stockdesk_catalog::Product;
use stockdesk_core::{DomainError, DomainResult, LocationId, ProductId, SupplierId};

/// One editable line of a purchase draft.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurchaseDraftLine {
    pub product_id: Option<ProductId>,
    pub ordered_qty: Option<u32>,
    pub unit_price: Option<Decimal>,
    /// Set once the user has typed a price. From then on product changes no
    /// longer overwrite it.
    price_edited: bool,
}

impl PurchaseDraftLine {
    /// A line counts toward submission when a product is selected, the
    /// quantity is positive, and any entered price is non-negative. A
    /// missing price is fine: the backend substitutes the list price.
    pub fn is_valid(&self) -> bool {
        self.product_id.is_some()
            && self.ordered_qty.is_some_and(|qty| qty > 0)
            && self.unit_price.is_none_or(|price| price >= Decimal::ZERO)
    }

    pub fn price_edited(&self) -> bool {
        self.price_edited
    }
}

/// One editable line of a sales draft. The price is read-only (catalog list
/// price), so the line carries only product and quantity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesDraftLine {
    pub product_id: Option<ProductId>,
    pub quantity: Option<u32>,
}

impl SalesDraftLine {
    pub fn is_valid(&self) -> bool {
        self.product_id.is_some() && self.quantity.is_some_and(|qty| qty > 0)
    }
}

fn guard_index(len: usize, index: usize) -> DomainResult<()> {
    if index >= len {
        return Err(DomainError::invariant(format!(
            "line index {index} out of range (draft has {len} lines)"
        )));
    }
    Ok(())
}

fn guard_remove(len: usize, index: usize) -> DomainResult<()> {
    guard_index(len, index)?;
    if len == 1 {
        return Err(DomainError::invariant(
            "cannot remove the last remaining draft line",
        ));
    }
    Ok(())
}

/// Purchase order draft: supplier, receiving location, dates, lines.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseDraft {
    pub supplier_id: Option<SupplierId>,
    pub location_id: Option<LocationId>,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    lines: Vec<PurchaseDraftLine>,
}

impl PurchaseDraft {
    /// Fresh draft with one empty line, dated `order_date` (the view passes
    /// "today").
    pub fn new(order_date: NaiveDate) -> Self {
        Self {
            supplier_id: None,
            location_id: None,
            order_date,
            expected_date: None,
            lines: vec![PurchaseDraftLine::default()],
        }
    }

    pub fn lines(&self) -> &[PurchaseDraftLine] {
        &self.lines
    }

    pub fn push_line(&mut self) {
        self.lines.push(PurchaseDraftLine::default());
    }

    pub fn remove_line(&mut self, index: usize) -> DomainResult<()> {
        guard_remove(self.lines.len(), index)?;
        self.lines.remove(index);
        Ok(())
    }

    /// Select a product for a line. Pre-fills the unit price from the
    /// catalog list price unless the user already edited the price field.
    pub fn select_product(&mut self, index: usize, product: &Product) -> DomainResult<()> {
        guard_index(self.lines.len(), index)?;
        let line = &mut self.lines[index];
        line.product_id = Some(product.product_id);
        if !line.price_edited {
            line.unit_price = Some(product.unit_price);
        }
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, qty: Option<u32>) -> DomainResult<()> {
        guard_index(self.lines.len(), index)?;
        self.lines[index].ordered_qty = qty;
        Ok(())
    }

    /// User-entered price. Marks the line's price as edited, making it
    /// sticky across later product changes.
    pub fn set_unit_price(&mut self, index: usize, price: Option<Decimal>) -> DomainResult<()> {
        guard_index(self.lines.len(), index)?;
        let line = &mut self.lines[index];
        line.unit_price = price;
        line.price_edited = true;
        Ok(())
    }

    pub fn valid_lines(&self) -> impl Iterator<Item = &PurchaseDraftLine> {
        self.lines.iter().filter(|line| line.is_valid())
    }
}

/// Sales order draft: store location, date, optional walk-in customer, lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesDraft {
    pub location_id: Option<LocationId>,
    pub order_date: NaiveDate,
    pub customer_name: String,
    lines: Vec<SalesDraftLine>,
}

impl SalesDraft {
    pub fn new(order_date: NaiveDate) -> Self {
        Self {
            location_id: None,
            order_date,
            customer_name: String::new(),
            lines: vec![SalesDraftLine::default()],
        }
    }

    pub fn lines(&self) -> &[SalesDraftLine] {
        &self.lines
    }

    pub fn push_line(&mut self) {
        self.lines.push(SalesDraftLine::default());
    }

    pub fn remove_line(&mut self, index: usize) -> DomainResult<()> {
        guard_remove(self.lines.len(), index)?;
        self.lines.remove(index);
        Ok(())
    }

    pub fn select_product(&mut self, index: usize, product_id: ProductId) -> DomainResult<()> {
        guard_index(self.lines.len(), index)?;
        self.lines[index].product_id = Some(product_id);
        Ok(())
    }

    pub fn set_quantity(&mut self, index: usize, qty: Option<u32>) -> DomainResult<()> {
        guard_index(self.lines.len(), index)?;
        self.lines[index].quantity = qty;
        Ok(())
    }

    pub fn valid_lines(&self) -> impl Iterator<Item = &SalesDraftLine> {
        self.lines.iter().filter(|line| line.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use stockdesk_catalog::status::EntityStatus;
    use stockdesk_core::CategoryId;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    fn test_product(id: i64, price: &str) -> Product {
        let at: DateTime<Utc> = "2025-01-01T00:00:00Z".parse().unwrap();
        Product {
            product_id: ProductId::new(id),
            category: CategoryId::new(1),
            category_name: None,
            name: format!("Product {id}"),
            sku: format!("P-{id}"),
            barcode: None,
            description: None,
            unit_price: price.parse().unwrap(),
            unit_of_measure: "unit".into(),
            reorder_level: 5,
            status: EntityStatus::Active,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn new_draft_starts_with_one_empty_line() {
        let draft = PurchaseDraft::new(test_date());
        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.valid_lines().count(), 0);
    }

    #[test]
    fn cannot_remove_the_last_line() {
        let mut draft = SalesDraft::new(test_date());
        let err = draft.remove_line(0).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => {
                assert!(msg.contains("last remaining draft line"))
            }
            _ => panic!("Expected InvariantViolation"),
        }

        draft.push_line();
        draft.remove_line(0).unwrap();
        assert_eq!(draft.lines().len(), 1);
    }

    #[test]
    fn out_of_range_index_is_refused() {
        let mut draft = PurchaseDraft::new(test_date());
        assert!(draft.set_quantity(3, Some(1)).is_err());
    }

    #[test]
    fn selecting_a_product_prefills_the_list_price() {
        let mut draft = PurchaseDraft::new(test_date());
        draft.select_product(0, &test_product(1, "25.50")).unwrap();
        assert_eq!(
            draft.lines()[0].unit_price,
            Some(Decimal::new(2550, 2))
        );
        assert!(!draft.lines()[0].price_edited());
    }

    #[test]
    fn edited_price_is_sticky_across_product_changes() {
        let mut draft = PurchaseDraft::new(test_date());
        draft.select_product(0, &test_product(1, "25.50")).unwrap();
        draft
            .set_unit_price(0, Some(Decimal::new(1999, 2)))
            .unwrap();

        // Switching products keeps the user's price.
        draft.select_product(0, &test_product(2, "99.00")).unwrap();
        assert_eq!(draft.lines()[0].unit_price, Some(Decimal::new(1999, 2)));
        assert_eq!(draft.lines()[0].product_id, Some(ProductId::new(2)));
    }

    #[test]
    fn validity_is_recomputed_from_current_state() {
        let mut draft = SalesDraft::new(test_date());
        draft.select_product(0, ProductId::new(1)).unwrap();
        draft.set_quantity(0, Some(2)).unwrap();
        assert_eq!(draft.valid_lines().count(), 1);

        draft.set_quantity(0, Some(0)).unwrap();
        assert_eq!(draft.valid_lines().count(), 0);

        draft.set_quantity(0, Some(3)).unwrap();
        assert_eq!(draft.valid_lines().count(), 1);
    }

    #[test]
    fn negative_entered_price_invalidates_a_purchase_line() {
        let mut draft = PurchaseDraft::new(test_date());
        draft.select_product(0, &test_product(1, "10.00")).unwrap();
        draft.set_quantity(0, Some(1)).unwrap();
        assert_eq!(draft.valid_lines().count(), 1);

        draft
            .set_unit_price(0, Some(Decimal::new(-100, 2)))
            .unwrap();
        assert_eq!(draft.valid_lines().count(), 0);

        // Clearing the price is allowed; the backend falls back to the
        // list price.
        draft.set_unit_price(0, None).unwrap();
        assert_eq!(draft.valid_lines().count(), 1);
    }
}
