//! Report row shapes and their table specs.
//!
//! The report endpoints return plain rows from SQL views; field names vary
//! slightly between the dashboard and report variants of the same view, so
//! the aliases below absorb both.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockdesk_core::{LocationId, ProductId};

use crate::engine::TableSpec;

/// Case-insensitive text ordering with a deterministic fallback for
/// case-only differences.
fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// A product below its reorder level at some location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockRow {
    pub product_id: ProductId,
    #[serde(alias = "name")]
    pub product_name: String,
    pub sku: String,
    #[serde(default)]
    pub location_id: Option<LocationId>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default, alias = "stock_quantity")]
    pub quantity_on_hand: Option<u32>,
    pub reorder_level: u32,
    #[serde(default)]
    pub stock_value: Option<Decimal>,
}

impl LowStockRow {
    /// Units short of the reorder level; 0 when the on-hand count is unknown
    /// or already at the level.
    pub fn deficit(&self) -> u32 {
        match self.quantity_on_hand {
            Some(on_hand) => self.reorder_level.saturating_sub(on_hand),
            None => 0,
        }
    }
}

/// Spec: scarcest first. On-hand ascending with unknown quantities last,
/// then product name, then SKU.
pub struct LowStockSpec;

impl TableSpec for LowStockSpec {
    type Row = LowStockRow;

    fn search_text<'a>(&self, row: &'a LowStockRow) -> Vec<&'a str> {
        vec![&row.product_name, &row.sku]
    }

    fn compare(&self, a: &LowStockRow, b: &LowStockRow) -> Ordering {
        let by_quantity = match (a.quantity_on_hand, b.quantity_on_hand) {
            (Some(qa), Some(qb)) => qa.cmp(&qb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_quantity
            .then_with(|| cmp_text(&a.product_name, &b.product_name))
            .then_with(|| cmp_text(&a.sku, &b.sku))
    }
}

/// One `(product, location)` row of the stock snapshot report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPerLocationRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub sku: String,
    pub location_id: LocationId,
    pub location_name: String,
    pub quantity_on_hand: u32,
    #[serde(default)]
    pub reorder_level: Option<u32>,
    #[serde(default)]
    pub stock_value: Option<Decimal>,
}

/// Spec: catalog order. Product name, then location name, then SKU.
pub struct StockPerLocationSpec;

impl TableSpec for StockPerLocationSpec {
    type Row = StockPerLocationRow;

    fn search_text<'a>(&self, row: &'a StockPerLocationRow) -> Vec<&'a str> {
        vec![&row.product_name, &row.sku, &row.location_name]
    }

    fn compare(&self, a: &StockPerLocationRow, b: &StockPerLocationRow) -> Ordering {
        cmp_text(&a.product_name, &b.product_name)
            .then_with(|| cmp_text(&a.location_name, &b.location_name))
            .then_with(|| cmp_text(&a.sku, &b.sku))
    }
}

/// Dashboard KPI card numbers from the overview endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewReport {
    pub total_products: u64,
    #[serde(default)]
    pub active_products: Option<u64>,
    #[serde(default)]
    pub total_stock_value: Option<Decimal>,
    #[serde(default)]
    pub low_stock_count: Option<u64>,
    #[serde(default)]
    pub stock_value_note: Option<String>,
}

/// Sales performance of one product over the report window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSellingRow {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(alias = "product_sku")]
    pub sku: String,
    #[serde(alias = "total_quantity")]
    pub total_qty_sold: u64,
    #[serde(default)]
    pub total_revenue: Option<Decimal>,
}

/// Spec: best sellers first. Revenue descending (missing revenue last), then
/// quantity sold descending, then product name ascending.
pub struct TopSellingSpec;

impl TableSpec for TopSellingSpec {
    type Row = TopSellingRow;

    fn search_text<'a>(&self, row: &'a TopSellingRow) -> Vec<&'a str> {
        vec![&row.product_name, &row.sku]
    }

    fn compare(&self, a: &TopSellingRow, b: &TopSellingRow) -> Ordering {
        let by_revenue = match (a.total_revenue, b.total_revenue) {
            (Some(ra), Some(rb)) => rb.cmp(&ra),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_revenue
            .then_with(|| b.total_qty_sold.cmp(&a.total_qty_sold))
            .then_with(|| cmp_text(&a.product_name, &b.product_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{TableQuery, run};

    fn low(name: &str, sku: &str, on_hand: Option<u32>) -> LowStockRow {
        LowStockRow {
            product_id: ProductId::new(1),
            product_name: name.into(),
            sku: sku.into(),
            location_id: None,
            location_name: None,
            quantity_on_hand: on_hand,
            reorder_level: 10,
            stock_value: None,
        }
    }

    fn seller(name: &str, revenue: i64, qty: u64) -> TopSellingRow {
        TopSellingRow {
            product_id: ProductId::new(1),
            product_name: name.into(),
            sku: format!("{}-SKU", name.to_uppercase()),
            total_qty_sold: qty,
            total_revenue: Some(Decimal::from(revenue)),
        }
    }

    #[test]
    fn low_stock_orders_scarcest_first_with_name_tiebreak() {
        let rows = vec![
            low("B", "B-1", Some(5)),
            low("A", "A-1", Some(5)),
            low("A", "A-2", Some(2)),
        ];

        let page = run(&LowStockSpec, &rows, &TableQuery::default());
        let names: Vec<(&str, Option<u32>)> = page
            .rows
            .iter()
            .map(|r| (r.product_name.as_str(), r.quantity_on_hand))
            .collect();

        assert_eq!(
            names,
            vec![("A", Some(2)), ("A", Some(5)), ("B", Some(5))]
        );
    }

    #[test]
    fn low_stock_rows_without_on_hand_sort_last() {
        let rows = vec![
            low("Unknown", "U-1", None),
            low("Known", "K-1", Some(50)),
        ];

        let page = run(&LowStockSpec, &rows, &TableQuery::default());
        assert_eq!(page.rows[0].product_name, "Known");
        assert_eq!(page.rows[1].product_name, "Unknown");
    }

    #[test]
    fn top_selling_breaks_revenue_ties_by_quantity_then_name() {
        let rows = vec![
            seller("Espresso", 100, 3),
            seller("Drip", 100, 9),
            seller("Cold Brew", 50, 40),
        ];

        let page = run(&TopSellingSpec, &rows, &TableQuery::default());
        let names: Vec<&str> = page.rows.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Drip", "Espresso", "Cold Brew"]);
    }

    #[test]
    fn stock_per_location_search_includes_location_name() {
        let rows = vec![
            StockPerLocationRow {
                product_id: ProductId::new(1),
                product_name: "Beans".into(),
                sku: "B-1".into(),
                location_id: LocationId::new(1),
                location_name: "Hanoi Store".into(),
                quantity_on_hand: 4,
                reorder_level: None,
                stock_value: None,
            },
            StockPerLocationRow {
                product_id: ProductId::new(1),
                product_name: "Beans".into(),
                sku: "B-1".into(),
                location_id: LocationId::new(2),
                location_name: "Saigon Warehouse".into(),
                quantity_on_hand: 9,
                reorder_level: None,
                stock_value: None,
            },
        ];

        let query = TableQuery {
            search: "hanoi".into(),
            ..TableQuery::default()
        };
        let page = run(&StockPerLocationSpec, &rows, &query);
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rows[0].location_name, "Hanoi Store");
    }

    #[test]
    fn dashboard_aliases_deserialize_into_the_same_row() {
        // Dashboard payloads use `name`/`stock_quantity`, the reports page
        // `product_name`/`quantity_on_hand`.
        let dashboard: LowStockRow = serde_json::from_str(
            r#"{"product_id": 7, "name": "Filters", "sku": "F-1", "stock_quantity": 3, "reorder_level": 10}"#,
        )
        .unwrap();
        assert_eq!(dashboard.product_name, "Filters");
        assert_eq!(dashboard.quantity_on_hand, Some(3));
        assert_eq!(dashboard.deficit(), 7);

        let report: TopSellingRow = serde_json::from_str(
            r#"{"product_id": 7, "product_name": "Filters", "product_sku": "F-1", "total_quantity": 12}"#,
        )
        .unwrap();
        assert_eq!(report.sku, "F-1");
        assert_eq!(report.total_qty_sold, 12);
        assert_eq!(report.total_revenue, None);
    }
}
