//! In-memory [`Backend`] for view tests.
//!
//! Single-threaded like the client itself, so plain `RefCell`/`Cell`
//! interior mutability is enough. Failure toggles simulate transport
//! errors; `reject_*` fields simulate structured 400 bodies.

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use stockdesk_catalog::{EntityStatus, Location, LocationKind, Product, Supplier};
use stockdesk_core::{
    CategoryId, LocationId, ProductId, PurchaseOrderId, SalesOrderId, SupplierId,
};
use stockdesk_inventory::{CreateTransfer, StockLevel, TransferReceipt};
use stockdesk_orders::{
    CreatePurchaseOrder, CreateSalesOrder, PersistedPurchaseOrder, PersistedPurchaseOrderItem,
    PersistedSalesOrder, PersistedSalesOrderItem, PurchaseOrderStatus, SalesOrderStatus,
};
use stockdesk_reports::{LowStockRow, OverviewReport, StockPerLocationRow, TopSellingRow};

use crate::api::{Backend, ListQuery};
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::page::PageChunk;

fn transport(op: &str) -> ApiError {
    ApiError::Transport(anyhow::anyhow!("injected failure: {op}"))
}

fn timestamp() -> DateTime<Utc> {
    "2025-11-20T08:00:00Z".parse().unwrap()
}

pub(crate) fn product(id: i64, name: &str, price: &str) -> Product {
    Product {
        product_id: ProductId::new(id),
        category: CategoryId::new(1),
        category_name: None,
        name: name.into(),
        sku: format!("SKU-{id}"),
        barcode: None,
        description: None,
        unit_price: price.parse().unwrap(),
        unit_of_measure: "unit".into(),
        reorder_level: 5,
        status: EntityStatus::Active,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub(crate) fn location(id: i64, name: &str) -> Location {
    Location {
        location_id: LocationId::new(id),
        name: name.into(),
        kind: LocationKind::Store,
        address: None,
        status: EntityStatus::Active,
        created_at: timestamp(),
    }
}

pub(crate) fn supplier(id: i64, name: &str) -> Supplier {
    Supplier {
        supplier_id: SupplierId::new(id),
        name: name.into(),
        contact_name: None,
        phone: None,
        email: None,
        address: None,
        payment_terms: None,
        status: EntityStatus::Active,
        created_at: timestamp(),
    }
}

pub(crate) fn stock(product: i64, location: i64, qty: u32) -> StockLevel {
    StockLevel {
        product_id: ProductId::new(product),
        location_id: LocationId::new(location),
        quantity_on_hand: qty,
        last_updated: None,
    }
}

#[derive(Default)]
pub(crate) struct MockBackend {
    pub products: Vec<Product>,
    pub locations: Vec<Location>,
    pub suppliers: Vec<Supplier>,
    pub stock: Vec<StockLevel>,
    pub purchase_orders: RefCell<Vec<PersistedPurchaseOrder>>,
    pub sales_orders: RefCell<Vec<PersistedSalesOrder>>,
    pub transfers: RefCell<Vec<TransferReceipt>>,
    pub low_stock: Vec<LowStockRow>,
    pub top_selling: Vec<TopSellingRow>,
    pub stock_per_location: Vec<StockPerLocationRow>,
    pub overview: Option<OverviewReport>,

    next_id: Cell<i64>,
    po_creates: Cell<usize>,
    so_creates: Cell<usize>,

    pub fail_products: bool,
    pub fail_locations: bool,
    pub fail_suppliers: bool,
    pub fail_stock_snapshot: bool,
    pub fail_purchase_list: bool,
    pub fail_purchase_create: bool,
    pub fail_receive_all: bool,
    pub fail_sales_create: bool,
    pub fail_cancel: bool,
    pub fail_reports: bool,
    pub fail_transfer_create: bool,
    pub reject_purchase_create: Option<serde_json::Value>,
    pub reject_sales_create: Option<serde_json::Value>,
    pub reject_transfer_create: Option<serde_json::Value>,
}

impl MockBackend {
    /// Two products, two locations, two suppliers, stock at both locations.
    pub fn with_catalog() -> Self {
        Self {
            products: vec![
                product(1, "Arabica Beans", "100.00"),
                product(2, "Paper Filters", "10.00"),
            ],
            locations: vec![location(1, "Hanoi Store"), location(2, "Saigon Warehouse")],
            suppliers: vec![supplier(1, "Highland Co"), supplier(2, "Delta Farms")],
            stock: vec![stock(1, 1, 50), stock(2, 1, 0), stock(1, 2, 3)],
            next_id: Cell::new(100),
            ..Self::default()
        }
    }

    pub fn created_purchase_orders(&self) -> usize {
        self.po_creates.get()
    }

    pub fn created_sales_orders(&self) -> usize {
        self.so_creates.get()
    }

    fn next_id(&self) -> i64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn product_price(&self, id: ProductId) -> Decimal {
        self.products
            .iter()
            .find(|p| p.product_id == id)
            .map(|p| p.unit_price)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Backend for MockBackend {
    async fn list_products(&self, _query: &ListQuery) -> ApiResult<PageChunk<Product>> {
        if self.fail_products {
            return Err(transport("list_products"));
        }
        Ok(PageChunk::from_items(self.products.clone()))
    }

    async fn list_locations(&self, _query: &ListQuery) -> ApiResult<PageChunk<Location>> {
        if self.fail_locations {
            return Err(transport("list_locations"));
        }
        Ok(PageChunk::from_items(self.locations.clone()))
    }

    async fn list_suppliers(&self, _query: &ListQuery) -> ApiResult<PageChunk<Supplier>> {
        if self.fail_suppliers {
            return Err(transport("list_suppliers"));
        }
        Ok(PageChunk::from_items(self.suppliers.clone()))
    }

    async fn stock_snapshot(&self, location_id: LocationId) -> ApiResult<Vec<StockLevel>> {
        if self.fail_stock_snapshot {
            return Err(transport("stock_snapshot"));
        }
        Ok(self
            .stock
            .iter()
            .filter(|row| row.location_id == location_id)
            .cloned()
            .collect())
    }

    async fn list_purchase_orders(&self) -> ApiResult<Vec<PersistedPurchaseOrder>> {
        if self.fail_purchase_list {
            return Err(transport("list_purchase_orders"));
        }
        Ok(self.purchase_orders.borrow().clone())
    }

    async fn create_purchase_order(
        &self,
        payload: &CreatePurchaseOrder,
    ) -> ApiResult<PersistedPurchaseOrder> {
        if self.fail_purchase_create {
            return Err(transport("create_purchase_order"));
        }
        if let Some(body) = &self.reject_purchase_create {
            return Err(ApiError::Rejected(FieldErrors::from_body(body)));
        }

        self.po_creates.set(self.po_creates.get() + 1);

        let items: Vec<PersistedPurchaseOrderItem> = payload
            .items
            .iter()
            .map(|item| {
                let price = item
                    .unit_price
                    .unwrap_or_else(|| self.product_price(item.product_id));
                PersistedPurchaseOrderItem {
                    product_id: item.product_id,
                    product_name: None,
                    sku: None,
                    ordered_qty: item.ordered_qty,
                    received_qty: 0,
                    unit_price: price,
                    line_total: price * Decimal::from(item.ordered_qty),
                }
            })
            .collect();

        let order = PersistedPurchaseOrder {
            po_id: PurchaseOrderId::new(self.next_id()),
            supplier_id: payload.supplier_id,
            supplier_name: None,
            location_id: payload.location_id,
            location_name: None,
            order_date: Some(payload.order_date),
            expected_date: payload.expected_date,
            status: PurchaseOrderStatus::Approved,
            total_amount: items.iter().map(|i| i.line_total).sum(),
            created_by_id: None,
            created_at: Some(timestamp()),
            items,
        };

        self.purchase_orders.borrow_mut().push(order.clone());
        Ok(order)
    }

    async fn receive_all(&self, po_id: PurchaseOrderId) -> ApiResult<PersistedPurchaseOrder> {
        if self.fail_receive_all {
            return Err(transport("receive_all"));
        }

        let mut orders = self.purchase_orders.borrow_mut();
        let order = orders
            .iter_mut()
            .find(|o| o.po_id == po_id)
            .ok_or_else(|| transport("receive_all: unknown order"))?;

        for item in &mut order.items {
            item.received_qty = item.ordered_qty;
        }
        order.status = PurchaseOrderStatus::Closed;
        Ok(order.clone())
    }

    async fn list_sales_orders(&self) -> ApiResult<Vec<PersistedSalesOrder>> {
        Ok(self.sales_orders.borrow().clone())
    }

    async fn create_sales_order(
        &self,
        payload: &CreateSalesOrder,
    ) -> ApiResult<PersistedSalesOrder> {
        if self.fail_sales_create {
            return Err(transport("create_sales_order"));
        }
        if let Some(body) = &self.reject_sales_create {
            return Err(ApiError::Rejected(FieldErrors::from_body(body)));
        }

        self.so_creates.set(self.so_creates.get() + 1);

        let items: Vec<PersistedSalesOrderItem> = payload
            .items
            .iter()
            .map(|item| {
                let price = self.product_price(item.product_id);
                PersistedSalesOrderItem {
                    product_id: item.product_id,
                    product_name: None,
                    sku: None,
                    quantity: item.quantity,
                    unit_price: price,
                    discount: None,
                    line_total: price * Decimal::from(item.quantity),
                }
            })
            .collect();

        let order = PersistedSalesOrder {
            so_id: SalesOrderId::new(self.next_id()),
            location_id: payload.location_id,
            location_name: None,
            order_date: Some(payload.order_date),
            customer_name: payload.customer_name.clone(),
            status: SalesOrderStatus::Confirmed,
            total_amount: items.iter().map(|i| i.line_total).sum(),
            created_by_id: None,
            created_at: Some(timestamp()),
            items,
        };

        self.sales_orders.borrow_mut().push(order.clone());
        Ok(order)
    }

    async fn cancel_sales_order(&self, so_id: SalesOrderId) -> ApiResult<PersistedSalesOrder> {
        if self.fail_cancel {
            return Err(transport("cancel_sales_order"));
        }

        let mut orders = self.sales_orders.borrow_mut();
        let order = orders
            .iter_mut()
            .find(|o| o.so_id == so_id)
            .ok_or_else(|| transport("cancel_sales_order: unknown order"))?;
        order.status = SalesOrderStatus::Cancelled;
        Ok(order.clone())
    }

    async fn create_transfer(&self, payload: &CreateTransfer) -> ApiResult<TransferReceipt> {
        if self.fail_transfer_create {
            return Err(transport("create_transfer"));
        }
        if let Some(body) = &self.reject_transfer_create {
            return Err(ApiError::Rejected(FieldErrors::from_body(body)));
        }

        let receipt = TransferReceipt {
            transfer_id: Some(stockdesk_core::TransferId::new(self.next_id())),
            product_id: payload.product_id,
            product_name: self
                .products
                .iter()
                .find(|p| p.product_id == payload.product_id)
                .map(|p| p.name.clone()),
            from_location_id: payload.from_location_id,
            from_location_name: self
                .locations
                .iter()
                .find(|l| l.location_id == payload.from_location_id)
                .map(|l| l.name.clone()),
            to_location_id: payload.to_location_id,
            to_location_name: self
                .locations
                .iter()
                .find(|l| l.location_id == payload.to_location_id)
                .map(|l| l.name.clone()),
            quantity: i64::from(payload.quantity),
            from_quantity_on_hand: None,
            to_quantity_on_hand: None,
            created_at: Some(timestamp()),
        };

        self.transfers.borrow_mut().push(receipt.clone());
        Ok(receipt)
    }

    async fn list_transfers(&self, _limit: u32) -> ApiResult<Vec<TransferReceipt>> {
        Ok(self.transfers.borrow().clone())
    }

    async fn overview_report(&self) -> ApiResult<OverviewReport> {
        if self.fail_reports {
            return Err(transport("overview_report"));
        }
        Ok(self.overview.clone().unwrap_or(OverviewReport {
            total_products: self.products.len() as u64,
            active_products: None,
            total_stock_value: None,
            low_stock_count: None,
            stock_value_note: None,
        }))
    }

    async fn low_stock_report(&self) -> ApiResult<Vec<LowStockRow>> {
        if self.fail_reports {
            return Err(transport("low_stock_report"));
        }
        Ok(self.low_stock.clone())
    }

    async fn top_selling_report(&self) -> ApiResult<Vec<TopSellingRow>> {
        if self.fail_reports {
            return Err(transport("top_selling_report"));
        }
        Ok(self.top_selling.clone())
    }

    async fn stock_per_location_report(
        &self,
        location_id: Option<LocationId>,
    ) -> ApiResult<Vec<StockPerLocationRow>> {
        if self.fail_reports {
            return Err(transport("stock_per_location_report"));
        }
        Ok(self
            .stock_per_location
            .iter()
            .filter(|row| location_id.is_none_or(|id| row.location_id == id))
            .cloned()
            .collect())
    }
}
