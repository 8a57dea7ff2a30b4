//! Reqwest implementation of the [`Backend`] trait.
//!
//! Holds the REST paths and the response-shape handling; nothing outside
//! this module knows a URL. A 400 with a JSON object body is a structured
//! rejection, anything else that fails is a transport error.

use anyhow::{Context as _, anyhow};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use stockdesk_catalog::{Location, Product, Supplier};
use stockdesk_core::{LocationId, PurchaseOrderId, SalesOrderId};
use stockdesk_inventory::{CreateTransfer, StockLevel, TransferReceipt};
use stockdesk_orders::{
    CreatePurchaseOrder, CreateSalesOrder, PersistedPurchaseOrder, PersistedSalesOrder,
};
use stockdesk_reports::{LowStockRow, OverviewReport, StockPerLocationRow, TopSellingRow};

use crate::api::{Backend, ListQuery};
use crate::context::AppContext;
use crate::error::{ApiError, ApiResult, FieldErrors};
use crate::page::{ListResponse, PageChunk};

/// HTTP adapter for the console backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    context: AppContext,
}

impl HttpBackend {
    pub fn new(context: AppContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            context,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.context.base_url().trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.context.session() {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status == StatusCode::BAD_REQUEST {
            let body: serde_json::Value = response
                .json()
                .await
                .context("reading 400 response body")?;
            return Err(ApiError::Rejected(FieldErrors::from_body(&body)));
        }

        if !status.is_success() {
            return Err(ApiError::Transport(anyhow!(
                "unexpected status {status}"
            )));
        }

        Ok(response
            .json::<T>()
            .await
            .context("decoding response body")?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ApiResult<T> {
        let request = self.authorize(self.http.get(self.url(path)).query(params));
        let response = request
            .send()
            .await
            .with_context(|| format!("GET {path}"))?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        let response = request
            .send()
            .await
            .with_context(|| format!("POST {path}"))?;
        Self::decode(response).await
    }

    fn list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = query.page_size {
            params.push(("page_size", page_size.to_string()));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_owned()));
        }
        if let Some(ordering) = query.ordering.as_deref() {
            params.push(("ordering", ordering.to_owned()));
        }
        if let Some(status) = &query.status {
            params.push(("status", status.as_str().to_owned()));
        }
        params
    }

    async fn get_listing<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ApiResult<PageChunk<T>> {
        let response: ListResponse<T> = self.get(path, &Self::list_params(query)).await?;
        Ok(response.normalize())
    }
}

impl Backend for HttpBackend {
    async fn list_products(&self, query: &ListQuery) -> ApiResult<PageChunk<Product>> {
        self.get_listing("/api/products/", query).await
    }

    async fn list_locations(&self, query: &ListQuery) -> ApiResult<PageChunk<Location>> {
        self.get_listing("/api/locations/", query).await
    }

    async fn list_suppliers(&self, query: &ListQuery) -> ApiResult<PageChunk<Supplier>> {
        self.get_listing("/api/suppliers/", query).await
    }

    async fn stock_snapshot(&self, location_id: LocationId) -> ApiResult<Vec<StockLevel>> {
        let response: ListResponse<StockLevel> = self
            .get(
                "/api/reports/stock-per-location/",
                &[("location_id", location_id.to_string())],
            )
            .await?;
        Ok(response.normalize().items)
    }

    async fn list_purchase_orders(&self) -> ApiResult<Vec<PersistedPurchaseOrder>> {
        let response: ListResponse<PersistedPurchaseOrder> =
            self.get("/api/purchase-orders/", &[]).await?;
        Ok(response.normalize().items)
    }

    async fn create_purchase_order(
        &self,
        payload: &CreatePurchaseOrder,
    ) -> ApiResult<PersistedPurchaseOrder> {
        self.post("/api/purchase-orders/", payload).await
    }

    async fn receive_all(&self, po_id: PurchaseOrderId) -> ApiResult<PersistedPurchaseOrder> {
        self.post(
            &format!("/api/purchase-orders/{po_id}/receive-all/"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn list_sales_orders(&self) -> ApiResult<Vec<PersistedSalesOrder>> {
        let response: ListResponse<PersistedSalesOrder> =
            self.get("/api/sales-orders/", &[]).await?;
        Ok(response.normalize().items)
    }

    async fn create_sales_order(
        &self,
        payload: &CreateSalesOrder,
    ) -> ApiResult<PersistedSalesOrder> {
        self.post("/api/sales-orders/", payload).await
    }

    async fn cancel_sales_order(&self, so_id: SalesOrderId) -> ApiResult<PersistedSalesOrder> {
        self.post(
            &format!("/api/sales-orders/{so_id}/cancel/"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn create_transfer(&self, payload: &CreateTransfer) -> ApiResult<TransferReceipt> {
        self.post("/api/transfers/", payload).await
    }

    async fn list_transfers(&self, limit: u32) -> ApiResult<Vec<TransferReceipt>> {
        let response: ListResponse<TransferReceipt> = self
            .get("/api/transfers/", &[("limit", limit.to_string())])
            .await?;
        Ok(response.normalize().items)
    }

    async fn overview_report(&self) -> ApiResult<OverviewReport> {
        self.get("/api/reports/overview/", &[]).await
    }

    async fn low_stock_report(&self) -> ApiResult<Vec<LowStockRow>> {
        let response: ListResponse<LowStockRow> =
            self.get("/api/reports/low-stock/", &[]).await?;
        Ok(response.normalize().items)
    }

    async fn top_selling_report(&self) -> ApiResult<Vec<TopSellingRow>> {
        let response: ListResponse<TopSellingRow> =
            self.get("/api/reports/top-selling/", &[]).await?;
        Ok(response.normalize().items)
    }

    async fn stock_per_location_report(
        &self,
        location_id: Option<LocationId>,
    ) -> ApiResult<Vec<StockPerLocationRow>> {
        let params: Vec<(&str, String)> = location_id
            .map(|id| vec![("location_id", id.to_string())])
            .unwrap_or_default();
        let response: ListResponse<StockPerLocationRow> = self
            .get("/api/reports/stock-per-location/", &params)
            .await?;
        Ok(response.normalize().items)
    }
}
