//! Ticimax order API client.

use log::debug;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, ReqwestTransport, RetryPolicy, Transport, TransportError};
use crate::mapper;
use crate::order::{OrderListResult, OrderRequest, OrderResult};

pub const ENDPOINT_CREATE_ORDER: &str = "/api/Siparis/SiparisEkle";
pub const ENDPOINT_GET_ORDER: &str = "/api/Siparis/SiparisDetay";
pub const ENDPOINT_LIST_ORDERS: &str = "/api/Siparis/SiparisListele";

pub const QUERY_ORDER_ID: &str = "siparisId";
pub const QUERY_PAGE: &str = "sayfa";
pub const QUERY_PAGE_SIZE: &str = "sayfaBasiKayitSayisi";

/// Prefixes of transport error messages, one per operation.
pub const CREATE_ORDER_FAILED: &str = "Order creation failed";
pub const GET_ORDER_FAILED: &str = "Failed to get order";
pub const LIST_ORDERS_FAILED: &str = "Failed to get order list";

pub const DEFAULT_LIST_PAGE: u32 = 1;
pub const DEFAULT_LIST_PAGE_SIZE: u32 = 100;

/// Client for the Ticimax order endpoints.
///
/// Every call goes through the configured [`RetryPolicy`]. Retry state lives
/// in the call, so one client can serve any number of sequential or
/// concurrent calls.
pub struct TicimaxClient {
    base_url: String,
    headers: HeaderMap,
    retry: RetryPolicy,
    transport: Box<dyn Transport>,
}

impl TicimaxClient {
    /// Creates a client using a reqwest transport with the configured timeout.
    #[tracing::instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::with_timeout(config.timeout())
            .map_err(|e| ApiError::unexpected(&e).with_source(e))?;
        Self::with_transport(config, Box::new(transport))
    }

    pub fn with_transport(
        config: &ClientConfig,
        transport: Box<dyn Transport>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            headers: default_headers(&config.api_key)?,
            retry: RetryPolicy::new(config.retry_times, config.retry_sleep()),
            transport,
        })
    }

    /// Swaps the transport, keeping URL, headers and retry policy.
    pub fn set_transport(&mut self, transport: Box<dyn Transport>) {
        self.transport = transport;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Creates a new order.
    ///
    /// A rejected order comes back as `Ok` with `success == false`.
    #[tracing::instrument(skip(self, order), fields(order_number = %order.order_number))]
    pub async fn create_order(&self, order: &OrderRequest) -> Result<OrderResult, ApiError> {
        debug!(
            "Creating order {} with {} item(s)...",
            order.order_number,
            order.items.len()
        );

        let body =
            mapper::request_to_wire(order).map_err(|e| ApiError::unexpected(&e).with_source(e))?;

        let mut request = self.request(Method::POST, ENDPOINT_CREATE_ORDER);
        request.body = Some(body);

        let data = self.execute(CREATE_ORDER_FAILED, request).await?;
        Ok(mapper::order_result_from_wire(data))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> Result<OrderResult, ApiError> {
        debug!("Fetching order {}...", order_id);

        let mut request = self.request(Method::GET, ENDPOINT_GET_ORDER);
        request
            .query
            .push((QUERY_ORDER_ID.to_string(), order_id.to_string()));

        let data = self.execute(GET_ORDER_FAILED, request).await?;
        Ok(mapper::order_result_from_wire(data))
    }

    /// Lists orders matching `filters`, e.g. `baslangicTarihi`, `bitisTarihi`,
    /// `siparisNo`, `siparisIDleri`.
    #[tracing::instrument(skip(self, filters))]
    pub async fn get_orders(
        &self,
        filters: &BTreeMap<String, String>,
        page: u32,
        page_size: u32,
    ) -> Result<OrderListResult, ApiError> {
        debug!(
            "Listing orders page {} ({} per page) with filters {:?}...",
            page, page_size, filters
        );

        let mut request = self.request(Method::GET, ENDPOINT_LIST_ORDERS);
        request.query = list_query(filters, page, page_size);

        let data = self.execute(LIST_ORDERS_FAILED, request).await?;
        Ok(mapper::order_list_from_wire(data))
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, format!("{}{}", self.base_url, path));
        request.headers = self.headers.clone();
        request
    }

    /// Sends `request` under the retry policy and returns the response object.
    /// `operation` prefixes transport error messages and retry log lines.
    async fn execute(
        &self,
        operation: &str,
        request: HttpRequest,
    ) -> Result<Map<String, Value>, ApiError> {
        let transport = self.transport.as_ref();

        let outcome = self
            .retry
            .run(operation, || {
                let request = request.clone();
                async move { transport.send(request).await }
            })
            .await;

        let response = match outcome {
            Ok(response) => response,
            Err(e @ TransportError::Connection(_)) => {
                return Err(ApiError::transport(operation, &e, 0).with_source(e));
            }
            Err(e @ TransportError::Request(_)) => {
                return Err(ApiError::unexpected(&e).with_source(e));
            }
        };

        match mapper::parse_body(&response.body) {
            Some(data) => Ok(data),
            None if response.is_error_status() => Err(ApiError::transport(
                operation,
                format!("HTTP {}", response.status),
                response.status,
            )
            .with_detail("body", response.body)),
            None => Err(ApiError::invalid_response()
                .with_detail("status", response.status)
                .with_detail("body", response.body)),
        }
    }
}

/// Filter pairs followed by the pagination keys. Pagination always wins
/// over a filter of the same name.
pub fn list_query(
    filters: &BTreeMap<String, String>,
    page: u32,
    page_size: u32,
) -> Vec<(String, String)> {
    let mut query: Vec<(String, String)> = filters
        .iter()
        .filter(|(key, _)| key.as_str() != QUERY_PAGE && key.as_str() != QUERY_PAGE_SIZE)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    query.push((QUERY_PAGE.to_string(), page.to_string()));
    query.push((QUERY_PAGE_SIZE.to_string(), page_size.to_string()));
    query
}

fn default_headers(api_key: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|e| ApiError::unexpected(format!("invalid API key: {}", e)).with_source(e))?;
    auth_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_value);

    Ok(headers)
}
