//! Translation between typed orders and the Ticimax wire schema.
//!
//! Requests map one-to-one through their serde field names. Responses are
//! read as loose JSON objects: absent or null keys fall back to defaults and
//! never cause an error.

use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::order::{OrderListResult, OrderRequest, OrderResult};

/// Response keys used by the order endpoints.
pub mod keys {
    pub const STATUS: &str = "Durum";
    pub const SUCCESS_FLAG: &str = "Basarili";
    pub const ORDER_ID: &str = "SiparisID";
    pub const MESSAGE: &str = "Mesaj";
    pub const ORDERS: &str = "Siparis";
    pub const TOTAL_COUNT: &str = "ToplamAdet";
    pub const PAGE: &str = "Sayfa";
    pub const PAGE_SIZE: &str = "SayfaBasiKayitSayisi";
}

/// `Durum` value reported for a successful operation.
pub const STATUS_SUCCESS: &str = "Basarili";

pub const DEFAULT_TOTAL_COUNT: u64 = 0;
pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

pub fn request_to_wire(request: &OrderRequest) -> Result<Value, serde_json::Error> {
    serde_json::to_value(request)
}

/// Reads an order in wire form back, e.g. one echoed by the API.
pub fn request_from_wire(value: &Value) -> Result<OrderRequest, serde_json::Error> {
    OrderRequest::deserialize(value)
}

/// Returns the body as a JSON object, or `None` if it is empty, not JSON,
/// not an object, or an object without keys.
pub fn parse_body(body: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Some(map),
        Ok(other) => {
            debug!("Response body is not a non-empty object: {}", other);
            None
        }
        Err(e) => {
            debug!("Response body is not JSON: {}", e);
            None
        }
    }
}

/// Success is `Durum == "Basarili"` or `Basarili == true`; either one is enough.
pub fn order_result_from_wire(data: Map<String, Value>) -> OrderResult {
    let status_ok = data.get(keys::STATUS).and_then(Value::as_str) == Some(STATUS_SUCCESS);
    let flag_ok = data.get(keys::SUCCESS_FLAG).and_then(Value::as_bool) == Some(true);

    OrderResult {
        success: status_ok || flag_ok,
        order_id: data.get(keys::ORDER_ID).and_then(scalar_string),
        message: data.get(keys::MESSAGE).and_then(scalar_string),
        data,
    }
}

pub fn order_list_from_wire(data: Map<String, Value>) -> OrderListResult {
    let orders = match data.get(keys::ORDERS) {
        Some(Value::Array(records)) => records.clone(),
        Some(record @ Value::Object(_)) => vec![record.clone()],
        _ => Vec::new(),
    };

    OrderListResult {
        orders,
        total_count: count_or(&data, keys::TOTAL_COUNT, DEFAULT_TOTAL_COUNT),
        page: count_or(&data, keys::PAGE, DEFAULT_PAGE),
        page_size: count_or(&data, keys::PAGE_SIZE, DEFAULT_PAGE_SIZE),
    }
}

/// Strings as-is, numbers and booleans in their JSON spelling; null and
/// containers yield `None`.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn count_or(data: &Map<String, Value>, key: &str, default: u64) -> u64 {
    let count = match data.get(key) {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    count.unwrap_or(default)
}
