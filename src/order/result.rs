use serde::Serialize;
use serde_json::{Map, Value};

/// Outcome of `SiparisEkle` or `SiparisDetay`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OrderResult {
    pub success: bool,
    /// `SiparisID`, as a string whether the API sent a number or a string.
    pub order_id: Option<String>,
    pub message: Option<String>,
    /// The full response object.
    pub data: Map<String, Value>,
}

/// One page of `SiparisListele`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OrderListResult {
    /// Raw order records in the order the API returned them.
    pub orders: Vec<Value>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}

impl OrderListResult {
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }
}
