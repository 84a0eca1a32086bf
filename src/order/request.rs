use serde::{Deserialize, Serialize};

use super::OrderItem;

/// Format of `SiparisTarihi`.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local date as the API expects it, e.g. `2024-03-09`.
pub fn today() -> String {
    chrono::Local::now().format(ORDER_DATE_FORMAT).to_string()
}

/// Payload for `SiparisEkle`.
///
/// Items keep the order they were added in. Every optional field is sent,
/// as `null` when unset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderRequest {
    #[serde(rename = "SiparisNo")]
    pub order_number: String,
    #[serde(rename = "MusteriKodu")]
    pub customer_code: String,
    #[serde(rename = "Urunler", default)]
    pub items: Vec<OrderItem>,
    #[serde(rename = "Notlar", default)]
    pub notes: Option<String>,
    #[serde(rename = "OdemeTipi", default)]
    pub payment_type: Option<String>,
    #[serde(rename = "OdemeYontemi", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "ToplamTutar", default)]
    pub total_amount: Option<f64>,
    #[serde(rename = "KargoTutari", default)]
    pub shipping_amount: Option<f64>,
    #[serde(rename = "TeslimatAdresi", default)]
    pub delivery_address: Option<String>,
    #[serde(rename = "TeslimatIl", default)]
    pub delivery_city: Option<String>,
    #[serde(rename = "TeslimatIlce", default)]
    pub delivery_county: Option<String>,
    #[serde(rename = "FaturaAdresi", default)]
    pub billing_address: Option<String>,
    #[serde(rename = "FaturaIl", default)]
    pub billing_city: Option<String>,
    #[serde(rename = "FaturaIlce", default)]
    pub billing_county: Option<String>,
    #[serde(rename = "MusteriTelefon", default)]
    pub customer_phone: Option<String>,
    #[serde(rename = "MusteriEposta", default)]
    pub customer_email: Option<String>,
    #[serde(rename = "SiparisTarihi", default = "today", deserialize_with = "date_or_today")]
    pub order_date: String,
}

impl OrderRequest {
    /// A new order dated today with no optional fields set.
    pub fn new(
        order_number: impl Into<String>,
        customer_code: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Self {
        Self {
            order_number: order_number.into(),
            customer_code: customer_code.into(),
            items,
            notes: None,
            payment_type: None,
            payment_method: None,
            total_amount: None,
            shipping_amount: None,
            delivery_address: None,
            delivery_city: None,
            delivery_county: None,
            billing_address: None,
            billing_city: None,
            billing_county: None,
            customer_phone: None,
            customer_email: None,
            order_date: today(),
        }
    }

    pub fn order_date(mut self, date: impl Into<String>) -> Self {
        self.order_date = date.into();
        self
    }
}

/// Treats an explicit `null` date the same as a missing one.
fn date_or_today<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let date = Option::<String>::deserialize(deserializer)?;
    Ok(date.unwrap_or_else(today))
}
