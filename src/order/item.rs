use serde::{Deserialize, Serialize};

/// A single order line.
///
/// The line total is fixed at construction: either given explicitly or
/// computed as `price * quantity`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "OrderItemWire")]
pub struct OrderItem {
    #[serde(rename = "UrunKodu")]
    pub product_code: String,
    #[serde(rename = "Miktar")]
    pub quantity: f64,
    #[serde(rename = "BirimFiyat")]
    pub price: f64,
    #[serde(rename = "ToplamTutar")]
    total_price: f64,
    #[serde(rename = "UrunAdi")]
    pub product_name: Option<String>,
    #[serde(rename = "VaryasyonKodu")]
    pub variant_code: Option<String>,
    #[serde(rename = "Barkod")]
    pub barcode: Option<String>,
    #[serde(rename = "KDV")]
    pub tax: Option<f64>,
    #[serde(rename = "Indirim")]
    pub discount: Option<f64>,
}

impl OrderItem {
    pub fn new(product_code: impl Into<String>, quantity: f64, price: f64) -> Self {
        Self::with_total(product_code, quantity, price, None)
    }

    /// Like [`OrderItem::new`], but with an explicit line total when one is given.
    pub fn with_total(
        product_code: impl Into<String>,
        quantity: f64,
        price: f64,
        total_price: Option<f64>,
    ) -> Self {
        Self {
            product_code: product_code.into(),
            quantity,
            price,
            total_price: total_price.unwrap_or(price * quantity),
            product_name: None,
            variant_code: None,
            barcode: None,
            tax: None,
            discount: None,
        }
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn variant_code(mut self, code: impl Into<String>) -> Self {
        self.variant_code = Some(code.into());
        self
    }

    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn tax(mut self, tax: f64) -> Self {
        self.tax = Some(tax);
        self
    }

    pub fn discount(mut self, discount: f64) -> Self {
        self.discount = Some(discount);
        self
    }
}

/// Incoming shape, where the line total may be missing or null.
#[derive(Deserialize)]
struct OrderItemWire {
    #[serde(rename = "UrunKodu")]
    product_code: String,
    #[serde(rename = "Miktar")]
    quantity: f64,
    #[serde(rename = "BirimFiyat")]
    price: f64,
    #[serde(rename = "ToplamTutar", default)]
    total_price: Option<f64>,
    #[serde(rename = "UrunAdi", default)]
    product_name: Option<String>,
    #[serde(rename = "VaryasyonKodu", default)]
    variant_code: Option<String>,
    #[serde(rename = "Barkod", default)]
    barcode: Option<String>,
    #[serde(rename = "KDV", default)]
    tax: Option<f64>,
    #[serde(rename = "Indirim", default)]
    discount: Option<f64>,
}

impl From<OrderItemWire> for OrderItem {
    fn from(wire: OrderItemWire) -> Self {
        let mut item = OrderItem::with_total(
            wire.product_code,
            wire.quantity,
            wire.price,
            wire.total_price,
        );
        item.product_name = wire.product_name;
        item.variant_code = wire.variant_code;
        item.barcode = wire.barcode;
        item.tax = wire.tax;
        item.discount = wire.discount;
        item
    }
}
