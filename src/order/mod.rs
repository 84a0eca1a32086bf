//! Typed orders and results exchanged with the Ticimax API.

mod item;
mod request;
mod result;

pub use item::OrderItem;
pub use request::{ORDER_DATE_FORMAT, OrderRequest, today};
pub use result::{OrderListResult, OrderResult};
