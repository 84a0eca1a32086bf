//! Async client for the Ticimax e-commerce order API.
//!
//! ```no_run
//! use ticimax::{ClientConfig, OrderItem, OrderRequest, TicimaxClient};
//!
//! # async fn example() -> Result<(), ticimax::ApiError> {
//! let client = TicimaxClient::new(&ClientConfig::new("https://shop.example", "api-key"))?;
//! let order = OrderRequest::new("ORDER-1", "CUST001", vec![OrderItem::new("PROD001", 2.0, 50.0)]);
//! let result = client.create_order(&order).await?;
//! println!("created: {} ({:?})", result.success, result.order_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mapper;
pub mod order;

pub use client::TicimaxClient;
pub use config::ClientConfig;
pub use error::{ApiError, ErrorKind};
pub use order::{OrderItem, OrderListResult, OrderRequest, OrderResult};
