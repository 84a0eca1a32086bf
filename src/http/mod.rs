//! HTTP transport with retry logic and error classification.

mod retry;
mod transport;

pub use retry::{RetryPolicy, is_retryable, with_retry};
#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
