//! The single error type raised by the Ticimax client.

use serde_json::{Map, Value};

/// Fixed message for successful HTTP exchanges whose body cannot be used.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from Ticimax API";

/// Broad class of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable response after retries (connection failure, timeout, HTTP error status).
    Transport,
    /// The request went through but the body was empty or not a JSON object.
    InvalidResponse,
    /// Anything else on the call path.
    Unexpected,
}

/// Error returned by every client operation.
///
/// A remote business failure (`"Durum": "Hatali"`) is not an `ApiError`; it
/// arrives as an [`OrderResult`](crate::order::OrderResult) with
/// `success == false`.
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    code: u16,
    details: Map<String, Value>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, code: u16) -> Self {
        Self {
            kind,
            message: message.into(),
            code,
            details: Map::new(),
            source: None,
        }
    }

    /// `"<failure>: <cause>"`, e.g. `"Failed to get order: HTTP 404"`, carrying
    /// the HTTP status when there was one.
    pub fn transport(failure: &str, cause: impl std::fmt::Display, code: u16) -> Self {
        Self::new(ErrorKind::Transport, format!("{}: {}", failure, cause), code)
    }

    pub fn invalid_response() -> Self {
        Self::new(ErrorKind::InvalidResponse, INVALID_RESPONSE_MESSAGE, 500)
    }

    pub fn unexpected(cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::Unexpected,
            format!("An unexpected error occurred: {}", cause),
            0,
        )
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status for transport failures, 500 for invalid responses, 0 when unknown.
    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (code {})", self.message, self.code)
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
