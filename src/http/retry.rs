//! Retry with exponential backoff around a single HTTP exchange.

use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

use super::transport::{HttpResponse, TransportError};

/// When and how long to wait before re-sending a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry. Doubles for each one after it.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Backoff before retry number `retry` (zero-indexed): `base_delay * 2^retry`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Runs `operation` under this policy using [`is_retryable`].
    pub async fn run<F, Fut>(
        &self,
        operation_name: &str,
        operation: F,
    ) -> Result<HttpResponse, TransportError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<HttpResponse, TransportError>>,
    {
        with_retry(
            operation_name,
            self.max_retries,
            is_retryable,
            |retry| self.delay_for(retry),
            operation,
        )
        .await
    }
}

/// Whether an HTTP outcome is worth sending again.
///
/// Connection-level failures, 5xx and 429 are retried. Everything else,
/// including other 4xx statuses, is final.
pub fn is_retryable(outcome: &Result<HttpResponse, TransportError>) -> bool {
    match outcome {
        Ok(response) => response.status >= 500 || response.status == 429,
        Err(TransportError::Connection(_)) => true,
        Err(TransportError::Request(_)) => false,
    }
}

/// Calls `operation` until `should_retry` rejects the outcome or `max_retries`
/// retries have been spent, sleeping `delay(retry)` before each retry.
///
/// The last outcome is returned unchanged, so an exhausted run yields the
/// final 5xx response or connection error rather than a synthetic one.
pub async fn with_retry<T, E, F, Fut, P, D>(
    operation_name: &str,
    max_retries: u32,
    should_retry: P,
    delay: D,
    operation: F,
) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&Result<T, E>) -> bool,
    D: Fn(u32) -> Duration,
{
    let mut retries = 0;

    loop {
        let outcome = operation().await;

        if !should_retry(&outcome) {
            return outcome;
        }

        if retries >= max_retries {
            debug!("{}: giving up after {} retries", operation_name, retries);
            return outcome;
        }

        let wait = delay(retries);
        warn!(
            "{}: attempt {}/{} failed, retrying in {}ms...",
            operation_name,
            retries + 1,
            max_retries + 1,
            wait.as_millis()
        );
        tokio::time::sleep(wait).await;
        retries += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn response(status: u16) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            body: String::new(),
        })
    }

    #[test]
    fn test_delay_doubles_from_base() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
    }

    #[test]
    fn test_delay_saturates() {
        let policy = RetryPolicy::new(100, Duration::from_secs(u64::MAX / 2));
        assert_eq!(policy.delay_for(40), Duration::MAX);
    }

    #[test]
    fn test_is_retryable_statuses() {
        assert!(is_retryable(&response(500)));
        assert!(is_retryable(&response(503)));
        assert!(is_retryable(&response(429)));
        assert!(!is_retryable(&response(200)));
        assert!(!is_retryable(&response(400)));
        assert!(!is_retryable(&response(404)));
    }

    #[test]
    fn test_is_retryable_transport_errors() {
        assert!(is_retryable(&Err(TransportError::Connection(
            "connection refused".to_string()
        ))));
        assert!(!is_retryable(&Err(TransportError::Request(
            "builder error".to_string()
        ))));
    }

    #[tokio::test]
    async fn test_with_retry_success_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<i32, String> = with_retry(
            "test",
            3,
            |r| r.is_err(),
            |_| Duration::ZERO,
            || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_recovers() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<&str, String> = with_retry(
            "test",
            3,
            |r| r.is_err(),
            |_| Duration::ZERO,
            || {
                let calls = calls.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("connection reset".to_string())
                    } else {
                        Ok("success after retries")
                    }
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), "success after retries");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_exhausts_and_returns_last_outcome() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<(), String> = with_retry(
            "test",
            2,
            |r| r.is_err(),
            |_| Duration::ZERO,
            || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    Err(format!("failure {}", n))
                }
            },
        )
        .await;

        assert_eq!(result.unwrap_err(), "failure 2");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_zero_retries_is_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<(), String> = with_retry(
            "test",
            0,
            |_| true,
            |_| Duration::ZERO,
            || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err("down".to_string())
                }
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_passes_retry_index_to_delay() {
        let seen = std::sync::Mutex::new(Vec::new());
        let _: Result<(), ()> = with_retry(
            "test",
            3,
            |_| true,
            |retry| {
                seen.lock().unwrap().push(retry);
                Duration::ZERO
            },
            || async { Err(()) },
        )
        .await;

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_policy_run_sleeps_exponentially() {
        let policy = RetryPolicy::new(2, Duration::from_millis(100));
        let start = tokio::time::Instant::now();

        let result = policy.run("test", || async { response(503) }).await;

        assert_eq!(result.unwrap().status, 503);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_policy_run_stops_on_client_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = policy
            .run("test", || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    response(404)
                }
            })
            .await;

        assert_eq!(result.unwrap().status, 404);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
