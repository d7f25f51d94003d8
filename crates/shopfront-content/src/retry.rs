//! Retry with exponential backoff and jitter for content-API requests.
//!
//! Only transient failures are retried. Everything else, including 404s that
//! drive the product-lookup fallback, is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ContentError;

/// Returns `true` for errors worth retrying after a backoff delay.
///
/// Retriable:
/// - [`ContentError::RateLimited`]: HTTP 429.
/// - [`ContentError::Http`]: timeout or connection failure.
///
/// Everything else is a hard answer from the server or a bad payload.
fn is_retriable(err: &ContentError) -> bool {
    match err {
        ContentError::RateLimited { .. } => true,
        ContentError::Http(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}

/// Runs `operation`, retrying transient errors up to `max_retries` more times.
///
/// The wait before retry `n` is `backoff_base_ms * 2^(n-1)` with ±25 % jitter,
/// capped at 30 s. A 429 with a longer `Retry-After` waits that long instead.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ContentError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ContentError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;

                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (computed.min(MAX_DELAY_MS) as f64
                    * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let delay_ms = match &err {
                    ContentError::RateLimited { retry_after_secs } => {
                        jittered.max(retry_after_secs.saturating_mul(1_000).min(MAX_DELAY_MS))
                    }
                    _ => jittered,
                };

                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient content API error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn rate_limited() -> ContentError {
        ContentError::RateLimited {
            retry_after_secs: 0,
        }
    }

    #[test]
    fn not_found_is_not_retriable() {
        assert!(!is_retriable(&ContentError::NotFound {
            url: "http://localhost:1337/api/products/1".to_owned(),
        }));
    }

    #[test]
    fn product_not_found_is_not_retriable() {
        assert!(!is_retriable(&ContentError::ProductNotFound { id: 4 }));
    }

    #[test]
    fn rate_limited_is_retriable() {
        assert!(is_retriable(&rate_limited()));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ContentError>(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limited_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(rate_limited())
                } else {
                    Ok::<u32, ContentError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(0, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ContentError>(rate_limited())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ContentError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ContentError>(ContentError::NotFound {
                    url: "http://localhost:1337/api/products/9".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ContentError::NotFound { .. })));
    }
}
