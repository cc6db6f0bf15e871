//! Bounded retry with backoff for transient provider failures.

use fabula_error::{FabulaError, FabulaErrorKind, ProviderError};
use std::future::Future;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

const INITIAL_BACKOFF_MS: u64 = 1000;
const MAX_DELAY_SECS: u64 = 30;
const MAX_RETRIES: usize = 3;

fn is_retryable(err: &FabulaError) -> bool {
    match err.kind() {
        FabulaErrorKind::Provider(ProviderError { kind, .. }) => kind.is_retryable(),
        _ => false,
    }
}

/// Run `operation` with exponential backoff and jitter, retrying only
/// transient provider errors (429, 5xx, transport failures).
pub(crate) async fn with_backoff<T, F, Fut>(operation: F) -> Result<T, FabulaError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, FabulaError>>,
{
    let retry_strategy = ExponentialBackoff::from_millis(INITIAL_BACKOFF_MS)
        .factor(2)
        .max_delay(std::time::Duration::from_secs(MAX_DELAY_SECS))
        .map(jitter)
        .take(MAX_RETRIES);

    Retry::spawn(retry_strategy, || async {
        match operation().await {
            Ok(value) => Ok(value),
            Err(e) if is_retryable(&e) => {
                warn!(error = %e, "Transient provider error, will retry");
                Err(RetryError::Transient {
                    err: e,
                    retry_after: None,
                })
            }
            Err(e) => Err(RetryError::Permanent(e)),
        }
    })
    .await
}
