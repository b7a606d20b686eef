//! # Retry With Backoff
//!
//! `spec.md` §5 "External I/O is cancellable": fetches against the
//! external ledger and against evidence URIs retry with exponential
//! backoff up to a bounded count; beyond the budget the caller surfaces a
//! warn-class failure, never a silent skip. Named constants rather than
//! magic numbers, per `SPEC_FULL.md` §10.5 — three lines of backoff
//! arithmetic did not warrant a new external dependency the teacher's
//! workspace does not already carry.

use std::time::Duration;

/// Recommended per-attempt timeout (`spec.md` §5).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Recommended retry budget (`spec.md` §5).
pub const DEFAULT_RETRIES: u32 = 3;
/// Initial backoff delay; doubles after each failed attempt.
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(200);

/// Retry `attempt` up to [`DEFAULT_RETRIES`] times with doubling backoff,
/// returning the last error if every attempt fails.
pub async fn with_retry<F, Fut, T, E>(mut attempt: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let mut delay = INITIAL_BACKOFF;
    let mut last_err = None;
    for attempt_number in 0..DEFAULT_RETRIES {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                tracing::warn!(attempt_number, "external I/O attempt failed, retrying");
                last_err = Some(error);
                if attempt_number + 1 < DEFAULT_RETRIES {
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
    Err(last_err.expect("loop runs at least once since DEFAULT_RETRIES > 0"))
}
