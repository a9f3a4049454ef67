//! # First-Success Race
//!
//! "Resolve on the first success, fail only when everything failed."
//!
//! This is neither `join_all` (waits for everything) nor `select` (takes the
//! first settled future, success or failure). All operations are polled
//! concurrently in the calling task; each failure is recorded in settlement
//! order and the race keeps going while anything is still outstanding.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;

/// Race `operations`, returning the first `Ok` or every `Err` in the order
/// they settled.
///
/// Once a winner is found the remaining operations are dropped, so their
/// eventual outcome can never be observed. An empty input fails immediately
/// with an empty list.
pub async fn race_first_success<I, F, T, E>(operations: I) -> Result<T, Vec<E>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut outstanding: FuturesUnordered<F> = operations.into_iter().collect();
    let mut failures = Vec::with_capacity(outstanding.len());

    while let Some(outcome) = outstanding.next().await {
        match outcome {
            Ok(value) => return Ok(value),
            Err(err) => {
                failures.push(err);
                tracing::trace!(
                    failed = failures.len(),
                    outstanding = outstanding.len(),
                    "race participant failed"
                );
            }
        }
    }

    Err(failures)
}
