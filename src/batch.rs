//! Batched fetching for index views.
//!
//! Items are requested in parallel batches of a fixed size; each batch is
//! awaited as a whole, then the loader pauses before starting the next. This
//! is a fixed-window rate limit, not backpressure.
//!
//! A malformed item is logged and dropped. Any other failure (an item that
//! could not be fetched after all retries) fails the whole load.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;

use kalam_core::error::ViewError;

use crate::config::IndexConfig;
use crate::progress::{IndexProgressEvent, IndexProgressReporter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub batch_size: usize,
    pub pause: Duration,
}

impl From<&IndexConfig> for BatchPlan {
    fn from(config: &IndexConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            pause: Duration::from_millis(config.batch_pause_ms),
        }
    }
}

/// Fetch every item of `numbers` with `fetch`, batch by batch, keeping the
/// input order.
pub async fn load_batched<T, F, Fut>(
    index: &str,
    numbers: &[u16],
    plan: BatchPlan,
    reporter: &dyn IndexProgressReporter,
    fetch: F,
) -> Result<Vec<T>, ViewError>
where
    F: Fn(u16) -> Fut,
    Fut: Future<Output = Result<T, ViewError>>,
{
    let total = numbers.len() as u64;
    let mut loaded = 0u64;
    let mut dropped = 0u64;
    let mut items = Vec::with_capacity(numbers.len());

    for (i, batch) in numbers.chunks(plan.batch_size.max(1)).enumerate() {
        if i > 0 && !plan.pause.is_zero() {
            tokio::time::sleep(plan.pause).await;
        }

        let results = join_all(batch.iter().map(|&n| fetch(n))).await;
        for (n, result) in batch.iter().zip(results) {
            match result {
                Ok(item) => items.push(item),
                Err(ViewError::MalformedResponse { target, reason }) => {
                    log::warn!("{} {}: skipping malformed item {}: {}", index, n, target, reason);
                    dropped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        loaded += batch.len() as u64;
        reporter.report(IndexProgressEvent::Batch {
            index: index.to_string(),
            loaded,
            total,
        });
    }

    reporter.report(IndexProgressEvent::Done {
        index: index.to_string(),
        kept: items.len() as u64,
        dropped,
    });
    Ok(items)
}
