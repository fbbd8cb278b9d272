/*!
 * Batched concurrent execution with inter-batch pacing.
 *
 * The fetch, translate and review stages all share the same discipline:
 * process the retained file list in consecutive chunks of at most
 * `batch_size`, run every operation in a chunk concurrently, join the whole
 * chunk before starting the next one, and pause for `delay` between chunks.
 * The pacing is a value handed to the runner, so tests run with no delay.
 */

use anyhow::Result;
use futures::future::try_join_all;
use log::info;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Pacing policy for batched stages
#[derive(Debug, Clone)]
pub struct BatchPacing {
    /// Maximum operations started concurrently per batch
    pub batch_size: usize,

    /// Pause inserted between the completion of one batch and the next
    pub delay: Duration,
}

impl BatchPacing {
    /// Create a pacing policy; a batch size of zero is clamped to one
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            delay,
        }
    }

    /// Pacing without any inter-batch pause, used by tests
    pub fn unthrottled(batch_size: usize) -> Self {
        Self::new(batch_size, Duration::ZERO)
    }

    /// Number of batches needed for `total` items
    pub fn batch_count(&self, total: usize) -> usize {
        total.div_ceil(self.batch_size)
    }
}

impl Default for BatchPacing {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(3))
    }
}

/// Runs a stage's operations in paced concurrent batches
pub struct BatchRunner {
    pacing: BatchPacing,
}

impl BatchRunner {
    /// Create a new runner with the given pacing policy
    pub fn new(pacing: BatchPacing) -> Self {
        Self { pacing }
    }

    /// Process `items` in order, returning one result per item in the same
    /// order. All operations within a batch run concurrently; a batch only
    /// starts once the previous batch has fully completed and the pacing
    /// delay has elapsed. The first failed operation aborts the whole run.
    ///
    /// `on_batch` is invoked after each completed batch with
    /// `(completed_batches, total_batches)` for progress reporting.
    pub async fn run<T, R, F, Fut>(
        &self,
        stage: &str,
        items: Vec<T>,
        op: F,
        mut on_batch: impl FnMut(usize, usize),
    ) -> Result<Vec<R>>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let total_batches = self.pacing.batch_count(items.len());
        let mut results = Vec::with_capacity(items.len());
        let mut remaining = items.into_iter();
        let mut batch_index = 0;

        loop {
            let chunk: Vec<T> = remaining.by_ref().take(self.pacing.batch_size).collect();
            if chunk.is_empty() {
                break;
            }

            // Pause between batches, not before the first or after the last
            if batch_index > 0 && !self.pacing.delay.is_zero() {
                sleep(self.pacing.delay).await;
            }
            batch_index += 1;

            info!(">> [{}] Starting batch {} of {}", stage, batch_index, total_batches);

            let batch_results = try_join_all(chunk.into_iter().map(&op)).await?;
            results.extend(batch_results);

            on_batch(batch_index, total_batches);
        }

        Ok(results)
    }
}
