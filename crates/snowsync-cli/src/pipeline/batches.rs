//! Generic batch driver for the pipeline.
//!
//! Partitions items into consecutive groups of `batch_size`, drives each
//! group with bounded concurrency (`buffer_unordered`), and pauses between
//! groups to bound the request rate against the source site and the model
//! backend. Groups run strictly in sequence; items within a group have no
//! ordering guarantee. Cancellation and store-outage escalation are checked
//! between groups only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::stream::{self, StreamExt};

use super::item::StageError;

/// Why a run stopped before reaching the end of the target list.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum AbortReason {
    Cancelled,
    StoreUnreachable { consecutive: usize },
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::Cancelled => write!(f, "cancellation requested"),
            AbortReason::StoreUnreachable { consecutive } => {
                write!(f, "store unreachable for {consecutive} consecutive items")
            }
        }
    }
}

/// Outcomes of a batched run: one terminal result per item that was driven,
/// in completion order, plus the reason the run stopped early (if it did).
pub(crate) struct BatchRun<T> {
    pub outcomes: Vec<(T, Result<(), StageError>)>,
    pub aborted: Option<AbortReason>,
}

/// Drives `process` over `items` in consecutive groups of `batch_size`.
///
/// Within a group up to `batch_size` item-pipelines are in flight at once;
/// the next group never starts before every item of the current group has
/// reached a terminal state. `inter_batch_delay` is slept between groups
/// (never after the last). Items not yet driven when the run stops early are
/// absent from `outcomes`.
///
/// `store_failure_limit` bounds consecutive store-outage failures: once
/// reached, continuing would be pointless, so the run stops after the
/// current group. A limit of `0` disables the escalation.
pub(crate) async fn run_in_batches<T, F, Fut>(
    items: Vec<T>,
    batch_size: usize,
    inter_batch_delay: Duration,
    store_failure_limit: usize,
    cancel: &AtomicBool,
    process: F,
) -> BatchRun<T>
where
    T: Clone,
    F: Fn(T) -> Fut,
    Fut: std::future::Future<Output = Result<(), StageError>>,
{
    let batch_size = batch_size.max(1);
    let total_batches = items.len().div_ceil(batch_size);

    let mut outcomes: Vec<(T, Result<(), StageError>)> = Vec::with_capacity(items.len());
    let mut aborted = None;
    let mut consecutive_outages = 0usize;

    let mut remaining = items.into_iter();
    for batch_index in 0..total_batches {
        let group: Vec<T> = remaining.by_ref().take(batch_size).collect();
        if group.is_empty() {
            break;
        }

        tracing::debug!(
            batch = batch_index + 1,
            total_batches,
            size = group.len(),
            "starting batch"
        );

        let results: Vec<(T, Result<(), StageError>)> = stream::iter(group)
            .map(|item| {
                let fut = process(item.clone());
                async move { (item, fut.await) }
            })
            .buffer_unordered(batch_size)
            .collect()
            .await;

        // Completion order within the group is arbitrary; the outage counter
        // only needs to notice a sustained run of connectivity failures.
        for (_, outcome) in &results {
            match outcome {
                Err(e) if e.is_store_outage() => consecutive_outages += 1,
                _ => consecutive_outages = 0,
            }
        }
        outcomes.extend(results);

        if store_failure_limit > 0 && consecutive_outages >= store_failure_limit {
            aborted = Some(AbortReason::StoreUnreachable {
                consecutive: consecutive_outages,
            });
            break;
        }

        if cancel.load(Ordering::SeqCst) {
            aborted = Some(AbortReason::Cancelled);
            break;
        }

        let more_batches_remain = batch_index + 1 < total_batches;
        if more_batches_remain && !inter_batch_delay.is_zero() {
            tokio::time::sleep(inter_batch_delay).await;
        }
    }

    BatchRun { outcomes, aborted }
}

#[cfg(test)]
#[path = "batches_test.rs"]
mod tests;
