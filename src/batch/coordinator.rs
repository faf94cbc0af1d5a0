//! Dispatch and aggregation.
//!
//! The coordinator partitions the file list, spawns one task per chunk and
//! then runs a single-consumer aggregation loop: every worker sends exactly
//! one [`WorkerOutcome`] over an mpsc channel, and only the coordinator
//! mutates the running summary. The batch is complete exactly when the number
//! of received reports equals the effective worker count.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::core::{AggregateSummary, BatchContext, BatchOutcome, partition};
use crate::processing::Transform;
use crate::utils::{ConverterError, ConverterResult};

use super::worker::{self, WorkerOutcome};

/// Lifecycle of a single batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Dispatching,
    Aggregating,
    Completed,
    Failed,
}

/// Creates one worker per chunk and consolidates their reports.
pub struct Coordinator<T: Transform> {
    transform: Arc<T>,
    state: BatchState,
}

impl<T: Transform> Coordinator<T> {
    pub fn new(transform: T) -> Self {
        Self {
            transform: Arc::new(transform),
            state: BatchState::Idle,
        }
    }

    /// Current position in the `Idle -> Dispatching -> Aggregating ->
    /// {Completed, Failed}` state machine.
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Run one batch: partition `files`, dispatch workers, aggregate reports.
    ///
    /// Returns [`BatchOutcome::NoWork`] for an empty list without dispatching
    /// anything. Any abnormal worker termination fails the whole batch with
    /// an error naming the offending chunk; remaining workers are aborted
    /// rather than left running unsupervised.
    pub async fn run(
        &mut self,
        files: Vec<String>,
        context: BatchContext,
        requested_workers: usize,
    ) -> ConverterResult<BatchOutcome> {
        self.state = BatchState::Idle;
        let started = Instant::now();

        if files.is_empty() {
            info!("Source directory has no files, nothing to do");
            self.state = BatchState::Completed;
            return Ok(BatchOutcome::NoWork);
        }

        let total_files = files.len();
        let chunks = partition(files, requested_workers);
        let worker_count = chunks.len();
        self.state = BatchState::Dispatching;
        debug!(
            "Dispatching {} files across {} workers ({} requested)",
            total_files, worker_count, requested_workers
        );

        let context = Arc::new(context);
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<WorkerOutcome>(worker_count);
        let mut handles: Vec<(usize, AbortHandle)> = Vec::with_capacity(worker_count);

        for chunk in chunks {
            let transform = Arc::clone(&self.transform);
            let context = Arc::clone(&context);
            let tx = outcome_tx.clone();
            let chunk_index = chunk.index;

            let handle = tokio::spawn(async move {
                let outcome = match worker::run_chunk(transform, context, chunk).await {
                    Ok(report) => WorkerOutcome::Report(report),
                    Err(reason) => WorkerOutcome::Fault {
                        chunk_index,
                        reason,
                    },
                };
                // The coordinator may already have failed the batch and
                // dropped the receiver; nothing left to do then.
                let _ = tx.send(outcome).await;
            });
            handles.push((chunk_index, handle.abort_handle()));
        }
        drop(outcome_tx);
        self.state = BatchState::Aggregating;

        let mut summary = AggregateSummary::default();
        let mut reported = vec![false; worker_count];
        while !summary.is_complete(worker_count) {
            match outcome_rx.recv().await {
                Some(WorkerOutcome::Report(report)) => {
                    debug!(
                        "Worker {} reported - succeeded: {}, failed: {} ({}/{} workers done)",
                        report.chunk_index,
                        report.succeeded,
                        report.failed,
                        summary.workers_reported + 1,
                        worker_count
                    );
                    if let Some(slot) = reported.get_mut(report.chunk_index - 1) {
                        *slot = true;
                    }
                    summary.absorb(&report);
                }
                Some(WorkerOutcome::Fault { chunk_index, reason }) => {
                    warn!("Worker for chunk {} terminated abnormally: {}", chunk_index, reason);
                    for (index, handle) in &handles {
                        if *index != chunk_index {
                            handle.abort();
                        }
                    }
                    self.state = BatchState::Failed;
                    return Err(ConverterError::worker_fault(chunk_index, reason.to_string()));
                }
                None => {
                    // Every sender is gone but reports are still outstanding:
                    // at least one worker died without a message (panic).
                    let missing: Vec<usize> = reported
                        .iter()
                        .enumerate()
                        .filter(|(_, done)| !**done)
                        .map(|(i, _)| i + 1)
                        .collect();
                    warn!("Workers for chunks {:?} never reported", missing);
                    self.state = BatchState::Failed;
                    return Err(ConverterError::WorkerLost { chunks: missing });
                }
            }
        }

        self.state = BatchState::Completed;
        info!(
            "Batch complete - elapsed: {:.2}s (workers combined: {:.2}s), handled: {}, succeeded: {}, failed: {}",
            started.elapsed().as_secs_f64(),
            summary.elapsed_secs,
            summary.total_files,
            summary.succeeded,
            summary.failed
        );
        Ok(BatchOutcome::Completed(summary))
    }
}
