//! Chunk execution.
//!
//! A worker owns its chunk exclusively and processes it strictly in order,
//! one transform at a time. Item failures are tallied, never propagated; the
//! only error a worker can return is a start-up fault, which the coordinator
//! escalates as an abnormal termination.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::core::{BatchContext, Chunk, WorkerReport};
use crate::processing::Transform;
use crate::utils::{WorkerError, WorkerResult};

/// A worker's lifecycle result, consumed uniformly by the coordinator.
#[derive(Debug)]
pub enum WorkerOutcome {
    /// Normal completion with the final tally
    Report(WorkerReport),
    /// The worker died before it could produce a report
    Fault {
        chunk_index: usize,
        reason: WorkerError,
    },
}

/// Process every item in `chunk` sequentially and produce exactly one report.
///
/// Each item is attempted regardless of earlier failures. The report carries
/// the chunk's wall-clock time, including the one-time `prepare` step.
pub async fn run_chunk<T: Transform>(
    transform: Arc<T>,
    context: Arc<BatchContext>,
    chunk: Chunk,
) -> WorkerResult<WorkerReport> {
    let started = Instant::now();
    debug!(
        "Worker {} starting - {} files (range {}..{})",
        chunk.index,
        chunk.len(),
        chunk.start,
        chunk.end
    );

    transform
        .prepare(&context)
        .await
        .map_err(|e| WorkerError::initialization(e.to_string()))?;

    let mut succeeded = 0;
    let mut failed = 0;
    for file in &chunk.files {
        match transform.apply(&context, file).await {
            Ok(()) => succeeded += 1,
            Err(e) => {
                warn!("Worker {} failed on {}: {}", chunk.index, file, e);
                failed += 1;
            }
        }
    }

    let report = WorkerReport {
        chunk_index: chunk.index,
        total: chunk.len(),
        succeeded,
        failed,
        elapsed_secs: started.elapsed().as_secs_f64(),
    };
    debug!(
        "Worker {} finished - total: {}, succeeded: {}, failed: {}, elapsed: {:.2}s",
        report.chunk_index, report.total, report.succeeded, report.failed, report.elapsed_secs
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{ConverterError, ConverterResult};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Records invocation order; fails for files in the `failing` set.
    struct ScriptedTransform {
        failing: HashSet<String>,
        seen: Mutex<Vec<String>>,
        prepare_error: Option<String>,
    }

    impl ScriptedTransform {
        fn new(failing: &[&str]) -> Self {
            Self {
                failing: failing.iter().map(|s| s.to_string()).collect(),
                seen: Mutex::new(Vec::new()),
                prepare_error: None,
            }
        }

        fn broken(reason: &str) -> Self {
            Self {
                failing: HashSet::new(),
                seen: Mutex::new(Vec::new()),
                prepare_error: Some(reason.to_string()),
            }
        }
    }

    impl Transform for ScriptedTransform {
        async fn prepare(&self, _context: &BatchContext) -> ConverterResult<()> {
            match &self.prepare_error {
                Some(reason) => Err(ConverterError::transform(reason.clone())),
                None => Ok(()),
            }
        }

        async fn apply(&self, _context: &BatchContext, file: &str) -> ConverterResult<()> {
            self.seen.lock().unwrap().push(file.to_string());
            if self.failing.contains(file) {
                Err(ConverterError::transform(format!("scripted failure: {file}")))
            } else {
                Ok(())
            }
        }
    }

    fn context() -> Arc<BatchContext> {
        Arc::new(BatchContext {
            source_dir: "/in".into(),
            dest_dir: "/out".into(),
            quality: 70,
        })
    }

    fn chunk(index: usize, files: &[&str]) -> Chunk {
        Chunk {
            index,
            start: 0,
            end: files.len(),
            files: files.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn tallies_successes_and_failures() {
        let transform = Arc::new(ScriptedTransform::new(&["b.jpg", "d.jpg"]));
        let report = run_chunk(
            Arc::clone(&transform),
            context(),
            chunk(2, &["a.jpg", "b.jpg", "c.jpg", "d.jpg"]),
        )
        .await
        .unwrap();

        assert_eq!(report.chunk_index, 2);
        assert_eq!(report.total, 4);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 2);
        assert!(report.elapsed_secs >= 0.0);
    }

    #[tokio::test]
    async fn failures_do_not_abort_remaining_items() {
        let transform = Arc::new(ScriptedTransform::new(&["a.jpg"]));
        run_chunk(
            Arc::clone(&transform),
            context(),
            chunk(1, &["a.jpg", "b.jpg", "c.jpg"]),
        )
        .await
        .unwrap();

        // Every item was attempted, in chunk order.
        let seen = transform.seen.lock().unwrap().clone();
        assert_eq!(seen, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[tokio::test]
    async fn prepare_failure_is_an_initialization_fault() {
        let transform = Arc::new(ScriptedTransform::broken("no converter"));
        let err = run_chunk(Arc::clone(&transform), context(), chunk(1, &["a.jpg"]))
            .await
            .unwrap_err();

        assert!(matches!(err, WorkerError::Initialization(_)));
        // The chunk itself was never touched.
        assert!(transform.seen.lock().unwrap().is_empty());
    }
}
