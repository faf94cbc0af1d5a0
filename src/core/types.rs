//! Core types for batch conversion parameters and results.

use std::path::PathBuf;
use serde::Serialize;

/// Shared parameters for one conversion run.
///
/// Every work item is a filename interpreted against this context. The
/// context is created once per invocation and never mutated; workers hold it
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct BatchContext {
    /// Directory the source images are read from
    pub source_dir: PathBuf,
    /// Directory the converted files are written to
    pub dest_dir: PathBuf,
    /// Compression quality (1-100)
    pub quality: u32,
}

/// A worker's final tally, emitted exactly once at the end of its chunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerReport {
    /// 1-based chunk identifier, for diagnostics only
    pub chunk_index: usize,
    /// Number of items the worker attempted
    pub total: usize,
    /// Items whose transform succeeded
    pub succeeded: usize,
    /// Items whose transform failed
    pub failed: usize,
    /// Wall-clock time for the whole chunk
    pub elapsed_secs: f64,
}

/// Running totals across all worker reports received so far.
///
/// Mutated only by the coordinator's aggregation loop; final once
/// `workers_reported` equals the effective worker count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    /// Total files handled across all workers
    pub total_files: usize,
    /// Successful conversions
    pub succeeded: usize,
    /// Failed conversions
    pub failed: usize,
    /// Summed per-worker elapsed time in seconds
    pub elapsed_secs: f64,
    /// Number of workers that have reported
    pub workers_reported: usize,
}

impl AggregateSummary {
    /// Fold one worker report into the running totals.
    pub fn absorb(&mut self, report: &WorkerReport) {
        self.total_files += report.total;
        self.succeeded += report.succeeded;
        self.failed += report.failed;
        self.elapsed_secs += report.elapsed_secs;
        self.workers_reported += 1;
    }

    /// The sole completion condition: every worker has reported.
    pub fn is_complete(&self, worker_count: usize) -> bool {
        self.workers_reported == worker_count
    }
}

/// Terminal result of a batch run.
///
/// An empty input directory is a distinct "nothing to do" state, not a
/// trivial success with zeroed counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchOutcome {
    /// Empty file list; no workers were dispatched
    NoWork,
    /// All workers reported; consolidated totals
    Completed(AggregateSummary),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(chunk_index: usize, succeeded: usize, failed: usize, elapsed_secs: f64) -> WorkerReport {
        WorkerReport {
            chunk_index,
            total: succeeded + failed,
            succeeded,
            failed,
            elapsed_secs,
        }
    }

    #[test]
    fn absorb_accumulates_totals() {
        let mut summary = AggregateSummary::default();
        summary.absorb(&report(1, 3, 0, 1.5));
        summary.absorb(&report(2, 2, 2, 2.0));

        assert_eq!(summary.total_files, 7);
        assert_eq!(summary.succeeded, 5);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.elapsed_secs, 3.5);
        assert_eq!(summary.workers_reported, 2);
        assert!(summary.is_complete(2));
        assert!(!summary.is_complete(3));
    }

    #[test]
    fn aggregation_is_arrival_order_independent() {
        let reports = [report(1, 3, 1, 0.5), report(2, 4, 0, 1.0), report(3, 0, 2, 0.25)];

        let mut forward = AggregateSummary::default();
        for r in &reports {
            forward.absorb(r);
        }
        let mut reverse = AggregateSummary::default();
        for r in reports.iter().rev() {
            reverse.absorb(r);
        }

        assert_eq!(forward, reverse);
    }
}
