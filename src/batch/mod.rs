//! Work distribution and result aggregation.

mod coordinator;
mod worker;

pub use coordinator::{BatchState, Coordinator};
pub use worker::{WorkerOutcome, run_chunk};
