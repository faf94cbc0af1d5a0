//! Core data model for batch conversion.
//!
//! This module contains the fundamental types used throughout the engine:
//! - [`BatchContext`]: shared parameters for one conversion run
//! - [`Chunk`]: a contiguous slice of the work list, produced by [`partition`]
//! - [`WorkerReport`]: one worker's final tally
//! - [`AggregateSummary`]: the coordinator's consolidated totals
//! - [`BatchOutcome`]: the terminal result of a run

mod chunk;
mod types;

pub use chunk::{Chunk, partition};
pub use types::{AggregateSummary, BatchContext, BatchOutcome, WorkerReport};
