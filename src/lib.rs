// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod batch;
pub mod cli;

// Public exports for external consumers
pub use crate::batch::{BatchState, Coordinator, WorkerOutcome};
pub use crate::cli::Cli;
pub use crate::core::{AggregateSummary, BatchContext, BatchOutcome, Chunk, WorkerReport, partition};
pub use crate::processing::{CommandTransform, Transform};
pub use crate::utils::{ConverterError, ConverterResult, WorkerError, WorkerResult, list_files};
