//! Error types for the batch converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Main error type for the batch converter.
///
/// Item-level transform failures are absorbed into aggregate counts and never
/// surface here; only batch-level failures reach the caller.
#[derive(Error, Debug)]
pub enum ConverterError {
    /// Input or settings validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),

    /// External converter invocation failed
    #[error("Transform error: {0}")]
    Transform(String),

    /// A worker terminated abnormally before emitting its report
    #[error("Worker for chunk {chunk_index} terminated abnormally: {reason}")]
    WorkerFault { chunk_index: usize, reason: String },

    /// Workers died without sending either a report or a fault
    #[error("Workers for chunks {chunks:?} terminated without reporting")]
    WorkerLost { chunks: Vec<usize> },
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

// Helper methods for error creation
impl ConverterError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::Io(msg.into())
    }

    pub fn transform<T: Into<String>>(msg: T) -> Self {
        Self::Transform(msg.into())
    }

    pub fn worker_fault(chunk_index: usize, reason: impl Into<String>) -> Self {
        Self::WorkerFault {
            chunk_index,
            reason: reason.into(),
        }
    }
}

// Convert std::io::Error to ConverterError
impl From<io::Error> for ConverterError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Worker-local failures, escalated by the coordinator as batch-level errors.
///
/// Per-item transform errors never become a `WorkerError`; they are tallied
/// into the worker's report instead.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker could not even start; distinct from per-item failure
    #[error("Worker initialization failed: {0}")]
    Initialization(String),
}

pub type WorkerResult<T> = Result<T, WorkerError>;

impl WorkerError {
    pub fn initialization<T: Into<String>>(msg: T) -> Self {
        Self::Initialization(msg.into())
    }
}
