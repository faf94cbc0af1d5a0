pub mod error;
pub mod fs;

pub use error::{ConverterError, ConverterResult, WorkerError, WorkerResult};
pub use fs::{dir_exists, list_files};
