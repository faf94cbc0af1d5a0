//! Command line surface.
//!
//! Argument parsing and precondition checks live here so the engine can
//! assume a valid quality and worker count.

use std::path::PathBuf;

use clap::Parser;

use crate::core::BatchContext;
use crate::utils::{ConverterError, ConverterResult, dir_exists};

/// Batch-convert a directory of images with a pool of parallel workers.
#[derive(Debug, Parser)]
#[command(name = "image-batch", version, about)]
pub struct Cli {
    /// Source directory to read images from
    #[arg(short = 'I', long, default_value = "./")]
    pub input: PathBuf,

    /// Destination directory for converted files
    #[arg(short = 'O', long, default_value = "./")]
    pub output: PathBuf,

    /// Compression quality
    #[arg(short = 'Q', long, default_value_t = 70, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub quality: u32,

    /// Worker count; 0 auto-detects from CPU cores
    #[arg(short = 'T', long, default_value_t = 1)]
    pub threads: usize,

    /// External converter program invoked once per file
    #[arg(long, default_value = "cwebp")]
    pub converter: String,

    /// Print the final summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Requested worker count after auto-detection; always at least 1.
    pub fn worker_count(&self) -> usize {
        if self.threads == 0 {
            // 90% of CPUs, minimum of 2
            ((num_cpus::get() * 9) / 10).max(2)
        } else {
            self.threads
        }
    }

    /// Check the directory preconditions the engine assumes.
    pub fn validate(&self) -> ConverterResult<()> {
        if !dir_exists(&self.input) {
            return Err(ConverterError::validation(format!(
                "Input directory does not exist: {}",
                self.input.display()
            )));
        }
        if !dir_exists(&self.output) {
            return Err(ConverterError::validation(format!(
                "Output directory does not exist: {}",
                self.output.display()
            )));
        }
        Ok(())
    }

    pub fn context(&self) -> BatchContext {
        BatchContext {
            source_dir: self.input.clone(),
            dest_dir: self.output.clone(),
            quality: self.quality,
        }
    }
}
