//! The per-file conversion seam.
//!
//! The engine treats conversion as an opaque capability: a [`Transform`]
//! either succeeds or fails for a single file. [`CommandTransform`] is the
//! production implementation, spawning an external converter process per
//! file; all format detection and codec logic lives in that binary.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::core::BatchContext;
use crate::utils::{ConverterError, ConverterResult};

/// Per-file conversion capability invoked by workers.
pub trait Transform: Send + Sync + 'static {
    /// One-time start-up hook, run by each worker before its first item.
    ///
    /// An error here is an abnormal worker termination, not a per-item
    /// failure.
    fn prepare(
        &self,
        _context: &BatchContext,
    ) -> impl Future<Output = ConverterResult<()>> + Send {
        async { Ok(()) }
    }

    /// Convert a single file. An `Err` counts as one failed item and never
    /// aborts the rest of the worker's chunk.
    fn apply(
        &self,
        context: &BatchContext,
        file: &str,
    ) -> impl Future<Output = ConverterResult<()>> + Send;
}

/// Spawns an external converter process for each file.
///
/// The default program is `cwebp`, invoked as
/// `<program> -q <quality> <source> -o <dest>.webp`.
pub struct CommandTransform {
    program: String,
}

impl CommandTransform {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Destination file name: the source stem with a `.webp` extension.
    fn output_name(file: &str) -> PathBuf {
        Path::new(file).with_extension("webp")
    }
}

impl Default for CommandTransform {
    fn default() -> Self {
        Self::new("cwebp")
    }
}

impl Transform for CommandTransform {
    async fn prepare(&self, context: &BatchContext) -> ConverterResult<()> {
        // Resolve the converter up front so a missing binary fails the worker
        // once instead of failing every item in its chunk.
        let status = Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| {
                ConverterError::transform(format!(
                    "Converter `{}` is not available: {}",
                    self.program, e
                ))
            })?;
        if !status.success() {
            return Err(ConverterError::transform(format!(
                "Converter `{}` failed its version probe ({})",
                self.program, status
            )));
        }

        if !context.dest_dir.is_dir() {
            return Err(ConverterError::validation(format!(
                "Output directory does not exist: {}",
                context.dest_dir.display()
            )));
        }
        Ok(())
    }

    async fn apply(&self, context: &BatchContext, file: &str) -> ConverterResult<()> {
        let source = context.source_dir.join(file);
        let dest = context.dest_dir.join(Self::output_name(file));
        debug!("Converting {} -> {}", source.display(), dest.display());

        // The coordinator aborts in-flight workers when a sibling faults;
        // dropping this future must take the converter child down with it.
        let output = Command::new(&self.program)
            .arg("-q")
            .arg(context.quality.to_string())
            .arg(&source)
            .arg("-o")
            .arg(&dest)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ConverterError::transform(format!("Failed to spawn converter for {}: {}", file, e))
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ConverterError::transform(format!(
                "Converter failed for {}: {}",
                file,
                stderr.trim()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_replaces_extension() {
        assert_eq!(
            CommandTransform::output_name("photo.jpeg"),
            PathBuf::from("photo.webp")
        );
        assert_eq!(
            CommandTransform::output_name("scan"),
            PathBuf::from("scan.webp")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn aborted_apply_kills_the_converter_process() {
        use std::os::unix::fs::PermissionsExt;
        use std::sync::Arc;
        use std::time::Duration;

        // Stand-in converter: linger, then write the destination ($5).
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-convert.sh");
        std::fs::write(&script, "#!/bin/sh\nsleep 1\ntouch \"$5\"\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let context = BatchContext {
            source_dir: dir.path().to_path_buf(),
            dest_dir: dir.path().to_path_buf(),
            quality: 70,
        };
        let dest = dir.path().join("photo.webp");
        let transform = Arc::new(CommandTransform::new(script.to_str().unwrap()));

        let task = tokio::spawn({
            let transform = Arc::clone(&transform);
            let context = context.clone();
            async move { transform.apply(&context, "photo.jpg").await }
        });
        tokio::time::sleep(Duration::from_millis(150)).await;
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        // Long enough for a surviving child to finish its sleep and write.
        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert!(
            !dest.exists(),
            "converter child survived the worker abort and wrote its output"
        );
    }

    #[tokio::test]
    async fn prepare_rejects_missing_converter() {
        let transform = CommandTransform::new("definitely-not-a-real-converter");
        let dir = tempfile::tempdir().unwrap();
        let context = BatchContext {
            source_dir: dir.path().to_path_buf(),
            dest_dir: dir.path().to_path_buf(),
            quality: 70,
        };
        let err = transform.prepare(&context).await.unwrap_err();
        assert!(matches!(err, ConverterError::Transform(_)));
    }
}
