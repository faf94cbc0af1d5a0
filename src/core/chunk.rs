//! Partitioning of the work list into per-worker chunks.

use serde::Serialize;

/// A contiguous slice of the work list assigned to exactly one worker.
///
/// Created by [`partition`], consumed whole by its worker, never shared or
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chunk {
    /// 1-based group identifier, carried through reports for diagnostics
    pub index: usize,
    /// Offset of the first item in the original file list (inclusive)
    pub start: usize,
    /// Offset past the last item (exclusive)
    pub end: usize,
    /// The filenames, in original list order
    pub files: Vec<String>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Split `files` into `min(requested_workers, N)` contiguous chunks.
///
/// Each of the first `effective - 1` chunks gets exactly `N / W` consecutive
/// items; the last chunk gets the base count plus the remainder, so the
/// chunks concatenated in order reconstruct the input exactly. When there are
/// fewer items than requested workers the effective count drops to `N` and
/// every chunk holds a single item. An empty input yields no chunks at all.
///
/// Callers are responsible for rejecting `requested_workers < 1` before this
/// point.
pub fn partition(files: Vec<String>, requested_workers: usize) -> Vec<Chunk> {
    debug_assert!(requested_workers >= 1);
    let total = files.len();
    if total == 0 {
        return Vec::new();
    }

    let base = total / requested_workers;
    let (effective, base) = if base == 0 {
        (total, 1)
    } else {
        (requested_workers, base)
    };

    let mut chunks = Vec::with_capacity(effective);
    for i in 0..effective {
        let start = i * base;
        // Last chunk absorbs the remainder: base + (total % effective) items.
        let end = if i == effective - 1 { total } else { start + base };
        chunks.push(Chunk {
            index: i + 1,
            start,
            end,
            files: files[start..end].to_vec(),
        });
    }
    chunks
}
