//! # LSM - Log-Structured Merge Tree Storage Engine
//!
//! The central orchestrator that ties together the [`memtable`] and
//! [`sstable`] crates into a complete LSM-tree key-value store.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │                   LSMTREE                      │
//! │                                               │
//! │ write.rs → Memtable insert                    │
//! │              |                                │
//! │              |  (size >= MAX_MEMTABLE_SIZE?)  │
//! │              v                                │
//! │           flush() → new level-0 SSTable       │
//! │              |                                │
//! │              |  (level_sizes[0] >= trigger?)  │
//! │              v                                │
//! │           compact() → cascading merge_level   │
//! │                                               │
//! │ read.rs → Memtable → level 0..MAX_LEVEL-1     │
//! │            (newest SSTable in level wins)     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module         | Purpose                                              |
//! |----------------|-------------------------------------------------------|
//! | [`lib.rs`]     | `LsmTree` struct, constructor, accessors, `Debug`, `Drop` |
//! | [`write`]      | `put()`, internal `flush()`                          |
//! | [`read`]       | `get()`                                              |
//! | [`compaction`] | `compact()`, `merge_level()`, `force_compaction()`   |
//!
//! ## Levels
//!
//! ```text
//! ┌────────────────────────────┐  ← freshest, checked first
//! │ MEMTABLE                   │
//! ├────────────────────────────┤  ← level 0, from flushes (may overlap)
//! │ level 0 SSTables           │
//! ├────────────────────────────┤  ← level 1, from compaction
//! │ level 1 SSTables           │
//! ├────────────────────────────┤
//! │ ... up to MAX_LEVEL - 1    │
//! └────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded and synchronous by design: every `LsmTree` method takes
//! `&mut self` for the write path and expects exclusive access from the
//! caller. There is no background compaction thread; compaction runs inline
//! on the `put` that tripped the threshold.

mod compaction;
mod read;
mod write;

use anyhow::Result;
use memtable::Memtable;
use sstable::SSTable;
use std::path::PathBuf;

/// Entry-count threshold at which the active memtable is flushed to a new
/// level-0 SSTable.
pub const MAX_MEMTABLE_SIZE: usize = 1_048_576;
/// Number of levels below the memtable.
pub const MAX_LEVEL: usize = 7;
/// Per-level size multiplier used to derive each level's compaction
/// threshold: `LEVEL_SIZE_MULTIPLIER.pow(level + 1)`.
pub const LEVEL_SIZE_MULTIPLIER: u64 = 10;
/// Entry-count threshold at which level 0 triggers its first merge into
/// level 1.
pub const L0_COMPACTION_TRIGGER: usize = 4_096;

/// The central storage engine orchestrating the Memtable and the per-level
/// SSTable lists.
///
/// # Write Path
///
/// 1. Apply the mutation to the in-memory memtable.
/// 2. If the memtable's entry count reaches [`MAX_MEMTABLE_SIZE`], flush it
///    to a new level-0 SSTable and start a fresh memtable.
/// 3. If level 0's entry count reaches [`L0_COMPACTION_TRIGGER`], run
///    [`LsmTree::compact`].
///
/// # Read Path
///
/// 1. Check the memtable (freshest data).
/// 2. Check levels `0..MAX_LEVEL`, in ascending level order; within a level,
///    scan SSTables newest-first.
/// 3. First match wins.
pub struct LsmTree {
    pub(crate) mem: Memtable,
    /// `levels[i]` is level `i`'s SSTables, oldest first.
    pub(crate) levels: Vec<Vec<SSTable>>,
    /// `level_sizes[i]` shadows the total entry count across
    /// `levels[i]`'s SSTables, used for compaction threshold checks.
    pub(crate) level_sizes: [u64; MAX_LEVEL],
    /// Monotonically increasing nonce used to make generated SSTable
    /// filenames unique within this tree's lifetime.
    pub(crate) sstable_counter: u64,
    /// Directory new SSTable files are created in.
    pub(crate) dir: PathBuf,
    /// Monotonic nudge added to the wall-clock flush timestamp so that two
    /// flushes landing in the same wall-clock second still produce
    /// strictly increasing timestamps.
    pub(crate) flush_clock: i64,
}

impl std::fmt::Debug for LsmTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LsmTree")
            .field("dir", &self.dir)
            .field("memtable_entries", &self.mem.len())
            .field("level_sizes", &self.level_sizes)
            .field(
                "level_sstable_counts",
                &self.levels.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .field("sstable_counter", &self.sstable_counter)
            .finish()
    }
}

impl LsmTree {
    /// Creates a fresh tree rooted at `dir`: an empty memtable, `MAX_LEVEL`
    /// empty level lists, zeroed level-size counters, and a counter starting
    /// at zero. `dir` is created if it does not already exist.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            mem: Memtable::new(),
            levels: (0..MAX_LEVEL).map(|_| Vec::new()).collect(),
            level_sizes: [0; MAX_LEVEL],
            sstable_counter: 0,
            dir,
            flush_clock: 0,
        })
    }

    /// Directory this tree writes SSTable files into.
    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Number of entries currently buffered in the memtable.
    #[must_use]
    pub fn memtable_len(&self) -> usize {
        self.mem.len()
    }

    /// Shadow entry count for `level`, as tracked by `level_sizes`.
    #[must_use]
    pub fn level_size(&self, level: usize) -> u64 {
        self.level_sizes[level]
    }

    /// Number of SSTables currently held at `level`.
    #[must_use]
    pub fn level_sstable_count(&self, level: usize) -> usize {
        self.levels[level].len()
    }
}

/// Best-effort flush on drop: any data remaining in the memtable is written
/// out to a level-0 SSTable so it is not silently dropped when the tree goes
/// out of scope. Errors are swallowed since `Drop` cannot propagate them;
/// this mirrors spec's "no recovery is attempted" error model rather than
/// introducing a new durability guarantee.
impl Drop for LsmTree {
    fn drop(&mut self) {
        if !self.mem.is_empty() {
            let _ = self.flush();
        }
    }
}

#[cfg(test)]
mod tests;
