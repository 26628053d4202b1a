//! Compaction: cascading level merges that bound read amplification.
//!
//! `compact()` sweeps levels from 0 upward, merging any level whose
//! shadow size has crossed its threshold into the next level, and stopping
//! at the first level that hasn't. Because a merge can push the next
//! level's size past its own threshold, the sweep can cascade through
//! several levels in a single call.

use anyhow::Result;
use tracing::debug;

use crate::{LsmTree, LEVEL_SIZE_MULTIPLIER, MAX_LEVEL};

impl LsmTree {
    /// Runs the cascading compaction sweep.
    ///
    /// For `level` in `0..MAX_LEVEL-1`: computes
    /// `threshold = LEVEL_SIZE_MULTIPLIER^(level+1)`. If `level_sizes[level]`
    /// has reached that threshold, merges `level` into `level + 1` and moves
    /// on to check the next level; otherwise the sweep stops.
    ///
    /// # Errors
    ///
    /// Returns an error if any `merge_level` call fails.
    pub fn compact(&mut self) -> Result<()> {
        for level in 0..MAX_LEVEL - 1 {
            let threshold = LEVEL_SIZE_MULTIPLIER.pow((level + 1) as u32);
            if self.level_sizes[level] >= threshold {
                self.merge_level(level)?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Merges every SSTable in `levels[level]` and `levels[level + 1]` into
    /// a single new SSTable appended to `levels[level + 1]`.
    ///
    /// No-op if `level + 1 >= MAX_LEVEL` (there is no level to merge into).
    ///
    /// # Steps
    ///
    /// 1. Read every entry out of every source SSTable (both levels).
    /// 2. Sort by `(key asc, timestamp desc)`.
    /// 3. Deduplicate, keeping the first entry per key after the sort (the
    ///    newest timestamp for that key, since ties sort newest-first).
    /// 4. Write the result to a new SSTable at `L{next}_merged_{counter}.db`.
    /// 5. Append it to `levels[next]`, set `level_sizes[next]` to the number
    ///    of entries written (overwrite, not accumulate — the destination
    ///    level is assumed to have drained by the time it's merged into
    ///    again in this single-threaded design), drop the old `levels[level]`
    ///    SSTables, zero `level_sizes[level]`, and bump `sstable_counter`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading any source SSTable or writing the
    /// destination fails. On failure, no level state is mutated: sources
    /// are only cleared after the destination has been written and wired
    /// into `levels[next]` successfully.
    pub(crate) fn merge_level(&mut self, level: usize) -> Result<()> {
        let next = level + 1;
        if next >= MAX_LEVEL {
            return Ok(());
        }

        let mut working: Vec<sstable::Entry> = Vec::new();
        for sst in &self.levels[level] {
            working.extend(sst.read_all_entries()?);
        }
        for sst in &self.levels[next] {
            working.extend(sst.read_all_entries()?);
        }

        working.sort_by(|a, b| a.key.cmp(&b.key).then(b.timestamp.cmp(&a.timestamp)));
        working.dedup_by(|a, b| a.key == b.key);

        let path = self.dir.join(format!("L{}_merged_{}.db", next, self.sstable_counter));
        debug!(
            path = %path.display(),
            from_level = level,
            to_level = next,
            entries = working.len(),
            "merging level"
        );

        let mut dest = sstable::SSTable::create(&path)?;
        dest.write(&working)?;

        self.levels[next].push(dest);
        self.level_sizes[next] = working.len() as u64;

        self.levels[level].clear();
        self.level_sizes[level] = 0;
        self.sstable_counter += 1;

        Ok(())
    }

    /// Administrative entry point (used by tests and callers that want to
    /// force a merge outside the normal threshold-driven sweep).
    ///
    /// Refuses levels at or beyond `MAX_LEVEL - 1` (nothing to merge into).
    /// Flushes the memtable first if non-empty, so the forced merge sees
    /// up-to-date level-0 data. A no-op if `levels[level]` is empty.
    /// Otherwise runs `merge_level(level)` unconditionally, bypassing the
    /// size threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if `level >= MAX_LEVEL - 1`, or if the triggered
    /// flush or merge fails.
    pub fn force_compaction(&mut self, level: usize) -> Result<()> {
        anyhow::ensure!(
            level < MAX_LEVEL - 1,
            "cannot force compaction at level {level}: no level to merge into"
        );

        if !self.mem.is_empty() {
            self.flush()?;
        }

        if self.levels[level].is_empty() {
            return Ok(());
        }

        self.merge_level(level)
    }
}
