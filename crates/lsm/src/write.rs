//! Write path: `put()` and the internal `flush()`.
//!
//! `put` applies directly to the memtable; once the memtable crosses
//! [`MAX_MEMTABLE_SIZE`](crate::MAX_MEMTABLE_SIZE) entries it is spilled to a
//! new level-0 SSTable. A flush that pushes level 0 past its own trigger
//! cascades into `compact()`.

use anyhow::Result;
use sstable::SSTable;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::{LsmTree, L0_COMPACTION_TRIGGER, MAX_MEMTABLE_SIZE};

impl LsmTree {
    /// Inserts a key-value pair, overwriting any previous value for `key`.
    ///
    /// Forwards to the memtable, then flushes if the memtable has reached
    /// [`MAX_MEMTABLE_SIZE`] entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the triggered flush fails (I/O failure writing
    /// the new SSTable).
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        anyhow::ensure!(!key.is_empty(), "empty key is reserved for the memtable head sentinel");

        self.mem.put(key, value);

        if self.mem.len() >= MAX_MEMTABLE_SIZE {
            self.flush()?;
        }

        Ok(())
    }

    /// Spills the active memtable to a new level-0 SSTable.
    ///
    /// # Steps
    ///
    /// 1. Synthesize the path `L0_sstable_{counter}.db`.
    /// 2. Enumerate the memtable in ascending key order, attaching a
    ///    wall-clock timestamp (with a monotonic nudge, see
    ///    [`LsmTree::next_flush_timestamp`]) to every entry.
    /// 3. Write the batch to a new SSTable.
    /// 4. Append it to `levels[0]`, add the entry count to `level_sizes[0]`,
    ///    replace the memtable with a fresh one, and bump `sstable_counter`.
    /// 5. If `level_sizes[0]` has reached [`L0_COMPACTION_TRIGGER`], run
    ///    `compact()`.
    pub(crate) fn flush(&mut self) -> Result<()> {
        let path = self.dir.join(format!("L0_sstable_{}.db", self.sstable_counter));
        debug!(path = %path.display(), entries = self.mem.len(), "flushing memtable");

        let timestamp = self.next_flush_timestamp();
        let entries: Vec<sstable::Entry> = self
            .mem
            .ordered_enumerate()
            .map(|(key, value)| sstable::Entry {
                key: key.to_vec(),
                value: value.to_vec(),
                timestamp,
            })
            .collect();
        let flushed_count = entries.len() as u64;

        let mut sst = SSTable::create(&path)?;
        sst.write(&entries)?;

        self.levels[0].push(sst);
        self.level_sizes[0] += flushed_count;
        self.mem = memtable::Memtable::new();
        self.sstable_counter += 1;

        if self.level_sizes[0] as usize >= L0_COMPACTION_TRIGGER {
            self.compact()?;
        }

        Ok(())
    }

    /// Returns a wall-clock timestamp in seconds, guaranteed to be strictly
    /// greater than the one returned by the previous call on this tree.
    /// Two flushes landing in the same wall-clock second still get distinct,
    /// increasing timestamps, satisfying the "later puts have strictly
    /// greater stamps" property from the recency tie-break contract.
    pub(crate) fn next_flush_timestamp(&mut self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        self.flush_clock = self.flush_clock.max(now) + 1;
        self.flush_clock
    }
}
