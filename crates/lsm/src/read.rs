//! Read path: `get()`.
//!
//! Checks the memtable first, then levels `0..MAX_LEVEL` in ascending order;
//! within a level, SSTables are scanned newest-first (the last element of
//! the level's vector is the newest, since `flush`/`merge_level` always
//! push/append to the end). The first hit wins.

use anyhow::Result;

use crate::LsmTree;

impl LsmTree {
    /// Looks up `key`, returning its value if present anywhere in the tree.
    ///
    /// The memtable is checked first (it holds the freshest writes), then
    /// each level in ascending order, within a level from the newest
    /// SSTable to the oldest. The value is duplicated into caller-owned
    /// storage before being returned: the copy-and-free ownership contract
    /// from the original design maps directly onto returning an owned
    /// `Vec<u8>` in Rust, isolating callers from memtable/SSTable-internal
    /// buffer lifetimes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading an SSTable fails (I/O failure or a
    /// truncated record encountered while re-reading the on-disk key).
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if let Some(value) = self.mem.get(key) {
            return Ok(Some(value.to_vec()));
        }

        for level in &self.levels {
            for sst in level.iter().rev() {
                if let Some(value) = sst.get(key)? {
                    return Ok(Some(value));
                }
            }
        }

        Ok(None)
    }
}
