//! Create and write paths for [`SSTable`].
//!
//! `write` is append-once by contract: it is meant to be called a single
//! time per SSTable, immediately after `create`, with a slice already in
//! ascending key order (the memtable's ordered enumeration and the
//! controller's sorted merge output both satisfy this). Calling it again
//! would append further records without clearing the index, which the
//! single-shot contract forbids relying on.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom};
use std::path::Path;

use crate::format::{write_entry, Entry};
use crate::SSTable;

impl SSTable {
    /// Creates a new SSTable backed by `path`, opened for read and write.
    /// The file is truncated if it already exists; each SSTable path is
    /// expected to be unique (the controller mints one per flush/merge via
    /// its `sstable_counter`).
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self {
            path,
            file: std::cell::RefCell::new(file),
            index: BTreeMap::new(),
        })
    }

    /// Writes `entries` (assumed to already be in ascending key order) to
    /// disk, recording each key's byte offset in the in-memory index as it
    /// goes.
    pub fn write(&mut self, entries: &[Entry]) -> Result<()> {
        let file = self.file.get_mut();
        for entry in entries {
            let offset = file.seek(SeekFrom::Current(0))?;
            self.index.insert(entry.key.clone(), offset);
            write_entry(file, entry)?;
        }
        Ok(())
    }
}
