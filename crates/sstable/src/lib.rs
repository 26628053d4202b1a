//! # SSTable - Sorted String Table
//!
//! Immutable, on-disk storage files for the LSM storage engine.
//!
//! When the in-memory memtable crosses its entry-count threshold, the
//! controller flushes it to disk as an SSTable. SSTables are write-once,
//! read-many: once [`SSTable::write`] has been called, the file is never
//! modified again (only superseded during compaction, which produces a
//! brand new SSTable at the next level).
//!
//! ## File layout
//!
//! ```text
//! repeated:
//!   u32   key_len    (little-endian)
//!   u8[key_len]   key bytes
//!   u32   value_len  (little-endian)
//!   u8[value_len] value bytes
//!   i64   timestamp  (little-endian)
//! ```
//!
//! No header, no footer, no checksums, no compression: the file is a flat,
//! sorted stream of records. The in-memory index (key to byte offset) is
//! built once, either while writing or by scanning the file on
//! [`SSTable::open`], and never persisted.

mod format;
mod reader;
mod writer;

pub use format::Entry;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;

/// An immutable on-disk sorted batch of entries, with an in-memory index
/// from key to file offset.
///
/// Holds the owned file path, an open file handle, and the index. Every
/// key present in the file has an entry in the index pointing at that
/// key's record, so a point lookup costs a single seek plus a short read
/// rather than a scan.
pub struct SSTable {
    path: PathBuf,
    file: RefCell<File>,
    index: BTreeMap<Vec<u8>, u64>,
}
