//! # Memtable
//!
//! An in-memory, sorted, mutable write buffer for the LSM storage engine.
//!
//! The memtable is the first point of contact for every write. It absorbs
//! `put` operations into a probabilistic skip list before they are flushed
//! to an immutable on-disk SSTable.
//!
//! ## Key properties
//! - **Sorted order**: entries are always reachable in ascending key order
//!   via [`Memtable::ordered_enumerate`] (required for SSTable flush).
//! - **Insert-or-replace**: a second `put` for an existing key overwrites
//!   the first; there is no tombstone or delete operation.
//! - **Entry-count sizing**: [`Memtable::len`] counts entries, not bytes,
//!   an intentional simplification carried over from the reference design.
//!
//! ## Example
//! ```rust
//! use memtable::Memtable;
//!
//! let mut m = Memtable::new();
//! m.put(b"hello".to_vec(), b"world".to_vec());
//! assert_eq!(m.get(b"hello"), Some(b"world".as_slice()));
//! ```

mod skiplist;

pub use skiplist::{Memtable, P, SKIPLIST_MAX_LEVEL};
