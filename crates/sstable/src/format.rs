//! SSTable on-disk record format and the in-memory [`Entry`] type.
//!
//! An SSTable file is a flat concatenation of records, no header and no
//! footer:
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
//! End of file is the only terminator. A clean end-of-scan can only happen
//! right before a record's `key_len` field; any other read hitting EOF
//! mid-record is a corrupt/truncated file, not a normal termination.

use anyhow::{Context, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// A single (key, value, timestamp) record, the unit written to and read
/// from an SSTable.
///
/// `timestamp` is a wall-clock-derived tiebreak used only during compaction
/// to resolve recency between duplicate keys; it is never exposed to
/// callers of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub timestamp: i64,
}

/// Writes one record to `w`, returning nothing on success.
pub(crate) fn write_entry<W: Write>(w: &mut W, entry: &Entry) -> Result<()> {
    w.write_u32::<LittleEndian>(entry.key.len() as u32)?;
    w.write_all(&entry.key)?;
    w.write_u32::<LittleEndian>(entry.value.len() as u32)?;
    w.write_all(&entry.value)?;
    w.write_i64::<LittleEndian>(entry.timestamp)?;
    Ok(())
}

/// Attempts to read one record from `r`.
///
/// Returns `Ok(None)` only when EOF is hit while reading the leading
/// `key_len` field, i.e. a clean end-of-scan. Any other I/O failure,
/// including EOF encountered mid-record, is returned as an error.
pub(crate) fn read_entry<R: Read>(r: &mut R) -> Result<Option<Entry>> {
    let key_len = match r.read_u32::<LittleEndian>() {
        Ok(v) => v as usize,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut key = vec![0u8; key_len];
    r.read_exact(&mut key).context("truncated entry: key")?;

    let value_len = r.read_u32::<LittleEndian>().context("truncated entry: value_len")? as usize;
    let mut value = vec![0u8; value_len];
    r.read_exact(&mut value).context("truncated entry: value")?;

    let timestamp = r.read_i64::<LittleEndian>().context("truncated entry: timestamp")?;

    Ok(Some(Entry {
        key,
        value,
        timestamp,
    }))
}
