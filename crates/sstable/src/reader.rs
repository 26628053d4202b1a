//! Read paths for [`SSTable`]: point lookup, full ordered scan, and
//! reopening an existing file.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::format::{read_entry, Entry};
use crate::SSTable;

impl SSTable {
    /// Reopens an SSTable file previously produced by [`SSTable::create`] +
    /// [`SSTable::write`], rebuilding the in-memory index by scanning the
    /// file once. This is pure in-memory bookkeeping; it does not read or
    /// write any bytes beyond the record format already on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new().read(true).write(true).open(&path)?;

        let mut index = BTreeMap::new();
        file.seek(SeekFrom::Start(0))?;
        loop {
            let offset = file.seek(SeekFrom::Current(0))?;
            let key_len = match file.read_u32::<LittleEndian>() {
                Ok(v) => v as usize,
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            };
            let mut key = vec![0u8; key_len];
            file.read_exact(&mut key)?;
            let value_len = file.read_u32::<LittleEndian>()? as usize;
            file.seek(SeekFrom::Current(value_len as i64))?;
            file.seek(SeekFrom::Current(8))?; // timestamp
            index.insert(key, offset);
        }

        Ok(Self {
            path,
            file: std::cell::RefCell::new(file),
            index,
        })
    }

    /// Point lookup by key. Returns the value bytes on a hit, owned by the
    /// caller. Returns `Ok(None)` if the key is absent from the index, or
    /// if the on-disk key at the indexed offset doesn't match (treated as
    /// absence rather than an error, per the on-disk sanity check).
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let offset = match self.index.get(key) {
            Some(&o) => o,
            None => return Ok(None),
        };

        let mut file = self.file.borrow_mut();
        file.seek(SeekFrom::Start(offset))?;

        let key_len = file.read_u32::<LittleEndian>()? as usize;
        let mut on_disk_key = vec![0u8; key_len];
        file.read_exact(&mut on_disk_key)?;
        if on_disk_key != key {
            return Ok(None);
        }

        let value_len = file.read_u32::<LittleEndian>()? as usize;
        let mut value = vec![0u8; value_len];
        file.read_exact(&mut value)?;
        // Trailing timestamp is not needed for a point read.

        Ok(Some(value))
    }

    /// Reads every entry in the file, in file order (which equals
    /// ascending key order by the writer's precondition).
    ///
    /// A clean EOF right before a record terminates the scan normally; any
    /// other read failure, including a truncated mid-record EOF,
    /// propagates as an error.
    pub fn read_all_entries(&self) -> Result<Vec<Entry>> {
        let mut file = self.file.borrow_mut();
        file.seek(SeekFrom::Start(0))?;
        let mut entries = Vec::with_capacity(self.index.len());
        while let Some(entry) = read_entry(&mut *file)? {
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Path this SSTable is backed by.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries in the in-memory index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the SSTable contains zero entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
