//! Ledger persistence
//!
//! The ledger maps each local asset path to the remote asset last stored for
//! it. It is a UTF-8 text file with one record per line and six
//! tab-separated fields:
//!
//! ```text
//! path<TAB>identity<TAB>unix_timestamp<TAB>version<TAB>width<TAB>height
//! ```
//!
//! The trash ledger uses the same format for records whose local file has
//! disappeared and which are waiting to be purged. Both files are fully
//! rewritten on every save.

mod record;
mod trash;

pub use record::{AssetRecord, FIELD_COUNT};
pub use trash::TrashLedger;

use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use asset_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Live ledger keyed by local path, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    slots: Vec<Option<AssetRecord>>,
    index: HashMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ledger file with a shared lock.
    ///
    /// A missing file yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any line is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        match read_locked(path)? {
            Some(content) => Self::parse(&content, path),
            None => Ok(Self::new()),
        }
    }

    /// Parse ledger content. `source` is only used in error messages.
    ///
    /// When a path appears on more than one line the last line wins and keeps
    /// the position of the first.
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        let mut ledger = Self::new();
        for record in parse_records(content, source)? {
            ledger.insert(record);
        }
        Ok(ledger)
    }

    /// Save the ledger atomically, overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_atomic(&NormalizedPath::new(path), self.render().as_bytes())?;
        Ok(())
    }

    /// Encode every record, one line each, in ledger order.
    pub fn render(&self) -> String {
        render_records(self.records())
    }

    /// Insert or replace the record for its local key.
    ///
    /// Returns the record previously stored under that key.
    pub fn insert(&mut self, record: AssetRecord) -> Option<AssetRecord> {
        match self.index.get(&record.local_key) {
            Some(&slot) => self.slots[slot].replace(record),
            None => {
                self.index.insert(record.local_key.clone(), self.slots.len());
                self.slots.push(Some(record));
                None
            }
        }
    }

    /// Remove and return the record for `local_key`.
    pub fn remove(&mut self, local_key: &str) -> Option<AssetRecord> {
        let slot = self.index.remove(local_key)?;
        self.slots[slot].take()
    }

    pub fn get(&self, local_key: &str) -> Option<&AssetRecord> {
        let slot = *self.index.get(local_key)?;
        self.slots[slot].as_ref()
    }

    pub fn contains(&self, local_key: &str) -> bool {
        self.index.contains_key(local_key)
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &AssetRecord> {
        self.slots.iter().flatten()
    }

    pub fn into_records(self) -> Vec<AssetRecord> {
        self.slots.into_iter().flatten().collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl FromIterator<AssetRecord> for Ledger {
    fn from_iter<I: IntoIterator<Item = AssetRecord>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for record in iter {
            ledger.insert(record);
        }
        ledger
    }
}

/// Read a file under a shared lock, or `None` if it does not exist.
fn read_locked(path: &Path) -> Result<Option<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(asset_fs::Error::io(path, e).into()),
    };
    file.lock_shared().map_err(|_| asset_fs::Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    // Read through the locked handle
    let mut content = String::new();
    (&file)
        .read_to_string(&mut content)
        .map_err(|e| asset_fs::Error::io(path, e))?;

    Ok(Some(content))
}

/// Parse every non-blank line, failing on the first malformed one.
fn parse_records(content: &str, source: &Path) -> Result<Vec<AssetRecord>> {
    let mut records = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let record = AssetRecord::parse_line(line).map_err(|message| Error::LedgerParse {
            path: source.to_path_buf(),
            line: number + 1,
            message,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn render_records<'a>(records: impl Iterator<Item = &'a AssetRecord>) -> String {
    records.map(AssetRecord::to_line).collect()
}
