//! Trash ledger: records pending purge

use std::path::Path;

use asset_fs::{NormalizedPath, io};

use super::{AssetRecord, parse_records, read_locked, render_records};
use crate::Result;

/// Ordered list of records whose local files are gone.
///
/// Unlike [`super::Ledger`] this is not keyed: the same path may appear
/// more than once if it was trashed under different identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrashLedger {
    records: Vec<AssetRecord>,
}

impl TrashLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the trash file; a missing file yields an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        match read_locked(path)? {
            Some(content) => Self::parse(&content, path),
            None => Ok(Self::new()),
        }
    }

    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        Ok(Self {
            records: parse_records(content, source)?,
        })
    }

    /// Overwrite the trash file with these records.
    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_atomic(&NormalizedPath::new(path), self.render().as_bytes())?;
        Ok(())
    }

    /// Delete the trash file. Returns `true` if it existed.
    pub fn clear_file(path: &Path) -> Result<bool> {
        Ok(io::remove_file_if_exists(&NormalizedPath::new(path))?)
    }

    pub fn render(&self) -> String {
        render_records(self.records.iter())
    }

    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AssetRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<AssetRecord> for TrashLedger {
    fn from_iter<I: IntoIterator<Item = AssetRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
