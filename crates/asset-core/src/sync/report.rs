//! Sync report

use serde::{Deserialize, Serialize};

use crate::ledger::AssetRecord;

/// Outcome of a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// True when nothing was uploaded, destroyed or written
    pub dry_run: bool,
    /// Identities uploaded (or that would be, on a dry run)
    pub uploaded: Vec<String>,
    /// Local keys whose content matched the ledger
    pub unchanged: Vec<String>,
    /// Records written to the trash ledger
    pub trashed: Vec<AssetRecord>,
    /// Identities passed to destroy
    pub destroyed: Vec<String>,
    /// Identities that left the trash because their content was found again
    pub reclaimed: Vec<String>,
    /// Human-readable log of what happened
    pub actions: Vec<String>,
}

impl SyncReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Record an action, prefixing dry-run actions with "[dry-run] Would".
    pub(crate) fn action(&mut self, verb: &str, detail: String) {
        let line = if self.dry_run {
            format!("[dry-run] Would {} {}", verb.to_lowercase(), detail)
        } else {
            format!("{} {}", verb, detail)
        };
        self.actions.push(line);
    }

    /// True if the run changed nothing remotely and trashed nothing.
    pub fn is_noop(&self) -> bool {
        self.uploaded.is_empty() && self.trashed.is_empty() && self.destroyed.is_empty()
    }
}
