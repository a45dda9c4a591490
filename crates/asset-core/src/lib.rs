//! Static asset reconciliation for asset-sync
//!
//! This crate keeps a remote content-addressed store in step with a local
//! tree of static assets:
//!
//! - **Discovery**: walk configured asset roots, pruning ignored names
//! - **Ledger**: tab-separated manifest of local path to remote identity,
//!   plus a trash ledger of assets whose files disappeared
//! - **RemoteStore**: upload/destroy interface with in-memory and
//!   directory-backed implementations
//! - **SyncEngine**: fingerprint, upload on change, trash or purge the rest
//!
//! # Architecture
//!
//! ```text
//!        asset-cli
//!            |
//!       asset-core
//!            |
//!        asset-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use asset_core::{MemoryStore, SyncConfig, SyncEngine, SyncOptions};
//! use asset_fs::NormalizedPath;
//!
//! # fn main() -> asset_core::Result<()> {
//! let root = NormalizedPath::new("/srv/app");
//! let config = SyncConfig::load(&root)?;
//! let engine = SyncEngine::new(root, config, Box::new(MemoryStore::new()));
//! let report = engine.sync(&SyncOptions::default())?;
//! println!("uploaded {} assets", report.uploaded.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod ledger;
pub mod remote;
pub mod sync;

pub use config::{IgnoreRule, StoreSection, SyncConfig};
pub use discover::{DiscoveredAsset, Discoverer};
pub use error::{Error, Result};
pub use ledger::{AssetRecord, Ledger, TrashLedger};
pub use remote::{
    DestroyOutcome, DirectoryStore, MemoryStore, RemoteAsset, RemoteStore, UploadOptions,
    UploadRequest,
};
pub use sync::{SyncEngine, SyncOptions, SyncReport, remote_identity};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn ledger_parse_error_displays_path_and_line() {
        let error = Error::LedgerParse {
            path: PathBuf::from("/srv/app/.asset-sync.ledger"),
            line: 7,
            message: "expected 3 to 6 tab-separated fields, found 1".into(),
        };

        let display = format!("{}", error);
        assert!(display.contains("/srv/app/.asset-sync.ledger"), "got: {}", display);
        assert!(display.contains("line 7"), "got: {}", display);
    }
}
