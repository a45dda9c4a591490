//! Reconciliation of local assets against the remote store
//!
//! - **engine**: the sync algorithm (discover, fingerprint, upload, trash, purge)
//! - **report**: what a run did, for display or JSON output

mod engine;
mod report;

pub use engine::{SyncEngine, SyncOptions, remote_identity};
pub use report::SyncReport;
