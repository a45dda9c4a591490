//! Command implementations for asset-cli

pub mod init;
pub mod status;
pub mod sync;

pub use init::run_init;
pub use status::{run_status, run_trash};
pub use sync::{SyncArgs, run_sync};
