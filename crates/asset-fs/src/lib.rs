//! Filesystem primitives for asset-sync
//!
//! Provides normalized paths, locked atomic writes, content fingerprints and
//! format-agnostic config loading.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::fingerprint;
pub use config::{ConfigStore, Format};
pub use constants::AssetPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
