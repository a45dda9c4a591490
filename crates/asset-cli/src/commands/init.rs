//! Init command implementation
//!
//! Writes a default `asset-sync.toml` so the asset roots, ignore rules and
//! store location can be edited by hand.

use std::path::Path;

use asset_core::SyncConfig;
use asset_fs::{AssetPath, NormalizedPath};
use colored::Colorize;

use crate::error::{CliError, Result};

/// Run the init command
pub fn run_init(path: &Path) -> Result<()> {
    let root = NormalizedPath::new(path);
    let config_path = SyncConfig::path(&root);

    if config_path.exists() {
        return Err(CliError::user(format!(
            "{} already exists in {}",
            AssetPath::Config,
            path.display()
        )));
    }

    SyncConfig::default().save(&root)?;

    println!(
        "{} Wrote {}",
        "OK".green().bold(),
        config_path.as_str().cyan()
    );
    println!();
    println!(
        "Set {} and run {}.",
        "[store] directory".yellow(),
        "asset-sync sync".cyan()
    );
    Ok(())
}
