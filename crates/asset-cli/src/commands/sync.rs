//! Sync command implementation

use std::path::{Path, PathBuf};

use asset_core::{DirectoryStore, SyncConfig, SyncEngine, SyncOptions, SyncReport};
use asset_fs::NormalizedPath;
use colored::Colorize;

use crate::error::Result;

/// Flags accepted by `asset-sync sync`
#[derive(Debug, Clone, Default)]
pub struct SyncArgs {
    pub delete_missing: bool,
    pub dry_run: bool,
    pub json: bool,
    pub store: Option<PathBuf>,
}

/// Run the sync command
///
/// `--delete-missing` turns destruction on for this run even when the
/// configuration leaves it off; it never turns it off.
pub fn run_sync(path: &Path, args: &SyncArgs) -> Result<()> {
    let root = NormalizedPath::new(path);
    let config = SyncConfig::load(&root)?;
    let store = resolve_store(&root, &config, args.store.as_deref())?;

    let options = SyncOptions {
        delete_missing: args.delete_missing || config.delete_missing,
        dry_run: args.dry_run,
    };

    if !args.json {
        println!(
            "{} Synchronizing assets into {}...",
            "=>".blue().bold(),
            store.root().display().to_string().cyan()
        );
    }

    let engine = SyncEngine::new(root, config, Box::new(store));
    let report = engine.sync(&options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Pick the store directory: the `--store` flag, else `[store] directory`
/// resolved against the project root.
fn resolve_store(
    root: &NormalizedPath,
    config: &SyncConfig,
    flag: Option<&Path>,
) -> Result<DirectoryStore> {
    let dir = match (flag, config.store.directory.as_deref()) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(dir)) if Path::new(dir).is_absolute() => PathBuf::from(dir),
        (None, Some(dir)) => root.join(dir).to_native(),
        (None, None) => return Err(asset_core::Error::StoreNotConfigured.into()),
    };
    tracing::debug!(store = %dir.display(), "using directory store");
    Ok(DirectoryStore::new(dir)?)
}

fn print_report(report: &SyncReport) {
    if report.is_noop() {
        println!(
            "{} Already synchronized. {} unchanged.",
            "OK".green().bold(),
            report.unchanged.len()
        );
        return;
    }

    let heading = if report.dry_run {
        "Dry run:".yellow().bold()
    } else {
        "Synchronization complete:".green().bold()
    };
    println!("{} {}", "OK".green().bold(), heading);
    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    println!();
    println!(
        "{} uploaded, {} unchanged, {} trashed, {} destroyed, {} reclaimed",
        report.uploaded.len(),
        report.unchanged.len(),
        report.trashed.len(),
        report.destroyed.len(),
        report.reclaimed.len()
    );
    if !report.trashed.is_empty() {
        println!(
            "Run {} to destroy trashed assets.",
            "asset-sync sync --delete-missing".cyan()
        );
    }
}
