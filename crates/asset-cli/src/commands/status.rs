//! Status and trash command implementations

use std::path::Path;

use asset_core::{AssetRecord, Ledger, TrashLedger};
use asset_fs::{AssetPath, NormalizedPath};
use colored::Colorize;

use crate::error::Result;

/// Run the status command
pub fn run_status(path: &Path, json: bool) -> Result<()> {
    let root = NormalizedPath::new(path);
    let ledger = Ledger::load(&root.join(AssetPath::Ledger.as_str()).to_native())?;
    let trash = TrashLedger::load(&root.join(AssetPath::TrashLedger.as_str()).to_native())?;

    if json {
        let records: Vec<&AssetRecord> = ledger.records().collect();
        let status = serde_json::json!({
            "ledger": records,
            "trash": trash.records(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Asset Status".bold());
    println!();
    println!("{}:   {}", "Path".dimmed(), path.display());
    println!("{}:   {}", "Ledger".dimmed(), AssetPath::Ledger);
    println!();

    println!("{} ({}):", "Live Assets".bold(), ledger.len());
    if ledger.is_empty() {
        println!("  {} (use {} to upload)", "None".dimmed(), "asset-sync sync".cyan());
    } else {
        for record in ledger.records() {
            print_record("+".green(), record);
        }
    }
    println!();

    println!("{} ({}):", "Pending Deletion".bold(), trash.len());
    if trash.is_empty() {
        println!("  {}", "None".dimmed());
    } else {
        for record in trash.records() {
            print_record("-".yellow(), record);
        }
    }

    Ok(())
}

/// Run the trash command
///
/// Lists records whose local file disappeared. They stay recoverable until
/// a sync runs with `--delete-missing`.
pub fn run_trash(path: &Path) -> Result<()> {
    let root = NormalizedPath::new(path);
    let trash = TrashLedger::load(&root.join(AssetPath::TrashLedger.as_str()).to_native())?;

    if trash.is_empty() {
        println!("{} Trash is empty.", "OK".green().bold());
        return Ok(());
    }

    println!("{} ({}):", "Pending Deletion".bold(), trash.len());
    for record in trash.records() {
        print_record("-".yellow(), record);
    }
    println!();
    println!(
        "Restore a file to reclaim its asset, or run {} to destroy them.",
        "asset-sync sync --delete-missing".cyan()
    );
    Ok(())
}

fn print_record(marker: colored::ColoredString, record: &AssetRecord) {
    let dimensions = match (record.width, record.height) {
        (Some(w), Some(h)) => format!(" {}x{}", w, h),
        _ => String::new(),
    };
    println!(
        "  {} {} -> {} ({}{})",
        marker,
        record.local_key.cyan(),
        record.remote_identity,
        record.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed(),
        dimensions
    );
}
