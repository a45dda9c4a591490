//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// asset-sync - Mirror a project's static images to a remote asset store
#[derive(Parser, Debug)]
#[command(name = "asset-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "ASSET_SYNC_ROOT")]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write a default asset-sync.toml in the project root
    Init,

    /// Upload new or changed assets and retire missing ones
    ///
    /// Examples:
    ///   asset-sync sync --store ../cdn          # Upload into ../cdn
    ///   asset-sync sync --dry-run               # Show what would happen
    ///   asset-sync sync --delete-missing        # Also destroy trashed assets
    Sync {
        /// Destroy remote copies of deleted files instead of trashing them
        #[arg(long)]
        delete_missing: bool,

        /// Preview changes without uploading or writing ledgers
        #[arg(long)]
        dry_run: bool,

        /// Output the sync report as JSON
        #[arg(long)]
        json: bool,

        /// Store directory (overrides [store] directory in asset-sync.toml)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show the live ledger and pending deletions
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List assets waiting to be destroyed
    Trash,
}
