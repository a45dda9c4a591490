//! asset-sync CLI
//!
//! Uploads a project's static images to a content-addressed store and keeps
//! a ledger of what was uploaded.

mod cli;
mod commands;
mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(root, cmd),
        None => {
            println!("{} Static asset synchronizer", "asset-sync".green().bold());
            println!();
            println!("Run {} for available commands.", "asset-sync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(root: PathBuf, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init => commands::run_init(&root),
        Commands::Sync {
            delete_missing,
            dry_run,
            json,
            store,
        } => commands::run_sync(
            &root,
            &commands::SyncArgs {
                delete_missing,
                dry_run,
                json,
                store,
            },
        ),
        Commands::Status { json } => commands::run_status(&root, json),
        Commands::Trash => commands::run_trash(&root),
    }
}
