//! folder-autorun: toggle login autostart for every file in a folder
//!
//! Drag & drop a folder onto the executable (or pass its path). Every
//! regular file directly inside it is registered to start at login;
//! dropping the same folder again unregisters them.

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod config;
mod registrar;
mod store;
mod sync;

use config::AppConfig;
use store::PathStore;
use sync::Synchronizer;

#[derive(Parser)]
#[command(name = "folder-autorun")]
#[command(about = "Toggle login autostart for every file in a folder", long_about = None)]
#[command(version)]
struct Cli {
    /// Folder to toggle (as supplied by drag & drop)
    folder: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// List folders currently enabled for autorun
    #[arg(short, long)]
    list: bool,

    /// Use an explicit store file instead of the per-user default
    #[arg(long, value_name = "FILE")]
    database: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.database {
        Some(path) => AppConfig::with_database_file(path),
        None => AppConfig::new()?,
    };
    let store = PathStore::new(&config.database_file);

    if cli.list {
        return list_enabled(&store);
    }

    let Some(folder) = cli.folder.as_deref().and_then(resolve_folder) else {
        println!("Please drag & drop a folder onto me, or pass its path.");
        return Ok(());
    };

    let files = sync::list_files(&folder)?;
    if files.is_empty() {
        println!("{} contains no files to autorun.", folder.display());
        return Ok(());
    }

    let enabled = store.contains(&folder)?;
    let action = if enabled { "Disable" } else { "Enable" };

    if cli.dry_run {
        println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
        let verb = if enabled { "unregister" } else { "register" };
        for file in &files {
            println!(
                "  would {} {} ({})",
                verb,
                file.display(),
                config.entry_name(file)
            );
        }
        return Ok(());
    }

    if !cli.yes && !confirm(&format!("{} autorun?", action))? {
        return Ok(());
    }

    config.ensure_app_dir()?;

    let mut registrar = registrar::default_registrar()?;
    let report = Synchronizer::new(&config, &store, registrar.as_mut())
        .apply(&folder, !enabled)?;

    if enabled {
        println!(
            "{} Removed {} of {} autostart entries ({} left to other owners).",
            "Done!".green(),
            report.entries_removed,
            report.files_seen,
            report.entries_skipped
        );
    } else {
        println!(
            "{} Registered {} file(s) ({} already up to date).",
            "Done!".green(),
            report.entries_written,
            report.entries_skipped
        );
    }

    Ok(())
}

/// Absolute form of the dropped path; None if not a directory.
/// Symlinks are not resolved: identity is the path as given.
fn resolve_folder(path: &Path) -> Option<PathBuf> {
    if !path.is_dir() {
        return None;
    }
    std::path::absolute(path).ok()
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} (y/N) ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn list_enabled(store: &PathStore) -> Result<()> {
    let entries = store.entries()?;
    if entries.is_empty() {
        println!("No folders are enabled for autorun.");
        return Ok(());
    }
    for line in entries {
        if Path::new(&line).is_dir() {
            println!("{}", line);
        } else {
            println!("{} {}", line, "(missing)".dimmed());
        }
    }
    Ok(())
}
