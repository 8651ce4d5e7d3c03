//! Command-line interface for taborder.
//!
//! Inspects, validates and edits saved tracker snapshots.

use crate::config::{Config, LogLevel};
use crate::services::{LogTitles, MemoryStore};
use crate::snapshot::TrackerSnapshot;
use crate::snapshot::storage::{clear_snapshot_at, load_snapshot_from, save_snapshot_to};
use crate::tracker::{RelativeOrderTracker, WindowId};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// taborder - relative window and tab order tracker
#[derive(Parser)]
#[command(name = "taborder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print windows and tabs in tracked order
    Show {
        /// Snapshot file (default: configured snapshot path)
        #[arg(long, value_name = "PATH")]
        snapshot: Option<PathBuf>,

        /// JSON dump of the temporary store to reload window names from
        #[arg(long, value_name = "PATH")]
        names: Option<PathBuf>,
    },
    /// Print the serialized tracker as JSON
    Export {
        /// Snapshot file (default: configured snapshot path)
        #[arg(long, value_name = "PATH")]
        snapshot: Option<PathBuf>,
    },
    /// Check that a snapshot file can be restored
    Validate {
        /// Snapshot file to check
        path: PathBuf,
    },
    /// Name a window in a snapshot; a blank name clears it
    Name {
        /// Window id
        window: WindowId,

        /// New name
        name: String,

        /// Snapshot file (default: configured snapshot path)
        #[arg(long, value_name = "PATH")]
        snapshot: Option<PathBuf>,
    },
    /// Delete a snapshot file
    Clear {
        /// Snapshot file (default: configured snapshot path)
        #[arg(long, value_name = "PATH")]
        snapshot: Option<PathBuf>,
    },
    /// Write a config file with default settings
    InitConfig {
        /// Config file (default: ~/.config/taborder/config.yaml)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Snapshot to read for `show`/`export`
///
/// An explicit path is always used. The configured default is only read when
/// `restore_on_start` is enabled.
fn snapshot_to_read(explicit: Option<PathBuf>, config: &Config) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path),
        None if config.restore_on_start => Some(config.resolved_snapshot_path()),
        None => {
            log::info!("restore_on_start is disabled, not reading the saved snapshot");
            None
        }
    }
}

/// Run the parsed command, returning the process exit code
pub fn run(cli: Cli, config: &Config) -> Result<i32> {
    match cli.command {
        Commands::Show { snapshot, names } => {
            let Some(path) = snapshot_to_read(snapshot, config) else {
                println!("Snapshot restore disabled in config; pass --snapshot");
                return Ok(0);
            };
            let Some(mut tracker) = restore_from(&path)? else {
                println!("No snapshot at {}", path.display());
                return Ok(0);
            };
            if let Some(names) = names {
                reload_names(&mut tracker, &names)?;
            }
            print!("{}", render_tracker(&tracker));
            Ok(0)
        }
        Commands::Export { snapshot } => {
            let Some(path) = snapshot_to_read(snapshot, config) else {
                bail!("Snapshot restore disabled in config; pass --snapshot");
            };
            let Some(tracker) = restore_from(&path)? else {
                bail!("No snapshot at {}", path.display());
            };
            let json = serde_json::to_string_pretty(&tracker.to_serializable())
                .context("Failed to serialize tracker")?;
            println!("{json}");
            Ok(0)
        }
        Commands::Validate { path } => match restore_from(&path) {
            Ok(Some(tracker)) => {
                let tabs: usize = tracker.all_as_2d_array().iter().map(Vec::len).sum();
                println!("OK: {} windows, {} tabs", tracker.window_count(), tabs);
                Ok(0)
            }
            Ok(None) => {
                eprintln!("taborder: no snapshot at {}", path.display());
                Ok(1)
            }
            Err(e) => {
                eprintln!("taborder: invalid snapshot: {e:#}");
                Ok(1)
            }
        },
        Commands::Name {
            window,
            name,
            snapshot,
        } => {
            let path = snapshot.unwrap_or_else(|| config.resolved_snapshot_path());
            let Some(mut tracker) = restore_from(&path)? else {
                bail!("No snapshot at {}", path.display());
            };
            tracker.set_name(window, &name, &MemoryStore::new(), &LogTitles)?;
            save_snapshot_to(&TrackerSnapshot::capture(&tracker), &path)?;
            Ok(0)
        }
        Commands::Clear { snapshot } => {
            let path = snapshot.unwrap_or_else(|| config.resolved_snapshot_path());
            clear_snapshot_at(&path)?;
            println!("Cleared {}", path.display());
            Ok(0)
        }
        Commands::InitConfig { path, force } => {
            let path = path.unwrap_or_else(Config::config_path);
            if path.exists() && !force {
                eprintln!(
                    "taborder: {} already exists (use --force to overwrite)",
                    path.display()
                );
                return Ok(1);
            }
            Config::default().save_to(&path)?;
            println!("Wrote default config to {}", path.display());
            Ok(0)
        }
    }
}

/// Load and restore the tracker stored at `path`
pub fn restore_from(path: &Path) -> Result<Option<RelativeOrderTracker>> {
    let Some(snapshot) = load_snapshot_from(path)? else {
        return Ok(None);
    };
    let tracker = snapshot
        .restore()
        .with_context(|| format!("Failed to restore tracker from {:?}", path))?;
    Ok(Some(tracker))
}

fn reload_names(tracker: &mut RelativeOrderTracker, names: &Path) -> Result<()> {
    let store = MemoryStore::load_json(names)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let applied = runtime.block_on(tracker.reload_names_from_temporary_store(&store))?;
    log::info!("Applied {} names from {:?}", applied, names);
    Ok(())
}

/// Human-readable listing: one line per window, active tab marked with `*`
pub fn render_tracker(tracker: &RelativeOrderTracker) -> String {
    let mut out = String::new();
    for window_id in tracker.window_ids() {
        let _ = write!(out, "Window {window_id}");
        if let Some(name) = tracker.name(window_id) {
            let _ = write!(out, " [{name}]");
        }
        if tracker.focused_window() == Some(window_id) {
            out.push_str(" (focused)");
        }
        out.push('\n');

        let active = tracker.active_tab(window_id);
        for tab_id in tracker.tab_ids(window_id).unwrap_or_default() {
            let marker = if active == Some(tab_id) { '*' } else { ' ' };
            let _ = writeln!(out, "  {marker} {tab_id}");
        }
    }
    out
}
