// CLI module - command-line argument parsing and handlers
//
// With no subcommand the TUI runs. Subcommands:
// - list [--json]: print the default listing once
// - search <term> [--json]: print search results once
// - config --show | --path | --reset: configuration management
//
// The one-shot commands drive the same screen the TUI uses, so rows print
// exactly as cells would show them.

use crate::catalog::{CatalogEntry, CatalogService, NoPosterLoader};
use crate::config::{Config, VERSION};
use crate::theme::Theme;
use crate::tui::screen::MoviesScreen;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::sync::mpsc;

/// reelview - browse a TV show catalog from the terminal
#[derive(Parser)]
#[command(name = "reelview")]
#[command(version = VERSION)]
#[command(about = "Browse and search a TVMaze-style show catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the default listing and exit
    List {
        /// Print entries as JSON instead of rows
        #[arg(long)]
        json: bool,
    },

    /// Search the catalog and exit
    Search {
        /// Search term
        term: String,

        /// Print entries as JSON instead of rows
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// What a one-shot fetch should ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneShot {
    List,
    Search(String),
}

/// Run one fetch through a screen and print the rows
pub async fn run_once(
    service: Arc<dyn CatalogService>,
    config: &Config,
    query: OneShot,
    json: bool,
) -> Result<()> {
    let rows = fetch_rows(service, config, &query).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_rows(&mut out, &rows, json)
}

/// Drive a screen through one fetch and collect what it shows
async fn fetch_rows(
    service: Arc<dyn CatalogService>,
    config: &Config,
    query: &OneShot,
) -> Result<Vec<Row>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut screen = MoviesScreen::new(
        service,
        Arc::new(NoPosterLoader),
        tx,
        config.response_ordering,
        Theme::by_name(&config.theme),
    );

    match query {
        OneShot::List => screen.appear(),
        OneShot::Search(term) => screen.search_text_changed(term),
    }

    let outcome = rx
        .recv()
        .await
        .ok_or_else(|| anyhow!("fetch task ended without a result"))?;

    // The screen swallows failures; a script wants a non-zero exit instead
    if let Some(e) = outcome.error() {
        return Err(anyhow!("{}", e)).context(format!("Failed to fetch from {}", config.api_url));
    }
    screen.apply_outcome(outcome);

    Ok((0..screen.number_of_rows())
        .filter_map(|i| {
            screen.movie_at(i).map(|entry| Row {
                line: screen.cell_for_row(i).to_plain_line(),
                entry: entry.clone(),
            })
        })
        .collect())
}

struct Row {
    line: String,
    entry: CatalogEntry,
}

fn write_rows(out: &mut impl std::io::Write, rows: &[Row], json: bool) -> Result<()> {
    if json {
        let entries: Vec<&CatalogEntry> = rows.iter().map(|r| &r.entry).collect();
        serde_json::to_writer_pretty(&mut *out, &entries).context("Failed to encode JSON")?;
        writeln!(out)?;
    } else {
        for row in rows {
            writeln!(out, "{}", row.line)?;
        }
    }
    Ok(())
}

/// Handle `config` flags
pub fn handle_config(show: bool, path: bool, reset: bool) -> Result<()> {
    if path {
        let path = Config::config_path().context("Could not determine config path")?;
        println!("{}", path.display());
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset()?;
    } else {
        println!("Usage: reelview config [--show|--path|--reset]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
    }
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
