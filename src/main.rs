// reelview - terminal browser for a TV show catalog
//
// Architecture:
// - Catalog: CatalogService trait + TVMaze HTTP client (reqwest)
// - Posters: fire-and-forget image fetches into a shared cache
// - TUI (ratatui): movies screen with search, list, logs panel
// - Fetch results flow back to the UI task over an mpsc channel

mod catalog;
mod cli;
mod config;
mod logging;
mod theme;
mod tui;

use anyhow::{Context, Result};
use catalog::{CatalogService, HttpPosterLoader, NoPosterLoader, PosterLoader, TvMazeService};
use clap::Parser;
use cli::{Cli, Commands, OneShot};
use config::Config;
use logging::{LogBuffer, LogSink};
use std::sync::Arc;
use std::time::Duration;
use theme::Theme;
use tokio::sync::mpsc;
use tui::app::App;
use tui::screen::MoviesScreen;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands run before anything touches the config file
    if let Some(Commands::Config { show, path, reset }) = &cli.command {
        return cli::handle_config(*show, *path, *reset);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    // One-shot commands never draw, and REELVIEW_NO_TUI falls back to a listing
    let one_shot = match cli.command {
        Some(Commands::List { json }) => Some((OneShot::List, json)),
        Some(Commands::Search { term, json }) => Some((OneShot::Search(term), json)),
        Some(Commands::Config { .. }) => None,
        None if !config.enable_tui => Some((OneShot::List, false)),
        None => None,
    };

    // In TUI mode logs go to the buffer so they don't garble the display
    let log_buffer = LogBuffer::new();
    let sink = if one_shot.is_some() {
        LogSink::Stderr
    } else {
        LogSink::Tui(log_buffer.clone())
    };
    // Must stay alive until exit so the file writer flushes
    let _file_guard = logging::init(&config.logging, sink);

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let tvmaze = TvMazeService::new(config.api_url.clone(), timeout)
        .context("Failed to create catalog client")?;
    tracing::info!("reelview v{} using {}", config::VERSION, tvmaze.base_url());
    let service: Arc<dyn CatalogService> = Arc::new(tvmaze);

    if let Some((query, json)) = one_shot {
        return cli::run_once(service, &config, query, json).await;
    }

    let posters: Arc<dyn PosterLoader> = if config.posters {
        Arc::new(HttpPosterLoader::new(timeout).context("Failed to create poster client")?)
    } else {
        Arc::new(NoPosterLoader)
    };

    if !Theme::list_available().contains(&config.theme.to_lowercase().as_str()) {
        tracing::warn!("Unknown theme {:?}, using auto", config.theme);
    }
    let theme = Theme::by_name(&config.theme);
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    let screen = MoviesScreen::new(
        service,
        posters.clone(),
        outcome_tx,
        config.response_ordering,
        theme.clone(),
    );
    let app = App::new(screen, log_buffer, posters, theme, config.show_logs);

    tui::run_tui(app, outcome_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}
