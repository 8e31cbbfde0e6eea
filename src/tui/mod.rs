// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, fetch outcomes)
// - Rendering the UI

pub mod app;
pub mod components;
pub mod layout;
pub mod screen;
pub mod scroll;
pub mod traits;
pub mod views;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use screen::OutcomeReceiver;
use std::io;
use std::time::Duration;

/// Run the TUI
///
/// Sets up the terminal, shows the screen, runs the event loop, and restores
/// the terminal even if the loop fails.
pub async fn run_tui(mut app: App, mut outcome_rx: OutcomeReceiver) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.screen.appear();

    let result = run_event_loop(&mut terminal, &mut app, &mut outcome_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (spinner animation, poster arrivals)
/// 3. Fetch outcomes from the screen's tasks
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcome_rx: &mut OutcomeReceiver,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(150));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    // Release/repeat events would double every keystroke on
                    // terminals that report them
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press {
                            app.handle_key(key);
                        }
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(outcome) = outcome_rx.recv() => {
                app.apply_outcome(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
