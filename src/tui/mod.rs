//! Terminal User Interface for BookScape.
//!
//! Provides the main TUI application loop using ratatui and crossterm.
//! Interactions run one at a time; input is ignored until the current one
//! completes.

pub mod app;
mod events;
mod ui;
pub mod widgets;

pub use app::{Action, App};
pub use events::{Event, EventHandler};

use crate::app::Dashboard;
use crate::error::{BookscapeError, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;
use tracing::{debug, info};

/// Leaves raw mode and the alternate screen before a panic message prints.
///
/// Dropping the guard reinstalls the hook that was active before `install`.
struct TerminalPanicGuard {
    restore: Option<Box<dyn FnOnce() + Send>>,
}

impl TerminalPanicGuard {
    fn install() -> Self {
        let previous = Arc::new(panic::take_hook());
        let chained = Arc::clone(&previous);

        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            (**chained)(panic_info);
        }));

        Self {
            restore: Some(Box::new(move || {
                drop(panic::take_hook());
                panic::set_hook(Box::new(move |panic_info| (**previous)(panic_info)));
            })),
        }
    }
}

impl Drop for TerminalPanicGuard {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;

        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| BookscapeError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| {
            BookscapeError::internal(format!("Failed to enter alternate screen: {e}"))
        })?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| BookscapeError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| BookscapeError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
            BookscapeError::internal(format!("Failed to leave alternate screen: {e}"))
        })?;

        self.terminal
            .show_cursor()
            .map_err(|e| BookscapeError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main event loop against the dashboard.
    pub async fn run(&mut self, dashboard: &Dashboard) -> Result<()> {
        let panic_guard = TerminalPanicGuard::install();

        let mut app_state = App::new(dashboard.catalog(), dashboard.connection_info());
        let result = self.run_event_loop(&mut app_state, dashboard).await;

        drop(panic_guard);

        result
    }

    async fn run_event_loop(&mut self, app_state: &mut App, dashboard: &Dashboard) -> Result<()> {
        while app_state.running {
            self.draw(app_state)?;

            let Event::Key(key) = self.event_handler.next_async().await? else {
                continue;
            };

            if let Some(action) = app_state.handle_key(key) {
                // Show the busy state before blocking on the store
                self.draw(app_state)?;
                let (title, result) = perform(dashboard, action).await;
                app_state.set_outcome(title, result);
            }
        }

        info!("Exiting BookScape");
        Ok(())
    }

    fn draw(&mut self, app_state: &App) -> Result<()> {
        self.terminal
            .draw(|frame| ui::render(frame, app_state))
            .map_err(|e| BookscapeError::internal(format!("Failed to draw: {e}")))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs one action against the dashboard, returning the result pane title and outcome.
pub async fn perform(
    dashboard: &Dashboard,
    action: Action,
) -> (String, crate::query::ExecutionResult) {
    debug!("Running {:?}", action);
    match action {
        Action::Explore(keyword) => {
            let result = dashboard.explore(&keyword).await;
            (format!("Search: {keyword}"), result)
        }
        Action::RunAnalytic { number, keyword } => {
            let title = dashboard
                .catalog()
                .lookup_number(number)
                .map(|def| def.label.to_string())
                .unwrap_or_else(|_| format!("Analytic {number}"));
            let result = dashboard.run_analytic(number, keyword.as_deref()).await;
            (title, result)
        }
    }
}

/// Runs the TUI application.
pub async fn run(dashboard: &Dashboard) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.run(dashboard).await
}
