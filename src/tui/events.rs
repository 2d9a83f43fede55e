//! Event handling for the TUI.
//!
//! Polls crossterm for keyboard and terminal events.

use crate::error::{BookscapeError, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Nothing happened within the tick rate.
    Tick,
}

/// Handles terminal events.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    /// Timeout for polling events.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Creates a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Polls for the next event, blocking for at most the tick rate.
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)
            .map_err(|e| BookscapeError::internal(format!("Failed to poll events: {e}")))?
        {
            return Ok(Event::Tick);
        }

        let event = event::read()
            .map_err(|e| BookscapeError::internal(format!("Failed to read event: {e}")))?;

        Ok(match event {
            // Release events would otherwise double every key on Windows.
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        })
    }

    /// Polls for the next event without blocking the async runtime.
    pub async fn next_async(&self) -> Result<Event> {
        let handler = *self;
        tokio::task::spawn_blocking(move || handler.next())
            .await
            .map_err(|e| BookscapeError::internal(format!("Event task failed: {e}")))?
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new();
        assert_eq!(handler.tick_rate, Duration::from_millis(100));
    }

    #[test]
    fn test_event_handler_custom_tick_rate() {
        let handler = EventHandler::with_tick_rate(Duration::from_millis(50));
        assert_eq!(handler.tick_rate, Duration::from_millis(50));
    }
}
