//! Result pane widget.
//!
//! Shows the last outcome: a table, the neutral empty notice, or the failure
//! with its category.

use super::table::TableView;
use crate::query::ExecutionResult;
use crate::tui::app::Outcome;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Message shown when a query matched nothing.
pub const EMPTY_NOTICE: &str = "No results found for this query.";

/// Result pane widget.
pub struct ResultPane<'a> {
    outcome: Option<&'a Outcome>,
    notice: Option<&'a str>,
    processing: bool,
    scroll: usize,
    focused: bool,
}

impl<'a> ResultPane<'a> {
    /// Creates a new result pane.
    pub fn new(outcome: Option<&'a Outcome>, notice: Option<&'a str>, processing: bool) -> Self {
        Self {
            outcome,
            notice,
            processing,
            scroll: 0,
            focused: false,
        }
    }

    /// Sets the scroll offset in lines. Offsets past the end are clamped.
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Highlights the border when the pane has focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn body(&self, width: usize) -> Vec<Line<'static>> {
        if self.processing {
            return vec![Line::from(Span::styled(
                "Running query...",
                Style::default().fg(Color::Yellow),
            ))];
        }

        let mut lines = match self.outcome.map(|outcome| &outcome.result) {
            None => Vec::new(),
            Some(ExecutionResult::Success(table)) => TableView::new(table).render_to_lines(width),
            Some(ExecutionResult::Empty) => vec![Line::from(Span::styled(
                EMPTY_NOTICE,
                Style::default().fg(Color::Gray),
            ))],
            Some(ExecutionResult::Failure(error)) => vec![Line::from(vec![
                Span::styled(
                    format!("{}: ", error.category()),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(error.message().to_string(), Style::default().fg(Color::Red)),
            ])],
        };

        if let Some(notice) = self.notice {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                notice.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }

        lines
    }
}

impl Widget for ResultPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = self
            .outcome
            .map(|outcome| format!(" {} ", outcome.title))
            .unwrap_or_else(|| " Results ".to_string());

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let inner_width = area.width.saturating_sub(2) as usize;
        let inner_height = area.height.saturating_sub(2) as usize;
        let lines = self.body(inner_width);

        let max_offset = lines.len().saturating_sub(inner_height);
        let offset = u16::try_from(self.scroll.min(max_offset)).unwrap_or(u16::MAX);

        Paragraph::new(lines)
            .block(block)
            .scroll((offset, 0))
            .render(area, buf);
    }
}
