//! Input widget for the TUI.
//!
//! Provides the keyword field with horizontal scrolling to keep the cursor visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Calculates the scroll offset needed to keep the cursor visible.
///
/// Returns the number of characters to skip from the start of the text.
pub fn calculate_scroll_offset(cursor: usize, available_width: usize) -> usize {
    cursor.saturating_sub(available_width)
}

/// Keyword input bar widget.
pub struct InputBar<'a> {
    title: &'a str,
    text: &'a str,
    cursor: usize,
    focused: bool,
}

impl<'a> InputBar<'a> {
    /// Creates a new input bar widget.
    pub fn new(title: &'a str, text: &'a str, cursor: usize, focused: bool) -> Self {
        Self {
            title,
            text,
            cursor,
            focused,
        }
    }

    /// Screen column of the cursor relative to the widget's left edge.
    pub fn cursor_column(&self, area_width: u16) -> u16 {
        let available_width = Self::available_width(area_width);
        let offset = calculate_scroll_offset(self.cursor, available_width);
        // left border and "> " prompt
        (1 + 2 + self.cursor - offset) as u16
    }

    // Border left (1) + prompt "> " (2) + border right (1) + cursor space (1) = 5
    fn available_width(area_width: u16) -> usize {
        area_width.saturating_sub(5) as usize
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.title));

        let prompt_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        let scroll_offset =
            calculate_scroll_offset(self.cursor, Self::available_width(area.width));
        let visible_text: String = self.text.chars().skip(scroll_offset).collect();

        let line = Line::from(vec![
            Span::styled("> ", prompt_style),
            Span::raw(visible_text),
        ]);

        Paragraph::new(line).block(block).render(area, buf);
    }
}
