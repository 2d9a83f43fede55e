//! Sidebar widget for the TUI.
//!
//! Displays the navigation modes with the current one highlighted.

use crate::app::Mode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Navigation sidebar widget.
pub struct Sidebar {
    current: Mode,
    focused: bool,
}

impl Sidebar {
    /// Creates a new sidebar widget.
    pub fn new(current: Mode, focused: bool) -> Self {
        Self { current, focused }
    }
}

impl Widget for Sidebar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Navigation ");

        let mut lines: Vec<Line> = Mode::ALL
            .iter()
            .map(|mode| {
                if *mode == self.current {
                    Line::from(Span::styled(
                        format!("> {}", mode.label()),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::raw(format!("  {}", mode.label())))
                }
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Tab: focus  Esc: quit",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
