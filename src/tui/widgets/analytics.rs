//! Analytics list widget.
//!
//! Lists the numbered analytics and keeps the highlighted one in view.

use crate::tui::app::AnalyticItem;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Analytics list widget.
pub struct AnalyticsList<'a> {
    items: &'a [AnalyticItem],
    selected: usize,
    focused: bool,
}

impl<'a> AnalyticsList<'a> {
    /// Creates a new analytics list.
    pub fn new(items: &'a [AnalyticItem], selected: usize, focused: bool) -> Self {
        Self {
            items,
            selected,
            focused,
        }
    }
}

impl Widget for AnalyticsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Analytics ");

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let suffix = if item.requires_param { " (keyword)" } else { "" };
                ListItem::new(format!("{}{}", item.label, suffix))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
