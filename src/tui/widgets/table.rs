//! Result table widget.
//!
//! Renders a result table with a bordered header, auto-sized columns and
//! styled NULL values. The same lines back the one-shot text output.

use crate::db::Value;
use crate::query::ResultTable;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Widget for rendering a result table.
pub struct TableView<'a> {
    table: &'a ResultTable,
}

impl<'a> TableView<'a> {
    /// Creates a new table widget.
    pub fn new(table: &'a ResultTable) -> Self {
        Self { table }
    }

    /// Width of the widest value in each column.
    fn natural_column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .table
            .columns
            .iter()
            .map(|name| name.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.table.rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.to_display_string().chars().count());
            }
        }

        widths
    }

    /// Calculates the optimal width for each column.
    fn calculate_column_widths(&self) -> Vec<usize> {
        self.natural_column_widths()
            .into_iter()
            .map(|w| w.min(MAX_COLUMN_WIDTH))
            .collect()
    }

    /// Truncates a string to the given width in characters, adding an ellipsis if needed.
    fn truncate(s: &str, max_width: usize) -> String {
        if s.chars().count() <= max_width {
            s.to_string()
        } else if max_width <= 3 {
            s.chars().take(max_width).collect()
        } else {
            let kept: String = s.chars().take(max_width - 3).collect();
            format!("{kept}...")
        }
    }

    /// Renders the table to a vector of Lines for embedding in other widgets.
    ///
    /// An `available_width` of 0 means unbounded: columns keep their full
    /// width and no value is truncated.
    pub fn render_to_lines(&self, available_width: usize) -> Vec<Line<'static>> {
        let widths = if available_width == 0 {
            self.natural_column_widths()
        } else {
            self.calculate_column_widths()
        };
        if widths.is_empty() {
            return vec![Line::from(Span::styled(
                "(no columns)",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        // borders and padding
        let total_width: usize = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
        let scale_factor = if total_width > available_width && available_width > 0 {
            available_width as f64 / total_width as f64
        } else {
            1.0
        };

        let adjusted_widths: Vec<usize> = widths
            .iter()
            .map(|&w| ((w as f64 * scale_factor) as usize).max(MIN_COLUMN_WIDTH))
            .collect();

        let mut lines = Vec::with_capacity(self.table.rows.len() + 5);
        lines.push(Self::render_border(&adjusted_widths, '┌', '┬', '┐'));
        lines.push(self.render_header_row(&adjusted_widths));
        lines.push(Self::render_border(&adjusted_widths, '├', '┼', '┤'));

        for row in &self.table.rows {
            lines.push(Self::render_data_row(row, &adjusted_widths));
        }

        lines.push(Self::render_border(&adjusted_widths, '└', '┴', '┘'));

        let count = self.table.row_count();
        lines.push(Line::from(Span::styled(
            format!("{} row{} returned", count, if count == 1 { "" } else { "s" }),
            Style::default().fg(Color::DarkGray),
        )));

        lines
    }

    /// Renders the table as plain text, one line per table line.
    pub fn render_plain(&self, available_width: usize) -> String {
        self.render_to_lines(available_width)
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_border(widths: &[usize], left: char, mid: char, right: char) -> Line<'static> {
        let mut border = String::new();
        border.push(left);

        for (i, &width) in widths.iter().enumerate() {
            border.push_str(&"─".repeat(width + 2));
            if i < widths.len() - 1 {
                border.push(mid);
            }
        }

        border.push(right);

        Line::from(Span::styled(border, Style::default().fg(Color::DarkGray)))
    }

    fn render_header_row(&self, widths: &[usize]) -> Line<'static> {
        let mut spans = vec![Span::styled("│", Style::default().fg(Color::DarkGray))];

        for (name, &width) in self.table.columns.iter().zip(widths) {
            let padded = format!(" {:width$} ", Self::truncate(name, width), width = width);
            spans.push(Span::styled(
                padded,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    fn render_data_row(row: &[Value], widths: &[usize]) -> Line<'static> {
        let mut spans = vec![Span::styled("│", Style::default().fg(Color::DarkGray))];

        for (value, &width) in row.iter().zip(widths) {
            let display = value.to_display_string();
            let padded = format!(" {:width$} ", Self::truncate(&display, width), width = width);

            let style = if value.is_null() {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };

            spans.push(Span::styled(padded, style));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }
}

impl Widget for TableView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.render_to_lines(area.width as usize);

        for (i, line) in lines.iter().take(area.height as usize).enumerate() {
            buf.set_line(area.x, area.y + i as u16, line, area.width);
        }
    }
}
