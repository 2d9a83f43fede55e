//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::{App, Focus};
use super::widgets::{analytics, header, input, results, sidebar};
use crate::app::Mode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of the navigation sidebar.
const SIDEBAR_WIDTH: u16 = 26;

/// Height of the analytics list, borders included.
const ANALYTICS_LIST_HEIGHT: u16 = 12;

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(main_layout[1]);

    frame.render_widget(
        header::Header::new(&app.connection_info, app.is_processing),
        main_layout[0],
    );
    frame.render_widget(
        sidebar::Sidebar::new(app.mode, app.focus == Focus::Sidebar),
        content_layout[0],
    );

    match app.mode {
        Mode::Home => render_home(frame, content_layout[1]),
        Mode::Explore => render_explore(frame, content_layout[1], app),
        Mode::Analytics => render_analytics(frame, content_layout[1], app),
    }
}

fn render_home(frame: &mut Frame, area: Rect) {
    let heading = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let body = Style::default().fg(Color::Gray);

    let lines = vec![
        Line::from(Span::styled("Welcome to BookScape Explorer!", heading)),
        Line::from(""),
        Line::from(Span::styled(
            "Browse the history_book catalog and run canned analytics over it.",
            body,
        )),
        Line::from(""),
        Line::from(Span::styled("Explore Books", Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            "  Search book titles by keyword and list every matching record.",
            body,
        )),
        Line::from(Span::styled("Analytics", Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            "  Twenty questions about availability, pricing, ratings, authors and publishers.",
            body,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Use Up/Down in the sidebar to switch views, Tab to move focus, Enter to run.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Tab to the results to scroll them with Up/Down, PageUp/PageDown, Home/End.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Home ");

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_explore(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_input(frame, layout[0], app, "Search book titles");
    render_results(frame, layout[1], app);
}

fn render_analytics(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(ANALYTICS_LIST_HEIGHT)];
    if app.shows_input() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(3));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        analytics::AnalyticsList::new(&app.analytics, app.selected, app.focus == Focus::List),
        layout[0],
    );

    if app.shows_input() {
        render_input(frame, layout[1], app, "Keyword");
    }

    render_results(frame, layout[layout.len() - 1], app);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App, title: &str) {
    let focused = app.focus == Focus::Input;
    let widget = input::InputBar::new(title, &app.input.text, app.input.cursor, focused);
    let cursor_x = area.x + widget.cursor_column(area.width);
    frame.render_widget(widget, area);

    if focused && !app.is_processing {
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let pane = results::ResultPane::new(
        app.outcome.as_ref(),
        app.notice.as_deref(),
        app.is_processing,
    )
    .scroll(app.result_scroll)
    .focused(app.focus == Focus::Results);
    frame.render_widget(pane, area);
}
