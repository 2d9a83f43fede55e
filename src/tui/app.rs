//! Application state for the TUI.
//!
//! Holds navigation, focus, the keyword input and the last outcome, and turns
//! key presses into dashboard actions. Running the actions is left to the
//! event loop in the parent module.

use crate::app::Mode;
use crate::catalog::QueryCatalog;
use crate::query::ExecutionResult;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Navigation sidebar.
    #[default]
    Sidebar,
    /// Analytics list.
    List,
    /// Keyword input.
    Input,
    /// Result pane, for scrolling.
    Results,
}

/// Input state for text editing.
///
/// The cursor is a character index, not a byte offset.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input text.
    pub text: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl InputState {
    /// Creates a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Deletes the character at the cursor (delete key).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the start of the input.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the input.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clears the input and returns the previous text.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Returns true if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An analytic as listed in the Analytics view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticItem {
    pub number: usize,
    pub label: &'static str,
    pub requires_param: bool,
}

/// Something the event loop must run against the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Search titles for the keyword.
    Explore(String),
    /// Run analytic `number`.
    RunAnalytic {
        number: usize,
        keyword: Option<String>,
    },
}

/// The last completed interaction.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// What was run, for the result pane title.
    pub title: String,
    /// What came back.
    pub result: ExecutionResult,
}

/// Lines moved by PageUp and PageDown in the result pane.
const RESULT_PAGE: usize = 10;

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Current navigation mode.
    pub mode: Mode,
    /// Current focus panel.
    pub focus: Focus,
    /// Keyword input.
    pub input: InputState,
    /// The analytics, in catalog order.
    pub analytics: Vec<AnalyticItem>,
    /// Index of the highlighted analytic.
    pub selected: usize,
    /// Result of the last interaction in the current mode.
    pub outcome: Option<Outcome>,
    /// Result pane offset in lines from the top (clamped during render).
    pub result_scroll: usize,
    /// One-line hint shown under the result pane.
    pub notice: Option<String>,
    /// True while an interaction is running.
    pub is_processing: bool,
    /// Database connection info for display.
    pub connection_info: String,
}

impl App {
    /// Creates a new App instance.
    pub fn new(catalog: &QueryCatalog, connection_info: impl Into<String>) -> Self {
        let analytics = catalog
            .analytics()
            .filter_map(|def| {
                def.number().map(|number| AnalyticItem {
                    number: usize::from(number),
                    label: def.label,
                    requires_param: def.requires_param,
                })
            })
            .collect();

        Self {
            running: true,
            mode: Mode::default(),
            focus: Focus::default(),
            input: InputState::new(),
            analytics,
            selected: 0,
            outcome: None,
            result_scroll: 0,
            notice: None,
            is_processing: false,
            connection_info: connection_info.into(),
        }
    }

    /// The highlighted analytic.
    pub fn selected_analytic(&self) -> Option<&AnalyticItem> {
        self.analytics.get(self.selected)
    }

    /// Returns true when the keyword input is on screen.
    pub fn shows_input(&self) -> bool {
        match self.mode {
            Mode::Home => false,
            Mode::Explore => true,
            Mode::Analytics => self
                .selected_analytic()
                .is_some_and(|item| item.requires_param),
        }
    }

    /// Switches navigation mode, clearing per-mode state.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.outcome = None;
        self.result_scroll = 0;
        self.notice = None;
        self.input.take();
    }

    /// Records the result of an interaction.
    pub fn set_outcome(&mut self, title: impl Into<String>, result: ExecutionResult) {
        self.is_processing = false;
        self.notice = None;
        self.result_scroll = 0;
        self.outcome = Some(Outcome {
            title: title.into(),
            result,
        });
    }

    /// Cycles focus through the panels visible in the current mode.
    pub fn cycle_focus(&mut self) {
        let order: &[Focus] = match (self.mode, self.shows_input()) {
            (Mode::Home, _) => &[Focus::Sidebar],
            (Mode::Explore, _) => &[Focus::Sidebar, Focus::Input, Focus::Results],
            (Mode::Analytics, false) => &[Focus::Sidebar, Focus::List, Focus::Results],
            (Mode::Analytics, true) => &[
                Focus::Sidebar,
                Focus::List,
                Focus::Input,
                Focus::Results,
            ],
        };

        let position = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(position + 1) % order.len()];
    }

    /// Handles a key press. Returns an action when one should be run.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
                return None;
            }
            KeyCode::Esc => {
                self.running = false;
                return None;
            }
            KeyCode::Tab => {
                self.cycle_focus();
                return None;
            }
            _ => {}
        }

        if self.is_processing {
            return None;
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::List => self.handle_list_key(key),
            Focus::Input => self.handle_input_key(key),
            Focus::Results => {
                self.handle_results_key(key);
                None
            }
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) -> Option<Action> {
        let index = Mode::ALL.iter().position(|m| *m == self.mode).unwrap_or(0);

        match key.code {
            KeyCode::Up => {
                self.set_mode(Mode::ALL[index.saturating_sub(1)]);
            }
            KeyCode::Down => {
                self.set_mode(Mode::ALL[(index + 1).min(Mode::ALL.len() - 1)]);
            }
            KeyCode::Enter | KeyCode::Right => {
                self.focus = match self.mode {
                    Mode::Home => Focus::Sidebar,
                    Mode::Explore => Focus::Input,
                    Mode::Analytics => Focus::List,
                };
            }
            _ => {}
        }

        None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        let last = self.analytics.len().saturating_sub(1);

        match key.code {
            KeyCode::Up => self.select(self.selected.saturating_sub(1)),
            KeyCode::Down => self.select((self.selected + 1).min(last)),
            KeyCode::PageUp => self.select(self.selected.saturating_sub(5)),
            KeyCode::PageDown => self.select((self.selected + 5).min(last)),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(last),
            KeyCode::Enter => return self.run_selected(),
            _ => {}
        }

        None
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Enter => {
                return match self.mode {
                    Mode::Explore => self.run_explore(),
                    Mode::Analytics => self.run_selected(),
                    Mode::Home => None,
                };
            }
            _ => {}
        }

        None
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.result_scroll = self.result_scroll.saturating_sub(1),
            KeyCode::Down => self.result_scroll = self.result_scroll.saturating_add(1),
            KeyCode::PageUp => {
                self.result_scroll = self.result_scroll.saturating_sub(RESULT_PAGE);
            }
            KeyCode::PageDown => {
                self.result_scroll = self.result_scroll.saturating_add(RESULT_PAGE);
            }
            KeyCode::Home => self.result_scroll = 0,
            KeyCode::End => self.result_scroll = usize::MAX,
            _ => {}
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.outcome = None;
            self.result_scroll = 0;
            self.notice = None;
        }
    }

    fn run_explore(&mut self) -> Option<Action> {
        if self.input.is_empty() {
            self.notice = Some("Enter a keyword to search book titles.".to_string());
            return None;
        }
        self.is_processing = true;
        Some(Action::Explore(self.input.text.clone()))
    }

    fn run_selected(&mut self) -> Option<Action> {
        let item = self.selected_analytic()?.clone();

        let keyword = if item.requires_param {
            if self.input.is_empty() {
                self.notice = Some("This analytic needs a keyword.".to_string());
                self.focus = Focus::Input;
                return None;
            }
            Some(self.input.text.clone())
        } else {
            None
        };

        self.is_processing = true;
        Some(Action::RunAnalytic {
            number: item.number,
            keyword,
        })
    }
}
