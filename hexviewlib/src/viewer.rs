//! The `viewer` module ties the engine together into one viewing session.
//!
//! A [`Viewer`] owns the byte source, the view window, the search engine and the
//! command interpreter. The front end feeds it keys and renders the [`Frame`] it
//! produces; everything in between happens here.

use crate::config::Config;
use crate::error::ViewerError;
use crate::frame::{Frame, Prompt, StatusLine, StatusMessage, build_rows};
use crate::inspect::decode_values;
use crate::interpreter::{Action, CommandInterpreter, Mode, ScreenRow};
use crate::key::Key;
use crate::pattern::Pattern;
use crate::search::{Direction, Interrupt, SearchEngine, SearchOutcome};
use crate::source::ByteSource;
use crate::window::ViewWindow;
use tracing::{info, warn};

/// Whether the session goes on after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Viewer<S> {
    source: S,
    file_name: String,
    view: ViewWindow,
    engine: SearchEngine,
    interpreter: CommandInterpreter,
    wrap: bool,
    /// Half-open range of the last match
    highlight: Option<(u64, u64)>,
    message: Option<StatusMessage>,
}

impl<S: ByteSource> Viewer<S> {
    /// Start a session over `source`, named `file_name` in the status line.
    ///
    /// # Errors
    /// Returns [`ViewerError::InvalidConfig`] if `config` does not validate.
    pub fn new(source: S, file_name: impl Into<String>, config: &Config) -> Result<Self, ViewerError> {
        config.validate()?;
        let view = ViewWindow::new(source.size(), config);
        Ok(Self {
            source,
            file_name: file_name.into(),
            view,
            engine: SearchEngine::new(config),
            interpreter: CommandInterpreter::new(config.history_capacity),
            wrap: config.wrap_search,
            highlight: None,
            message: None,
        })
    }

    #[must_use]
    pub const fn view(&self) -> &ViewWindow {
        &self.view
    }

    #[must_use]
    pub const fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    #[must_use]
    pub const fn highlight(&self) -> Option<(u64, u64)> {
        self.highlight
    }

    #[must_use]
    pub const fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    #[must_use]
    pub const fn wrap(&self) -> bool {
        self.wrap
    }

    /// Set the viewport height in grid rows and reload the visible bytes
    pub fn resize(&mut self, rows: usize) {
        self.view.resize(rows);
        self.materialize();
    }

    /// Process one key press. Long searches poll `interrupt` once per chunk.
    pub fn handle_key<I: Interrupt + ?Sized>(&mut self, key: Key, interrupt: &mut I) -> Flow {
        // A message lives until the next key
        self.message = None;

        for action in self.interpreter.handle_key(key) {
            if self.apply(action, interrupt) == Flow::Quit {
                info!("quit requested");
                return Flow::Quit;
            }
        }

        self.materialize();
        Flow::Continue
    }

    fn materialize(&mut self) {
        if let Err(err) = self.view.ensure_materialized(&mut self.source) {
            self.report(StatusMessage::error(err.to_string()));
        }
    }

    fn report(&mut self, message: StatusMessage) {
        if message.severity == crate::frame::Severity::Error {
            warn!(message = %message.text, "status error");
        }
        self.message = Some(message);
    }

    /// Carry out one interpreter action
    pub fn apply<I: Interrupt + ?Sized>(&mut self, action: Action, interrupt: &mut I) -> Flow {
        let view = &mut self.view;
        match action {
            Action::MoveCursor(n) => view.move_cursor(n),
            Action::MoveRows(n) => {
                let cols = i64::try_from(view.cols()).unwrap_or(1);
                view.move_cursor(n.saturating_mul(cols));
            }
            Action::Scroll(n) => view.scroll(n),
            Action::Page(n) => view.page(n),
            Action::Roll(n) => view.roll(n),
            Action::JumpTo(addr) => view.jump_to(addr),
            Action::GotoStart => view.goto_start(),
            Action::GotoEnd => view.goto_end(),
            Action::ScreenRow(which) => {
                let last = view.displayed_rows().saturating_sub(1);
                view.screen_row(match which {
                    ScreenRow::Top => 0,
                    ScreenRow::Middle => last / 2,
                    ScreenRow::Bottom => last,
                });
            }
            Action::RowBegin => view.row_begin(),
            Action::RowEnd => view.row_end(),
            Action::SetWidth(width) => view.set_width(width),
            Action::ToggleEndianness => {
                let state = view.state_mut();
                state.endianness = state.endianness.toggled();
            }
            Action::ToggleValues => {
                let state = view.state_mut();
                state.show_values_subwindow = !state.show_values_subwindow;
            }
            Action::ToggleSelection => view.toggle_selection(),
            Action::ClearMarks => {
                view.state_mut().selection_anchor = None;
                self.highlight = None;
            }
            Action::Search { pattern, direction } => self.search(&pattern, direction, interrupt),
            Action::SetWrap(wrap) => self.wrap = wrap,
            Action::Quit => return Flow::Quit,
            Action::Status(message) => self.report(message),
        }
        Flow::Continue
    }

    /// Search from the cursor and move to the match. Forward searches start one
    /// byte past the cursor so repeating a search advances.
    fn search<I: Interrupt + ?Sized>(&mut self, pattern: &Pattern, direction: Direction, interrupt: &mut I) {
        let cursor = self.view.cursor();
        let from = match direction {
            Direction::Forward => cursor.saturating_add(1).min(self.view.size()),
            Direction::Backward => cursor,
        };

        let outcome = self.engine.find(
            &mut self.source,
            pattern,
            from,
            direction,
            self.wrap,
            interrupt,
        );

        match outcome {
            Ok(SearchOutcome::Found { offset, len, wrapped }) => {
                let (top, bottom) = (self.view.top(), self.view.top() + self.view.page_bytes());
                if (top..bottom).contains(&offset) {
                    self.view.set_cursor(offset);
                } else {
                    self.view.jump_to(offset);
                }
                self.highlight = Some((offset, offset + len as u64));
                if wrapped {
                    self.report(StatusMessage::warning(match direction {
                        Direction::Forward => "search hit BOTTOM, continuing at TOP",
                        Direction::Backward => "search hit TOP, continuing at BOTTOM",
                    }));
                }
            }
            Ok(SearchOutcome::NotFound) => {
                self.report(StatusMessage::error(format!(
                    "Pattern not found: {}",
                    pattern.source()
                )));
            }
            Ok(SearchOutcome::Cancelled) => self.report(StatusMessage::warning("Search cancelled")),
            Err(err) => self.report(StatusMessage::error(err.to_string())),
        }
    }

    /// Describe the current screen
    #[must_use]
    pub fn frame(&self) -> Frame {
        let state = self.view.state();
        let size = self.view.size();
        let mode = self.interpreter.mode();

        let selection_len = self
            .view
            .selection()
            .map(|(lo, hi)| (hi + 1).min(size).saturating_sub(lo));

        let prompt = mode.prompt().zip(mode.line()).map(|(prompt, line)| Prompt {
            prompt,
            text: line.text().to_string(),
            cursor: line.cursor(),
        });

        let values = state.show_values_subwindow.then(|| {
            let window = self.view.materialized();
            let bytes: Vec<u8> = (state.current_address..state.current_address.saturating_add(8))
                .map_while(|a| window.get(a))
                .collect();
            decode_values(&bytes, state.element_width, state.endianness)
        });

        let help = match mode {
            Mode::HelpOverlay { topic } => Some(topic.clone()),
            _ => None,
        };

        Frame {
            rows: build_rows(&self.view, self.highlight),
            status: StatusLine {
                file_name: self.file_name.clone(),
                cursor: state.current_address,
                size,
                width: state.element_width,
                endianness: state.endianness,
                mode: mode.label(),
                wrap: self.wrap,
                selection_len,
                message: self.message.clone(),
            },
            prompt,
            values,
            help,
            color_enabled: state.color_enabled,
        }
    }
}
