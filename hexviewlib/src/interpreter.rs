//! The `interpreter` module turns key presses into view actions.
//!
//! [`CommandInterpreter`] is a small state machine in the style of vi: normal mode
//! browses, the input modes edit a prompt line, and the help overlay waits for any
//! key. Each input mode carries its own edit buffer. Handling a key never touches
//! the file; it only returns the [`Action`]s the caller should carry out.

use crate::commands::{Command, CommandParser, parse_address};
use crate::element::ElementWidth;
use crate::error::{PatternErrorKind, ViewerError};
use crate::frame::StatusMessage;
use crate::history::{HistoryStore, RecallDirection};
use crate::key::Key;
use crate::line_editor::LineEditor;
use crate::pattern::{Pattern, PatternKind};
use crate::search::Direction;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRow {
    Top,
    Middle,
    Bottom,
}

/// Side effect requested by a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor by whole elements
    MoveCursor(i64),
    /// Move the cursor by whole rows
    MoveRows(i64),
    /// Shift the view by rows
    Scroll(i64),
    Page(i64),
    /// Shift the view by single bytes
    Roll(i64),
    JumpTo(u64),
    GotoStart,
    GotoEnd,
    ScreenRow(ScreenRow),
    RowBegin,
    RowEnd,
    SetWidth(ElementWidth),
    ToggleEndianness,
    ToggleValues,
    ToggleSelection,
    /// Drop the selection and the match highlight
    ClearMarks,
    Search {
        pattern: Pattern,
        direction: Direction,
    },
    SetWrap(bool),
    Quit,
    Status(StatusMessage),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Editing a text or regex search
    InputPattern {
        direction: Direction,
        kind: PatternKind,
        line: LineEditor,
    },
    InputHexPattern {
        direction: Direction,
        line: LineEditor,
    },
    InputAddress {
        line: LineEditor,
    },
    /// Editing a `:` command line
    InputCommand {
        line: LineEditor,
    },
    /// Help text on a topic (the index if `None`)
    HelpOverlay {
        topic: Option<String>,
    },
}

impl Mode {
    /// Name shown in the status line
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::InputPattern {
                kind: PatternKind::Regex,
                ..
            } => "REGEX SEARCH",
            Self::InputPattern { .. } => "SEARCH",
            Self::InputHexPattern { .. } => "HEX SEARCH",
            Self::InputAddress { .. } => "JUMP",
            Self::InputCommand { .. } => "COMMAND",
            Self::HelpOverlay { .. } => "HELP",
        }
    }

    /// Prompt printed before the edit buffer
    #[must_use]
    pub const fn prompt(&self) -> Option<&'static str> {
        use Direction::{Backward, Forward};
        Some(match self {
            Self::InputPattern {
                direction: Forward,
                kind: PatternKind::Regex,
                ..
            } => "r/",
            Self::InputPattern {
                direction: Backward,
                kind: PatternKind::Regex,
                ..
            } => "r?",
            Self::InputPattern {
                direction: Forward,
                ..
            } => "/",
            Self::InputPattern {
                direction: Backward,
                ..
            } => "?",
            Self::InputHexPattern {
                direction: Forward,
                ..
            } => "x/",
            Self::InputHexPattern {
                direction: Backward,
                ..
            } => "x?",
            Self::InputAddress { .. } => "@",
            Self::InputCommand { .. } => ":",
            Self::Normal | Self::HelpOverlay { .. } => return None,
        })
    }

    #[must_use]
    pub const fn line(&self) -> Option<&LineEditor> {
        match self {
            Self::InputPattern { line, .. }
            | Self::InputHexPattern { line, .. }
            | Self::InputAddress { line }
            | Self::InputCommand { line } => Some(line),
            Self::Normal | Self::HelpOverlay { .. } => None,
        }
    }

    const fn line_mut(&mut self) -> Option<&mut LineEditor> {
        match self {
            Self::InputPattern { line, .. }
            | Self::InputHexPattern { line, .. }
            | Self::InputAddress { line }
            | Self::InputCommand { line } => Some(line),
            Self::Normal | Self::HelpOverlay { .. } => None,
        }
    }

    /// Pattern kind being edited, if any
    const fn pattern_kind(&self) -> Option<PatternKind> {
        match self {
            Self::InputPattern { kind, .. } => Some(*kind),
            Self::InputHexPattern { .. } => Some(PatternKind::Hex),
            _ => None,
        }
    }
}

/// Modal key handler with search and address histories
#[derive(Debug)]
pub struct CommandInterpreter {
    mode: Mode,
    patterns: HistoryStore<Pattern>,
    addresses: HistoryStore<u64>,
    last_search: Option<(Pattern, Direction)>,
}

impl CommandInterpreter {
    #[must_use]
    pub fn new(history_capacity: usize) -> Self {
        Self {
            mode: Mode::Normal,
            patterns: HistoryStore::new(history_capacity),
            addresses: HistoryStore::new(history_capacity),
            last_search: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    #[must_use]
    pub const fn pattern_history(&self) -> &HistoryStore<Pattern> {
        &self.patterns
    }

    #[must_use]
    pub const fn address_history(&self) -> &HistoryStore<u64> {
        &self.addresses
    }

    /// Last submitted search and its direction
    #[must_use]
    pub const fn last_search(&self) -> Option<&(Pattern, Direction)> {
        self.last_search.as_ref()
    }

    /// Process one key and return the resulting actions in order
    pub fn handle_key(&mut self, key: Key) -> Vec<Action> {
        let mut actions = Vec::new();
        let before = self.mode.label();

        let mode = std::mem::take(&mut self.mode);
        self.mode = match mode {
            Mode::Normal => self.normal(key, &mut actions),
            Mode::HelpOverlay { .. } => Mode::Normal,
            input => self.input(input, key, &mut actions),
        };

        if self.mode.label() != before {
            debug!(from = before, to = self.mode.label(), ?key, "mode changed");
        }
        actions
    }

    fn enter_input(&mut self, mode: Mode) -> Mode {
        self.patterns.reset_cursor();
        self.addresses.reset_cursor();
        mode
    }

    fn normal(&mut self, key: Key, actions: &mut Vec<Action>) -> Mode {
        let action = match key {
            Key::Char('/') | Key::Ctrl('f') => return self.search_prompt(Direction::Forward, PatternKind::Text),
            Key::Char('?') => return self.search_prompt(Direction::Backward, PatternKind::Text),
            Key::Char('r') => return self.search_prompt(Direction::Forward, PatternKind::Regex),
            Key::Char('R') => return self.search_prompt(Direction::Backward, PatternKind::Regex),
            Key::Char('x') => return self.search_prompt(Direction::Forward, PatternKind::Hex),
            Key::Char('X') => return self.search_prompt(Direction::Backward, PatternKind::Hex),
            Key::Char('@') => {
                return self.enter_input(Mode::InputAddress {
                    line: LineEditor::default(),
                });
            }
            Key::Char(':') => {
                return self.enter_input(Mode::InputCommand {
                    line: LineEditor::default(),
                });
            }

            Key::Char(ch @ ('1' | '2' | '4' | '8')) => match ElementWidth::from_key(ch) {
                Some(width) => Action::SetWidth(width),
                None => return Mode::Normal,
            },
            Key::Char('p') => Action::ToggleValues,
            Key::Char('e') => Action::ToggleEndianness,
            Key::Char('v') | Key::Ctrl('v') => Action::ToggleSelection,
            Key::Escape => Action::ClearMarks,

            Key::Left | Key::Char('h') => Action::MoveCursor(-1),
            Key::Right | Key::Char('l') => Action::MoveCursor(1),
            Key::Up | Key::Char('k') => Action::MoveRows(-1),
            Key::Down | Key::Char('j') => Action::MoveRows(1),
            Key::PageUp => Action::Page(-1),
            Key::PageDown => Action::Page(1),
            Key::Ctrl('e') => Action::Scroll(1),
            Key::Ctrl('y') => Action::Scroll(-1),
            Key::Home | Key::Char('g') => Action::GotoStart,
            Key::End | Key::Char('G') => Action::GotoEnd,
            Key::Char('H') => Action::ScreenRow(ScreenRow::Top),
            Key::Char('M') => Action::ScreenRow(ScreenRow::Middle),
            Key::Char('L') => Action::ScreenRow(ScreenRow::Bottom),
            Key::Char('0' | '^') => Action::RowBegin,
            Key::Char('$') => Action::RowEnd,
            Key::Char('<' | ',') => Action::Roll(-1),
            Key::Char('>' | '.') => Action::Roll(1),

            Key::Char('n') | Key::Ctrl('g') => self.repeat_search(false),
            Key::Char('N') => self.repeat_search(true),

            Key::Char('q') => Action::Quit,
            Key::Abort => Action::Status(StatusMessage::info("Type :q to quit")),
            _ => return Mode::Normal,
        };
        actions.push(action);
        Mode::Normal
    }

    fn search_prompt(&mut self, direction: Direction, kind: PatternKind) -> Mode {
        let line = LineEditor::default();
        let mode = match kind {
            PatternKind::Hex => Mode::InputHexPattern { direction, line },
            PatternKind::Text | PatternKind::Regex => Mode::InputPattern {
                direction,
                kind,
                line,
            },
        };
        self.enter_input(mode)
    }

    fn repeat_search(&self, reverse: bool) -> Action {
        match &self.last_search {
            Some((pattern, direction)) => Action::Search {
                pattern: pattern.clone(),
                direction: if reverse {
                    direction.reversed()
                } else {
                    *direction
                },
            },
            None => Action::Status(StatusMessage::error("No previous search pattern")),
        }
    }

    fn input(&mut self, mut mode: Mode, key: Key, actions: &mut Vec<Action>) -> Mode {
        if key.is_navigation() {
            return self.normal(key, actions);
        }

        match key {
            Key::Escape | Key::Abort => return Mode::Normal,
            Key::Enter => return self.submit(mode, actions),
            Key::Up => self.recall(&mut mode, RecallDirection::Older),
            Key::Down => self.recall(&mut mode, RecallDirection::Newer),
            _ => {}
        }

        let Some(line) = mode.line_mut() else {
            return mode;
        };
        match key {
            Key::Backspace => {
                if !line.backspace() && line.is_empty() {
                    return Mode::Normal;
                }
            }
            Key::Delete => line.delete(),
            Key::Left => line.left(),
            Key::Right => line.right(),
            Key::Ctrl('a') => line.home(),
            Key::Ctrl('e') => line.end(),
            Key::Ctrl('u') => line.clear(),
            Key::Char(ch) => line.insert(ch),
            _ => {}
        }
        mode
    }

    fn recall(&mut self, mode: &mut Mode, direction: RecallDirection) {
        let text = if let Some(kind) = mode.pattern_kind() {
            self.patterns
                .recall(direction)
                .map(|pattern| recall_text(pattern, kind))
        } else if matches!(mode, Mode::InputAddress { .. }) {
            self.addresses
                .recall(direction)
                .map(|addr| format!("{addr:X}"))
        } else {
            None
        };

        if let (Some(text), Some(line)) = (text, mode.line_mut()) {
            line.set(&text);
        }
    }

    fn submit(&mut self, mode: Mode, actions: &mut Vec<Action>) -> Mode {
        let Some(text) = mode.line().map(|l| l.text().to_string()) else {
            return Mode::Normal;
        };
        if text.trim().is_empty() {
            return Mode::Normal;
        }

        match &mode {
            Mode::InputPattern { direction, .. } | Mode::InputHexPattern { direction, .. } => {
                let kind = mode.pattern_kind().unwrap_or(PatternKind::Text);
                match Pattern::parse(kind, &text) {
                    Ok(pattern) => {
                        self.patterns.push(pattern.clone());
                        self.last_search = Some((pattern.clone(), *direction));
                        actions.push(Action::Search {
                            pattern,
                            direction: *direction,
                        });
                        Mode::Normal
                    }
                    Err(err) => {
                        // Stay in the prompt so the input can be corrected
                        actions.push(malformed(err));
                        mode
                    }
                }
            }
            Mode::InputAddress { .. } => match parse_address(&text) {
                Ok(addr) => {
                    self.addresses.push(addr);
                    actions.push(Action::JumpTo(addr));
                    Mode::Normal
                }
                Err(err) => {
                    actions.push(malformed(err));
                    mode
                }
            },
            Mode::InputCommand { .. } => self.execute(&text, actions),
            Mode::Normal | Mode::HelpOverlay { .. } => Mode::Normal,
        }
    }

    fn execute(&mut self, text: &str, actions: &mut Vec<Action>) -> Mode {
        match CommandParser::parse(text) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => actions.push(Action::Quit),
            Ok(Some(Command::Help(topic))) => return Mode::HelpOverlay { topic },
            Ok(Some(Command::SetWrap(wrap))) => {
                actions.push(Action::SetWrap(wrap));
                let msg = if wrap { "wrapscan" } else { "nowrapscan" };
                actions.push(Action::Status(StatusMessage::info(msg)));
            }
            Ok(Some(Command::Jump(addr))) => {
                self.addresses.push(addr);
                actions.push(Action::JumpTo(addr));
            }
            Err(err) => actions.push(Action::Status(StatusMessage::error(err.to_string()))),
        }
        Mode::Normal
    }
}

/// Render a past pattern for editing in a prompt of another kind
fn recall_text(pattern: &Pattern, kind: PatternKind) -> String {
    match (pattern, kind) {
        (Pattern::Text(text), PatternKind::Hex) => Pattern::Hex(text.as_bytes().to_vec()).source(),
        (Pattern::Hex(bytes), PatternKind::Text | PatternKind::Regex) => {
            std::str::from_utf8(bytes).map_or_else(|_| pattern.source(), str::to_string)
        }
        _ => pattern.source(),
    }
}

/// Status report for input that did not parse
fn malformed(kind: PatternErrorKind) -> Action {
    Action::Status(StatusMessage::error(ViewerError::from(kind).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Severity;

    fn type_str(interp: &mut CommandInterpreter, text: &str) -> Vec<Action> {
        text.chars()
            .flat_map(|ch| interp.handle_key(Key::Char(ch)))
            .collect()
    }

    #[test]
    fn test_text_search_submit() {
        // Arrange
        let mut interp = CommandInterpreter::new(8);

        // Act
        type_str(&mut interp, "/Hi");
        let actions = interp.handle_key(Key::Enter);

        // Assert
        assert_eq!(
            actions,
            vec![Action::Search {
                pattern: Pattern::Text("Hi".to_string()),
                direction: Direction::Forward,
            }]
        );
        assert_eq!(interp.mode(), &Mode::Normal);
        assert_eq!(interp.pattern_history().len(), 1);
    }

    #[test]
    fn test_malformed_hex_stays_in_input() {
        // Arrange
        let mut interp = CommandInterpreter::new(8);
        type_str(&mut interp, "x486");

        // Act
        let actions = interp.handle_key(Key::Enter);

        // Assert
        assert_eq!(
            actions,
            vec![Action::Status(StatusMessage::error(
                "Hex pattern has an odd number of digits (3)"
            ))]
        );
        assert!(matches!(interp.mode(), Mode::InputHexPattern { line, .. } if line.text() == "486"));
        assert!(interp.pattern_history().is_empty());

        // Fix the input and submit again
        type_str(&mut interp, "9");
        let actions = interp.handle_key(Key::Enter);
        assert_eq!(
            actions,
            vec![Action::Search {
                pattern: Pattern::Hex(vec![0x48, 0x69]),
                direction: Direction::Forward,
            }]
        );
    }

    #[test]
    fn test_empty_input_returns_to_normal() {
        let mut interp = CommandInterpreter::new(8);
        interp.handle_key(Key::Char('/'));
        assert!(interp.handle_key(Key::Enter).is_empty());
        assert_eq!(interp.mode(), &Mode::Normal);
    }

    #[test]
    fn test_navigation_key_cancels_input() {
        // Arrange
        let mut interp = CommandInterpreter::new(8);
        type_str(&mut interp, "@12");

        // Act
        let actions = interp.handle_key(Key::PageDown);

        // Assert: input discarded, key handled in normal mode
        assert_eq!(actions, vec![Action::Page(1)]);
        assert_eq!(interp.mode(), &Mode::Normal);
    }

    #[test]
    fn test_escape_and_abort_cancel_input() {
        let mut interp = CommandInterpreter::new(8);
        type_str(&mut interp, "?abc");
        assert!(interp.handle_key(Key::Escape).is_empty());
        assert_eq!(interp.mode(), &Mode::Normal);

        type_str(&mut interp, ":q");
        assert!(interp.handle_key(Key::Abort).is_empty());
        assert_eq!(interp.mode(), &Mode::Normal);
    }

    #[test]
    fn test_backspace_on_empty_line_cancels() {
        let mut interp = CommandInterpreter::new(8);
        type_str(&mut interp, "/a");
        interp.handle_key(Key::Backspace);
        assert!(matches!(interp.mode(), Mode::InputPattern { .. }));
        interp.handle_key(Key::Backspace);
        assert_eq!(interp.mode(), &Mode::Normal);
    }

    #[test]
    fn test_history_recall_in_prompt() {
        // Arrange
        let mut interp = CommandInterpreter::new(8);
        type_str(&mut interp, "/first");
        interp.handle_key(Key::Enter);
        type_str(&mut interp, "/second");
        interp.handle_key(Key::Enter);

        // Act
        interp.handle_key(Key::Char('/'));
        interp.handle_key(Key::Up);
        interp.handle_key(Key::Up);
        interp.handle_key(Key::Up);

        // Assert: stopped at the oldest entry, same state
        assert!(matches!(interp.mode(), Mode::InputPattern { line, .. } if line.text() == "first"));

        interp.handle_key(Key::Down);
        assert_eq!(interp.mode().line().map(LineEditor::text), Some("second"));
        interp.handle_key(Key::Down);
        assert_eq!(interp.mode().line().map(LineEditor::text), Some("second"));
    }

    #[test]
    fn test_text_history_recalled_as_hex() {
        let mut interp = CommandInterpreter::new(8);
        type_str(&mut interp, "/Hi");
        interp.handle_key(Key::Enter);

        interp.handle_key(Key::Char('x'));
        interp.handle_key(Key::Up);

        assert_eq!(interp.mode().line().map(LineEditor::text), Some("48 69"));
    }

    #[test]
    fn test_address_jump_and_history() {
        // Arrange
        let mut interp = CommandInterpreter::new(8);

        // Act
        type_str(&mut interp, "@0x1F00");
        let actions = interp.handle_key(Key::Enter);

        // Assert
        assert_eq!(actions, vec![Action::JumpTo(0x1F00)]);
        interp.handle_key(Key::Char('@'));
        interp.handle_key(Key::Up);
        assert_eq!(interp.mode().line().map(LineEditor::text), Some("1F00"));
    }

    #[test]
    fn test_invalid_address_reports_and_stays() {
        let mut interp = CommandInterpreter::new(8);
        type_str(&mut interp, "@zz");

        let actions = interp.handle_key(Key::Enter);

        assert!(matches!(
            actions.as_slice(),
            [Action::Status(StatusMessage { severity: Severity::Error, .. })]
        ));
        assert!(matches!(interp.mode(), Mode::InputAddress { .. }));
    }

    #[test]
    fn test_repeat_search() {
        // Arrange
        let mut interp = CommandInterpreter::new(8);
        assert!(matches!(
            interp.handle_key(Key::Char('n')).as_slice(),
            [Action::Status(_)]
        ));
        type_str(&mut interp, "?ab");
        interp.handle_key(Key::Enter);

        // Act
        let again = interp.handle_key(Key::Char('n'));
        let reverse = interp.handle_key(Key::Char('N'));

        // Assert
        let pattern = Pattern::Text("ab".to_string());
        assert_eq!(
            again,
            vec![Action::Search {
                pattern: pattern.clone(),
                direction: Direction::Backward
            }]
        );
        assert_eq!(
            reverse,
            vec![Action::Search {
                pattern,
                direction: Direction::Forward
            }]
        );
    }

    #[test]
    fn test_help_overlay_any_key_returns() {
        let mut interp = CommandInterpreter::new(8);
        type_str(&mut interp, ":help search");
        interp.handle_key(Key::Enter);
        assert_eq!(
            interp.mode(),
            &Mode::HelpOverlay {
                topic: Some("search".to_string())
            }
        );

        assert!(interp.handle_key(Key::Char('j')).is_empty());
        assert_eq!(interp.mode(), &Mode::Normal);
    }

    #[test]
    fn test_command_line() {
        let mut interp = CommandInterpreter::new(8);

        type_str(&mut interp, ":set nowrap");
        let actions = interp.handle_key(Key::Enter);
        assert_eq!(actions[0], Action::SetWrap(false));

        type_str(&mut interp, ":q");
        assert_eq!(interp.handle_key(Key::Enter), vec![Action::Quit]);

        type_str(&mut interp, ":bogus");
        let actions = interp.handle_key(Key::Enter);
        assert!(matches!(actions.as_slice(), [Action::Status(_)]));
        assert_eq!(interp.mode(), &Mode::Normal);
    }

    #[test]
    fn test_normal_mode_keys() {
        let mut interp = CommandInterpreter::new(8);
        let cases = [
            (Key::Char('2'), Action::SetWidth(ElementWidth::Word)),
            (Key::Char('8'), Action::SetWidth(ElementWidth::Quad)),
            (Key::Char('p'), Action::ToggleValues),
            (Key::Down, Action::MoveRows(1)),
            (Key::Char('h'), Action::MoveCursor(-1)),
            (Key::Char('G'), Action::GotoEnd),
            (Key::Char('M'), Action::ScreenRow(ScreenRow::Middle)),
            (Key::Char('>'), Action::Roll(1)),
            (Key::Char('q'), Action::Quit),
        ];
        for (key, expected) in cases {
            assert_eq!(interp.handle_key(key), vec![expected], "{key:?}");
        }
        assert!(interp.handle_key(Key::Char('3')).is_empty());
    }

    #[test]
    fn test_mode_labels_and_prompts() {
        let mut interp = CommandInterpreter::new(8);
        interp.handle_key(Key::Char('R'));
        assert_eq!(interp.mode().label(), "REGEX SEARCH");
        assert_eq!(interp.mode().prompt(), Some("r?"));
        interp.handle_key(Key::Escape);
        assert_eq!(interp.mode().prompt(), None);
    }
}
