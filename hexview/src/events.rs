use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hexviewlib::{Interrupt, Key};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;
use tracing::{debug, warn};

/// Terminal input relevant to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// New terminal size as (columns, rows)
    Resize(u16, u16),
}

/// Map a crossterm key press to a viewer key
pub fn decode_key(event: KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    Some(match event.code {
        KeyCode::Char('c') if ctrl => Key::Abort,
        KeyCode::Char(ch) if ctrl => Key::Ctrl(ch.to_ascii_lowercase()),
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        _ => return None,
    })
}

fn decode_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => decode_key(key).map(InputEvent::Key),
        Event::Resize(cols, rows) => Some(InputEvent::Resize(cols, rows)),
        _ => None,
    }
}

/// Reads terminal events in arrival order.
///
/// While a search runs, the source doubles as its [`Interrupt`]: pending events are
/// drained without blocking, an abort key stops the search, and everything else
/// is kept for after it.
#[derive(Debug, Default)]
pub struct EventSource {
    pending: VecDeque<InputEvent>,
}

impl EventSource {
    /// Next event, blocking until one arrives
    ///
    /// # Errors
    /// Returns the terminal's I/O error.
    pub fn next_event(&mut self) -> io::Result<InputEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(event);
        }
        loop {
            if let Some(event) = decode_event(event::read()?) {
                return Ok(event);
            }
        }
    }

    /// Queue an event decoded during a search. Returns true for an abort key.
    fn stash(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key(key) if key.interrupts_search() => {
                debug!(?key, "search interrupted by key");
                true
            }
            other => {
                self.pending.push_back(other);
                false
            }
        }
    }
}

impl Interrupt for EventSource {
    fn interrupted(&mut self) -> bool {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return false,
                Err(err) => {
                    warn!(%err, "input poll failed during search");
                    return false;
                }
            }
            match event::read() {
                Ok(event) => {
                    if decode_event(event).is_some_and(|event| self.stash(event)) {
                        return true;
                    }
                }
                Err(err) => {
                    warn!(%err, "input read failed during search");
                    return false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_decode_keys() {
        assert_eq!(decode_key(press(KeyCode::Char('x'), KeyModifiers::NONE)), Some(Key::Char('x')));
        assert_eq!(decode_key(press(KeyCode::Char('G'), KeyModifiers::SHIFT)), Some(Key::Char('G')));
        assert_eq!(decode_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Key::Abort));
        assert_eq!(decode_key(press(KeyCode::Char('F'), KeyModifiers::CONTROL)), Some(Key::Ctrl('f')));
        assert_eq!(decode_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Escape));
        assert_eq!(decode_key(press(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = press(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(decode_key(event), None);
    }

    #[test]
    fn test_stash_keeps_order_and_spots_abort() {
        // Arrange
        let mut source = EventSource::default();

        // Act
        let first = source.stash(InputEvent::Key(Key::Char('j')));
        let second = source.stash(InputEvent::Resize(80, 24));
        let abort = source.stash(InputEvent::Key(Key::Abort));

        // Assert
        assert!(!first && !second && abort);
        assert_eq!(source.next_event().unwrap(), InputEvent::Key(Key::Char('j')));
        assert_eq!(source.next_event().unwrap(), InputEvent::Resize(80, 24));
    }
}
