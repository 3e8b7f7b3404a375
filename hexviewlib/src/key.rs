/// A decoded key press, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character, already shifted
    Char(char),
    /// Control chord, lowercase letter
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    /// Designated abort key (Ctrl-C). Interrupts searches and cancels input.
    Abort,
}

impl Key {
    /// Keys that leave an input line and are then handled in normal mode
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(self, Self::PageUp | Self::PageDown | Self::Home | Self::End)
    }

    /// Keys that stop a running search
    #[must_use]
    pub const fn interrupts_search(self) -> bool {
        matches!(self, Self::Abort | Self::Escape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_classes() {
        assert!(Key::PageDown.is_navigation());
        assert!(!Key::Up.is_navigation());
        assert!(!Key::Char('j').is_navigation());
        assert!(Key::Abort.interrupts_search());
        assert!(Key::Escape.interrupts_search());
        assert!(!Key::Enter.interrupts_search());
    }
}
