use hexviewlib::Severity;
use ratatui::style::{Modifier, Style};

pub mod colors {
    use ratatui::style::Color;

    pub const LIGHT_BLUE: Color = Color::Rgb(33, 81, 109);
    pub const MUD: Color = Color::Rgb(94, 78, 33);
    pub const GREEN: Color = Color::Rgb(35, 83, 48);
    pub const GRAY_90: Color = Color::Rgb(90, 90, 90);
    pub const GRAY_160: Color = Color::Rgb(160, 160, 160);
    pub const GRAY_210: Color = Color::Rgb(210, 210, 210);
    pub const STATUS_BG: Color = Color::Rgb(40, 40, 48);
    pub const ERROR: Color = Color::Rgb(230, 90, 80);
    pub const WARNING: Color = Color::Rgb(230, 190, 80);
}

/// Styles for every element of the screen
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub address: Style,
    pub cell: Style,
    pub past_eof: Style,
    pub cursor: Style,
    pub selected: Style,
    pub matched: Style,
    pub printable: Style,
    pub unprintable: Style,
    pub status: Style,
    pub mode: Style,
    pub info: Style,
    pub warning: Style,
    pub error: Style,
    pub prompt: Style,
    pub border: Style,
    pub label: Style,
}

impl Theme {
    pub fn new(color_enabled: bool) -> Self {
        if color_enabled {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    fn colored() -> Self {
        Self {
            address: Style::new().fg(colors::GRAY_160),
            cell: Style::new().fg(colors::GRAY_210),
            past_eof: Style::new().fg(colors::GRAY_90),
            cursor: Style::new().add_modifier(Modifier::REVERSED),
            selected: Style::new().bg(colors::LIGHT_BLUE),
            matched: Style::new().bg(colors::MUD),
            printable: Style::new().fg(colors::GRAY_210),
            unprintable: Style::new().fg(colors::GRAY_90),
            status: Style::new().fg(colors::GRAY_210).bg(colors::STATUS_BG),
            mode: Style::new()
                .fg(colors::GRAY_210)
                .bg(colors::GREEN)
                .add_modifier(Modifier::BOLD),
            info: Style::new().fg(colors::GRAY_210),
            warning: Style::new().fg(colors::WARNING),
            error: Style::new().fg(colors::ERROR).add_modifier(Modifier::BOLD),
            prompt: Style::new().fg(colors::GRAY_210),
            border: Style::new().fg(colors::GRAY_160),
            label: Style::new().fg(colors::GRAY_160),
        }
    }

    /// Monochrome: only text attributes, no colors
    fn plain() -> Self {
        let none = Style::new();
        Self {
            address: none,
            cell: none,
            past_eof: none,
            cursor: none.add_modifier(Modifier::REVERSED),
            selected: none.add_modifier(Modifier::BOLD),
            matched: none.add_modifier(Modifier::UNDERLINED),
            printable: none,
            unprintable: none.add_modifier(Modifier::DIM),
            status: none.add_modifier(Modifier::REVERSED),
            mode: none.add_modifier(Modifier::BOLD | Modifier::REVERSED),
            info: none,
            warning: none.add_modifier(Modifier::BOLD),
            error: none.add_modifier(Modifier::BOLD),
            prompt: none,
            border: none,
            label: none,
        }
    }

    pub const fn message(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }
}
