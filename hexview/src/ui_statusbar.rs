use crate::theme::Theme;
use hexviewlib::{Frame, StatusLine};
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

fn status_text(status: &StatusLine) -> String {
    let mut text = format!(
        " {}  0x{:X} / 0x{:X}  {} {}  {}",
        status.file_name,
        status.cursor,
        status.size,
        status.width.label(),
        status.endianness.label(),
        if status.wrap { "wrap" } else { "nowrap" },
    );
    if let Some(len) = status.selection_len {
        text.push_str(&format!("  sel {len}"));
    }
    text
}

/// Mode indicator followed by file, cursor and view settings
pub fn draw_status(f: &mut ratatui::Frame, area: Rect, status: &StatusLine, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(format!(" {} ", status.mode), theme.mode),
        Span::styled(status_text(status), theme.status),
    ]);
    f.render_widget(Paragraph::new(line).style(theme.status), area);
}

/// Prompt being edited, or else the last status message
pub fn draw_bottom_line(f: &mut ratatui::Frame, area: Rect, frame: &Frame, theme: &Theme) {
    if let Some(prompt) = &frame.prompt {
        let line = Line::from(vec![
            Span::styled(prompt.prompt, theme.prompt),
            Span::styled(prompt.text.clone(), theme.prompt),
        ]);
        f.render_widget(Paragraph::new(line), area);

        let offset = prompt.prompt.chars().count() + prompt.cursor;
        let x = area
            .x
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
            .min(area.right().saturating_sub(1));
        f.set_cursor_position(Position::new(x, area.y));
        return;
    }

    if let Some(message) = &frame.status.message {
        let span = Span::styled(message.text.clone(), theme.message(message.severity));
        f.render_widget(Paragraph::new(Line::from(span)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexviewlib::{ElementWidth, Endianness};

    #[test]
    fn test_status_text() {
        let status = StatusLine {
            file_name: "a.bin".to_string(),
            cursor: 0x10,
            size: 0x100,
            width: ElementWidth::Word,
            endianness: Endianness::Little,
            mode: "NORMAL",
            wrap: false,
            selection_len: Some(3),
            message: None,
        };

        assert_eq!(
            status_text(&status),
            " a.bin  0x10 / 0x100  words LE  nowrap  sel 3"
        );
    }
}
