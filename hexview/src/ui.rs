use crate::theme::Theme;
use crate::{ui_help, ui_hexgrid, ui_inspector, ui_statusbar};
use hexviewlib::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the values sub-window, borders included
const VALUES_WIDTH: u16 = 34;

/// Lines below the grid: status bar and prompt/message line
const BOTTOM_LINES: u16 = 2;

/// Grid rows available in a terminal of `height` lines
pub fn grid_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(BOTTOM_LINES).max(1))
}

/// Draw one viewer frame onto the terminal
pub fn draw(f: &mut ratatui::Frame, frame: &Frame, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Grid and values
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Prompt or message
        ])
        .split(f.area());

    let body = chunks[0];
    let (grid_area, values_area) = split_body(body, frame.values.is_some());

    ui_hexgrid::draw_grid(f, grid_area, frame, theme);
    if let (Some(values), Some(area)) = (&frame.values, values_area) {
        ui_inspector::draw_values(f, area, values, theme);
    }

    ui_statusbar::draw_status(f, chunks[1], &frame.status, theme);
    ui_statusbar::draw_bottom_line(f, chunks[2], frame, theme);

    if let Some(topic) = &frame.help {
        ui_help::draw_help(f, body, topic.as_deref(), theme);
    }
}

fn split_body(body: Rect, with_values: bool) -> (Rect, Option<Rect>) {
    if !with_values || body.width <= VALUES_WIDTH {
        return (body, None);
    }
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(VALUES_WIDTH)])
        .split(body);
    (cols[0], Some(cols[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexviewlib::{Config, Key, MemorySource, NoInterrupt, Viewer};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(viewer: &Viewer<MemorySource>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::new(true);
        let frame = viewer.frame();
        terminal.draw(|f| draw(f, &frame, &theme)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn viewer(data: &[u8], rows: usize) -> Viewer<MemorySource> {
        let mut viewer =
            Viewer::new(MemorySource::new(data.to_vec()), "t.bin", &Config::default()).unwrap();
        viewer.resize(rows);
        viewer
    }

    #[test]
    fn test_grid_rows() {
        assert_eq!(grid_rows(24), 22);
        assert_eq!(grid_rows(1), 1);
    }

    #[test]
    fn test_render_grid_and_status() {
        // Arrange
        let viewer = viewer(b"Hello, hex viewer!", 4);

        // Act
        let screen = render(&viewer, 100, 6);

        // Assert
        assert!(screen.contains("00000000"));
        assert!(screen.contains("48 65 6C 6C 6F"));
        assert!(screen.contains("Hello, hex viewe"));
        assert!(screen.contains("NORMAL"));
        assert!(screen.contains("t.bin"));
    }

    #[test]
    fn test_render_prompt_values_and_help() {
        let mut viewer = viewer(&[0x01, 0x02, 0x03, 0x04], 4);
        viewer.handle_key(Key::Char('p'), &mut NoInterrupt);
        for ch in "/abc".chars() {
            viewer.handle_key(Key::Char(ch), &mut NoInterrupt);
        }

        let screen = render(&viewer, 120, 12);
        assert!(screen.contains("/abc"));
        assert!(screen.contains("Values"));
        assert!(screen.contains("u32"));

        viewer.handle_key(Key::Escape, &mut NoInterrupt);
        for ch in ":help keys".chars() {
            viewer.handle_key(Key::Char(ch), &mut NoInterrupt);
        }
        viewer.handle_key(Key::Enter, &mut NoInterrupt);
        let screen = render(&viewer, 120, 30);
        assert!(screen.contains("Help: keys"));
    }
}
