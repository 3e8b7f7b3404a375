use crate::help;
use crate::theme::Theme;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Rectangle of `percent_x` by `percent_y` centered in `area`
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Help text popup over the grid. Any key closes it.
pub fn draw_help(f: &mut ratatui::Frame, area: Rect, topic: Option<&str>, theme: &Theme) {
    let (title, text) = help::lookup(topic);
    let popup = centered(area, 80, 90);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(title);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text)
            .style(theme.cell)
            .wrap(Wrap { trim: false })
            .block(block),
        popup,
    );
}
