use crate::theme::Theme;
use hexviewlib::ValueRow;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Binary digits shown per line
const BIN_CHUNK: usize = 16;

fn value_lines<'a>(values: &'a [ValueRow], theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(values.len() + 4);

    if values.is_empty() {
        lines.push(Line::from(Span::styled("--", theme.label)));
        return lines;
    }

    for row in values {
        if row.label == "bin" {
            // Long binary strings are split over several lines
            for (i, chunk) in row.value.as_bytes().chunks(BIN_CHUNK).enumerate() {
                let label = if i == 0 { "bin" } else { "" };
                lines.push(Line::from(vec![
                    Span::styled(format!("{label:<4}"), theme.label),
                    Span::styled(String::from_utf8_lossy(chunk).into_owned(), theme.cell),
                ]));
            }
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<4}", row.label), theme.label),
                Span::styled(row.value.as_str(), theme.cell),
            ]));
        }
    }
    lines
}

/// Values sub-window: the element under the cursor decoded as numbers
pub fn draw_values(f: &mut ratatui::Frame, area: Rect, values: &[ValueRow], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title("Values");

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(value_lines(values, theme)).block(block), area);
}
