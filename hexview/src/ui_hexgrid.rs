use crate::theme::Theme;
use hexviewlib::{Cell, Frame, SidebarChar};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

/// Hex digits needed for the largest address, at least 8
fn address_digits(size: u64) -> usize {
    let bits = u64::BITS - size.leading_zeros();
    (bits.div_ceil(4) as usize).max(8)
}

fn cell_style(cell: &Cell, theme: &Theme) -> ratatui::style::Style {
    let mut style = if cell.past_eof { theme.past_eof } else { theme.cell };
    if cell.selected {
        style = style.patch(theme.selected);
    }
    if cell.matched {
        style = style.patch(theme.matched);
    }
    if cell.cursor {
        style = style.patch(theme.cursor);
    }
    style
}

fn sidebar_style(ch: &SidebarChar, theme: &Theme) -> ratatui::style::Style {
    let mut style = if ch.printable {
        theme.printable
    } else {
        theme.unprintable
    };
    if ch.selected {
        style = style.patch(theme.selected);
    }
    if ch.matched {
        style = style.patch(theme.matched);
    }
    if ch.cursor {
        style = style.patch(theme.cursor);
    }
    style
}

/// Draw the address column, the element grid and the character sidebar
pub fn draw_grid(f: &mut ratatui::Frame, area: Rect, frame: &Frame, theme: &Theme) {
    f.render_widget(Clear, area);

    let digits = address_digits(frame.status.size);
    let lines: Vec<Line> = frame
        .rows
        .iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.cells.len() * 2 + row.sidebar.len() + 2);
            spans.push(Span::styled(
                format!("{:0digits$X}  ", row.address),
                theme.address,
            ));

            for cell in &row.cells {
                spans.push(Span::styled(cell.text.clone(), cell_style(cell, theme)));
                spans.push(Span::raw(" "));
            }

            spans.push(Span::raw(" "));
            for ch in &row.sidebar {
                spans.push(Span::styled(ch.ch.to_string(), sidebar_style(ch, theme)));
            }

            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
