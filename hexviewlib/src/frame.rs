//! Plain-data description of one screen, handed to the display backend.
//!
//! Nothing in here knows about colors or terminals; the backend decides how a
//! flagged cell looks.

use crate::element::{ElementWidth, Endianness, format_element, sidebar_char};
use crate::inspect::ValueRow;
use crate::window::ViewWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Transient message for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// One displayed element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub address: u64,
    /// Hex digits, blanks for bytes past the end of the file
    pub text: String,
    pub cursor: bool,
    pub selected: bool,
    pub matched: bool,
    /// The element starts at or past the end of the file
    pub past_eof: bool,
}

/// One byte in the character sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarChar {
    pub ch: char,
    pub printable: bool,
    pub cursor: bool,
    pub selected: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub address: u64,
    pub cells: Vec<Cell>,
    pub sidebar: Vec<SidebarChar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub file_name: String,
    pub cursor: u64,
    pub size: u64,
    pub width: ElementWidth,
    pub endianness: Endianness,
    pub mode: &'static str,
    pub wrap: bool,
    /// Number of selected bytes, if selection mode is on
    pub selection_len: Option<u64>,
    pub message: Option<StatusMessage>,
}

/// Input line being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub prompt: &'static str,
    pub text: String,
    /// Edit cursor as a char index into `text`
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Row>,
    pub status: StatusLine,
    pub prompt: Option<Prompt>,
    /// Decoded values at the cursor, if the sub-window is shown
    pub values: Option<Vec<ValueRow>>,
    /// Help overlay topic; `Some(None)` is the help index
    pub help: Option<Option<String>>,
    pub color_enabled: bool,
}

const fn overlaps(start: u64, end: u64, range: Option<(u64, u64)>) -> bool {
    match range {
        Some((lo, hi)) => start < hi && lo < end,
        None => false,
    }
}

/// Build the grid rows for the visible page.
///
/// `highlight` is the half-open range of the current match. Rows start at the
/// view's first address and stop after the row holding the end-of-file position.
#[must_use]
pub fn build_rows(view: &ViewWindow, highlight: Option<(u64, u64)>) -> Vec<Row> {
    let size = view.size();
    let cursor = view.cursor();
    let bpr = view.bytes_per_row() as u64;
    let width = view.width().bytes() as u64;
    let endianness = view.state().endianness;
    let window = view.materialized();
    // Inclusive selection as a half-open range
    let selection = view.selection().map(|(lo, hi)| (lo, hi + 1));

    let mut rows = Vec::with_capacity(view.rows());
    for r in 0..view.rows() as u64 {
        let row_addr = view.top() + r * bpr;
        if row_addr > size {
            break;
        }

        let cells = (0..bpr / width)
            .map(|c| {
                let address = row_addr + c * width;
                let end = address + width;
                let bytes: Vec<Option<u8>> = (address..end)
                    .map(|a| if a < size { window.get(a) } else { None })
                    .collect();
                Cell {
                    address,
                    text: format_element(&bytes, endianness),
                    cursor: (address..end).contains(&cursor),
                    selected: overlaps(address, end, selection),
                    matched: overlaps(address, end, highlight),
                    past_eof: address >= size,
                }
            })
            .collect();

        let sidebar = (row_addr..(row_addr + bpr).min(size))
            .map(|a| {
                let (ch, printable) = window.get(a).map_or((' ', false), sidebar_char);
                SidebarChar {
                    ch,
                    printable,
                    cursor: a == cursor,
                    selected: overlaps(a, a + 1, selection),
                    matched: overlaps(a, a + 1, highlight),
                }
            })
            .collect();

        rows.push(Row {
            address: row_addr,
            cells,
            sidebar,
        });

        if row_addr + bpr > size {
            break;
        }
    }
    rows
}
