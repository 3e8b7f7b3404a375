//! # `hexviewlib`
//!
//! `hexviewlib` is the viewing engine behind the `hexview` terminal hex viewer. It pages
//! through files of up to 256 TiB without loading them into memory.
//!
//! The library provides:
//! - Random access to the viewed bytes (via the [`ByteSource`] trait and [`FileSource`]).
//! - Cursor and scrolling model over a bounded cache of the file (via [`ViewWindow`]).
//! - Chunked, cancellable text/hex/regex search (via [`SearchEngine`]).
//! - A vi-like modal key interpreter with search and address history (via [`CommandInterpreter`]).
//! - A data-only description of the screen for any display backend (via [`Frame`]).
//! - Error handling with [`ViewerError`].
//!
//! ## Example
//!
//! ```
//! use hexviewlib::{Config, Key, MemorySource, NoInterrupt, Viewer};
//!
//! let data = b"....Hello, hex!....".to_vec();
//! let mut viewer = Viewer::new(MemorySource::new(data), "demo.bin", &Config::default()).unwrap();
//! viewer.resize(4);
//!
//! for key in "/hex".chars().map(Key::Char).chain([Key::Enter]) {
//!     viewer.handle_key(key, &mut NoInterrupt);
//! }
//! assert_eq!(viewer.view().cursor(), 11);
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod commands;
mod config;
mod element;
mod error;
mod frame;
mod history;
mod inspect;
mod interpreter;
mod key;
mod line_editor;
mod pattern;
mod search;
mod source;
mod viewer;
mod window;

// Public APIs
pub use commands::{Command, CommandError, CommandParser, parse_address};
pub use config::Config;
pub use element::{ElementWidth, Endianness, format_element, sidebar_char};
pub use error::{FileAccessErrorKind, PatternErrorKind, ViewerError};
pub use frame::{Cell, Frame, Prompt, Row, Severity, SidebarChar, StatusLine, StatusMessage};
pub use history::{HistoryStore, RecallDirection};
pub use inspect::{ValueRow, decode_values, format_float, format_with_separators};
pub use interpreter::{Action, CommandInterpreter, Mode, ScreenRow};
pub use key::Key;
pub use line_editor::LineEditor;
pub use pattern::{Pattern, PatternKind};
pub use search::{Direction, Interrupt, NoInterrupt, SearchEngine, SearchOutcome};
pub use source::{ByteSource, FileSource, MAX_FILE_SIZE, MemorySource};
pub use viewer::{Flow, Viewer};
pub use window::{MaterializedWindow, ViewState, ViewWindow};
