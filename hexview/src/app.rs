use crate::events::{EventSource, InputEvent};
use crate::theme::Theme;
use crate::ui;
use hexviewlib::{ByteSource, Config, Flow, Viewer, ViewerError};
use ratatui::DefaultTerminal;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Viewer(#[from] ViewerError),
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Raw mode and alternate screen for as long as it lives
struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        // Also installs a panic hook that restores the terminal
        let terminal = ratatui::try_init()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Name shown in the status line
fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Run the viewer on `source` until the user quits
///
/// # Errors
/// Returns [`AppError`] if the configuration is invalid or the terminal fails.
pub fn run<S: ByteSource>(source: S, path: &Path, config: &Config) -> Result<(), AppError> {
    let mut viewer = Viewer::new(source, display_name(path), config)?;
    let theme = Theme::new(config.color_enabled);
    let mut events = EventSource::default();

    let mut session = TerminalSession::enter()?;
    let size = session.terminal.size()?;
    viewer.resize(ui::grid_rows(size.height));
    info!(cols = size.width, rows = size.height, "viewer started");

    loop {
        let frame = viewer.frame();
        session.terminal.draw(|f| ui::draw(f, &frame, &theme))?;

        match events.next_event()? {
            InputEvent::Key(key) => {
                // The event source is polled for an abort key while a search runs
                if viewer.handle_key(key, &mut events) == Flow::Quit {
                    break;
                }
            }
            InputEvent::Resize(cols, rows) => {
                debug!(cols, rows, "terminal resized");
                viewer.resize(ui::grid_rows(rows));
            }
        }
    }

    info!("viewer closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(&PathBuf::from("/tmp/dir/data.bin")), "data.bin");
        assert_eq!(display_name(&PathBuf::from("/")), "/");
    }
}
