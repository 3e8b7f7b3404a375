#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod app;
mod events;
mod help;
mod logging;
mod theme;
mod ui;
mod ui_help;
mod ui_hexgrid;
mod ui_inspector;
mod ui_statusbar;

use clap::Parser;
use hexviewlib::{Config, FileSource};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Exit code for a file that cannot be opened
const EXIT_OPEN_FAILED: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "hexview",
    version,
    about = "Terminal hex viewer for arbitrarily large binary files",
    after_help = "Inside the viewer type :help for key bindings. Set HEXVIEW_LOG=<file> to enable logging."
)]
struct Args {
    /// File to view
    path: PathBuf,

    /// Render without colors
    #[arg(long)]
    no_colors: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init();

    let source = match FileSource::open(&args.path) {
        Ok(source) => source,
        Err(err) => {
            error!(%err, "open failed");
            eprintln!("hexview: {err}");
            return ExitCode::from(EXIT_OPEN_FAILED);
        }
    };

    let config = Config {
        color_enabled: !args.no_colors,
        ..Config::default()
    };

    match app::run(source, &args.path, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "viewer failed");
            eprintln!("hexview: {err}");
            ExitCode::FAILURE
        }
    }
}
