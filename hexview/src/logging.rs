//! File logging. The terminal belongs to the viewer, so logs go to the file named
//! by `HEXVIEW_LOG`; without it nothing is installed.

use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_PATH_VAR: &str = "HEXVIEW_LOG";
const LOG_LEVEL_VAR: &str = "HEXVIEW_LOG_LEVEL";

/// Filter for the given `HEXVIEW_LOG_LEVEL`, `info` if unset or invalid
fn filter_from(level: Option<&str>) -> EnvFilter {
    level
        .and_then(|l| EnvFilter::try_new(l).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

pub fn init() {
    let Some(path) = std::env::var_os(LOG_PATH_VAR) else {
        return;
    };

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("hexview: cannot open log file '{}': {err}", path.to_string_lossy());
            return;
        }
    };

    let level = std::env::var(LOG_LEVEL_VAR).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from(level.as_deref()))
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_to_info() {
        assert_eq!(filter_from(None).to_string(), "info");
        assert_eq!(filter_from(Some("debug")).to_string(), "debug");
    }
}
