//! Parsing of `:` command lines and jump addresses

use crate::error::PatternErrorKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Not an editor command: {0}")]
    UnknownCommand(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Open the help overlay on a topic, the index if `None`
    Help(Option<String>),
    /// Turn search wraparound on or off
    SetWrap(bool),
    Jump(u64),
}

pub struct CommandParser;

impl CommandParser {
    /// Parse a command line without the leading `:`. `Ok(None)` for an empty line.
    ///
    /// # Errors
    /// Returns [`CommandError`] for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let trimmed = line.trim();
        let (name, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (trimmed, ""),
        };

        let cmd = match (name, arg) {
            ("", _) => return Ok(None),
            ("q" | "q!" | "quit" | "quit!" | "wq" | "x" | "exit" | "ZZ", "") => Command::Quit,
            ("h" | "help", "") => Command::Help(None),
            ("h" | "help", topic) => Command::Help(Some(topic.to_lowercase())),
            ("set" | "se", "wrap" | "ws" | "wrapscan") => Command::SetWrap(true),
            ("set" | "se", "nowrap" | "nows" | "nowrapscan") => Command::SetWrap(false),
            ("set" | "se", other) => return Err(CommandError::InvalidArgument(other.to_string())),
            _ => match parse_address(trimmed) {
                Ok(addr) => Command::Jump(addr),
                Err(_) => return Err(CommandError::UnknownCommand(trimmed.to_string())),
            },
        };
        Ok(Some(cmd))
    }
}

/// Parse a jump target typed as hex digits, with or without a `0x` prefix.
/// Values beyond the file are accepted here and clamped by the view.
///
/// # Errors
/// Returns [`PatternErrorKind::InvalidAddress`] if the text is not a hex number.
pub fn parse_address(input: &str) -> Result<u64, PatternErrorKind> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(PatternErrorKind::InvalidAddress(input.to_string()));
    }

    match u64::from_str_radix(digits, 16) {
        Ok(addr) => Ok(addr),
        // All hex digits but too many of them: clamp to the largest address
        Err(_) if digits.chars().all(|c| c.is_ascii_hexdigit()) => Ok(u64::MAX),
        Err(_) => Err(PatternErrorKind::InvalidAddress(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_aliases() {
        for cmd in ["q", "q!", "quit", "wq", "x", "exit", "ZZ", " q "] {
            assert_eq!(CommandParser::parse(cmd), Ok(Some(Command::Quit)), "{cmd}");
        }
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(CommandParser::parse("help"), Ok(Some(Command::Help(None))));
        assert_eq!(
            CommandParser::parse("help Search"),
            Ok(Some(Command::Help(Some("search".to_string()))))
        );
    }

    #[test]
    fn test_parse_set_wrap() {
        assert_eq!(CommandParser::parse("set wrap"), Ok(Some(Command::SetWrap(true))));
        assert_eq!(CommandParser::parse("set nowrap"), Ok(Some(Command::SetWrap(false))));
        assert_eq!(
            CommandParser::parse("set colors"),
            Err(CommandError::InvalidArgument("colors".to_string()))
        );
    }

    #[test]
    fn test_parse_jump_and_unknown() {
        assert_eq!(CommandParser::parse("1F00"), Ok(Some(Command::Jump(0x1F00))));
        assert_eq!(CommandParser::parse(""), Ok(None));
        assert_eq!(
            CommandParser::parse("frobnicate"),
            Err(CommandError::UnknownCommand("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("ff"), Ok(0xFF));
        assert_eq!(parse_address("0x1000"), Ok(0x1000));
        assert_eq!(parse_address("FFFFFFFFFFFFFFFFFFFF"), Ok(u64::MAX));
        assert_eq!(
            parse_address("12g"),
            Err(PatternErrorKind::InvalidAddress("12g".to_string()))
        );
        assert!(parse_address("0x").is_err());
    }
}
