//! The `error` module defines the [`ViewerError`] enum that describes the errors that
//! can occur when opening, reading, or searching a file via the viewing engine.
//! Like the rest of the crate it layers the information in two parts:
//! 1. When the error occurs, e.g., while opening the file or while reading a chunk.
//! 2. What kind of error was encountered (via [`FileAccessErrorKind`] or [`PatternErrorKind`]).
//!
//! Search misses and user cancellations are not errors, see [`crate::SearchOutcome`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// The target file could not be opened. Fatal at startup.
    #[error("cannot open '{}': {kind}", path.display())]
    FileAccess {
        path: PathBuf,
        kind: FileAccessErrorKind,
    },
    /// Reading from an already opened source failed
    #[error("read failed at offset 0x{offset:X}: {source}")]
    Read {
        offset: u64,
        #[source]
        source: io::Error,
    },
    /// User input could not be turned into a search pattern or an address
    #[error("{0}")]
    MalformedPattern(PatternErrorKind),
    /// Configuration values are out of their allowed range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ViewerError {
    /// Classify an `io::Error` raised while opening `path`
    pub(crate) fn from_open(path: PathBuf, err: &io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => FileAccessErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => FileAccessErrorKind::PermissionDenied,
            io::ErrorKind::IsADirectory => FileAccessErrorKind::IsDirectory,
            _ => FileAccessErrorKind::Other(err.to_string()),
        };
        Self::FileAccess { path, kind }
    }
}

impl From<PatternErrorKind> for ViewerError {
    fn from(kind: PatternErrorKind) -> Self {
        Self::MalformedPattern(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileAccessErrorKind {
    /// Path does not exist
    #[error("file not found")]
    NotFound,
    /// Process lacks read permission
    #[error("permission denied")]
    PermissionDenied,
    /// Path names a directory
    #[error("is a directory")]
    IsDirectory,
    /// File is larger than the addressable 256 TiB
    #[error("file too large ({0} bytes, limit is 256 TiB)")]
    TooLarge(u64),
    /// Anything else the OS reported
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternErrorKind {
    /// Nothing to search for
    #[error("Empty pattern")]
    Empty,
    /// Hex pattern with a lone trailing nibble
    #[error("Hex pattern has an odd number of digits ({0})")]
    OddLength(usize),
    /// Hex pattern contains a non-hex character
    #[error("Invalid hex digit '{0}' at position {1}")]
    InvalidHexDigit(char, usize),
    /// Regex failed to compile
    #[error("Invalid regex: {0}")]
    InvalidRegex(String),
    /// Jump target is not a number
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_kinds() {
        // Arrange
        let path = PathBuf::from("missing.bin");
        let err = io::Error::from(io::ErrorKind::NotFound);

        // Act
        let res = ViewerError::from_open(path, &err);

        // Assert
        assert!(matches!(
            res,
            ViewerError::FileAccess {
                kind: FileAccessErrorKind::NotFound,
                ..
            }
        ));
        assert_eq!(res.to_string(), "cannot open 'missing.bin': file not found");
    }

    #[test]
    fn test_pattern_error_display() {
        let err = ViewerError::from(PatternErrorKind::InvalidHexDigit('g', 2));
        assert_eq!(err.to_string(), "Invalid hex digit 'g' at position 2");
        assert!(matches!(err, ViewerError::MalformedPattern(PatternErrorKind::InvalidHexDigit('g', 2))));
    }
}
