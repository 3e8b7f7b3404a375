use crate::error::ViewerError;

/// Process-lifetime tunables of the viewing engine.
///
/// There is no config file; the front end fills in what the command line
/// controls and leaves the rest at [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Displayed bytes per row (multiple of 8)
    pub bytes_per_row: usize,
    /// Capacity of the materialized window, in screen pages
    pub window_pages: usize,
    /// Size of one search chunk in bytes
    pub search_chunk_size: usize,
    /// Capacity of each history list
    pub history_capacity: usize,
    /// Continue searches at the opposite end of the file
    pub wrap_search: bool,
    /// Render with colors
    pub color_enabled: bool,
    /// Chunk overlap used for regex patterns
    pub regex_max_span: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bytes_per_row: 16,
            window_pages: 3,
            search_chunk_size: 64 * 1024,
            history_capacity: 64,
            wrap_search: true,
            color_enabled: true,
            regex_max_span: 4096,
        }
    }
}

impl Config {
    /// Check that all values are usable.
    ///
    /// # Errors
    /// Returns [`ViewerError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ViewerError> {
        if !(8..=64).contains(&self.bytes_per_row) || !self.bytes_per_row.is_multiple_of(8) {
            return Err(ViewerError::InvalidConfig(format!(
                "bytes_per_row must be a multiple of 8 in 8..=64, got {}",
                self.bytes_per_row
            )));
        }
        if self.window_pages < 1 {
            return Err(ViewerError::InvalidConfig(
                "window_pages must be at least 1".into(),
            ));
        }
        if self.search_chunk_size < 16 {
            return Err(ViewerError::InvalidConfig(format!(
                "search_chunk_size must be at least 16, got {}",
                self.search_chunk_size
            )));
        }
        if self.history_capacity < 1 {
            return Err(ViewerError::InvalidConfig(
                "history_capacity must be at least 1".into(),
            ));
        }
        if self.regex_max_span < 1 {
            return Err(ViewerError::InvalidConfig(
                "regex_max_span must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_bytes_per_row_must_be_multiple_of_8() {
        // Arrange
        let cfg = Config {
            bytes_per_row: 12,
            ..Config::default()
        };

        // Act
        let res = cfg.validate();

        // Assert
        assert!(matches!(res, Err(ViewerError::InvalidConfig(_))));
    }
}
