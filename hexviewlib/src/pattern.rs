use crate::error::PatternErrorKind;
use regex::bytes::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Text,
    Hex,
    Regex,
}

impl PatternKind {
    /// Short name used in status messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Hex => "hex",
            Self::Regex => "regex",
        }
    }
}

/// Compiled byte regex that remembers what the user typed
#[derive(Debug, Clone)]
pub struct RegexPattern {
    source: String,
    regex: Regex,
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for RegexPattern {}

/// A search key. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Exact, case-sensitive match of the UTF-8 encoding
    Text(String),
    /// Exact match of a byte sequence
    Hex(Vec<u8>),
    /// Byte regex
    Regex(RegexPattern),
}

impl Pattern {
    /// Text literal pattern.
    ///
    /// # Errors
    /// Returns [`PatternErrorKind::Empty`] for an empty string.
    pub fn text(input: &str) -> Result<Self, PatternErrorKind> {
        if input.is_empty() {
            return Err(PatternErrorKind::Empty);
        }
        Ok(Self::Text(input.to_string()))
    }

    /// Hex literal pattern, e.g. `"4869"`, `"48 69"` or `"0x4869"`. Whitespace between
    /// digits is ignored; a lone trailing nibble is rejected.
    ///
    /// # Errors
    /// Returns [`PatternErrorKind`] describing the first problem found.
    pub fn parse_hex(input: &str) -> Result<Self, PatternErrorKind> {
        let mut digits = Vec::with_capacity(input.len());

        // Error positions stay relative to the whole input
        let trimmed = input.trim_start();
        let (body, skipped) = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
            Some(rest) => (rest, input.chars().count() - rest.chars().count()),
            None => (input, 0),
        };

        for (pos, ch) in body.chars().enumerate() {
            let pos = pos + skipped;
            if ch.is_whitespace() {
                continue;
            }
            let Some(value) = ch.to_digit(16) else {
                return Err(PatternErrorKind::InvalidHexDigit(ch, pos));
            };
            #[allow(clippy::cast_possible_truncation)]
            digits.push(value as u8);
        }

        if digits.is_empty() {
            return Err(PatternErrorKind::Empty);
        }
        if !digits.len().is_multiple_of(2) {
            return Err(PatternErrorKind::OddLength(digits.len()));
        }

        Ok(Self::Hex(
            digits.chunks_exact(2).map(|p| (p[0] << 4) | p[1]).collect(),
        ))
    }

    /// Byte regex pattern.
    ///
    /// # Errors
    /// Returns [`PatternErrorKind::InvalidRegex`] if the expression does not compile.
    pub fn regex(input: &str) -> Result<Self, PatternErrorKind> {
        if input.is_empty() {
            return Err(PatternErrorKind::Empty);
        }
        let regex = Regex::new(input).map_err(|e| PatternErrorKind::InvalidRegex(e.to_string()))?;
        Ok(Self::Regex(RegexPattern {
            source: input.to_string(),
            regex,
        }))
    }

    /// Build a pattern of the given kind from user input
    ///
    /// # Errors
    /// See the individual constructors.
    pub fn parse(kind: PatternKind, input: &str) -> Result<Self, PatternErrorKind> {
        match kind {
            PatternKind::Text => Self::text(input),
            PatternKind::Hex => Self::parse_hex(input),
            PatternKind::Regex => Self::regex(input),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        match self {
            Self::Text(_) => PatternKind::Text,
            Self::Hex(_) => PatternKind::Hex,
            Self::Regex(_) => PatternKind::Regex,
        }
    }

    /// Bytes to match for literal patterns
    #[must_use]
    pub fn literal(&self) -> Option<&[u8]> {
        match self {
            Self::Text(s) => Some(s.as_bytes()),
            Self::Hex(bytes) => Some(bytes),
            Self::Regex(_) => None,
        }
    }

    #[must_use]
    pub(crate) const fn compiled_regex(&self) -> Option<&Regex> {
        match self {
            Self::Regex(r) => Some(&r.regex),
            _ => None,
        }
    }

    /// Text to put back into an input line, e.g. on history recall
    #[must_use]
    pub fn source(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Hex(bytes) => {
                let mut out = String::with_capacity(bytes.len() * 3);
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(&format!("{b:02X}"));
                }
                out
            }
            Self::Regex(r) => r.source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_valid() {
        assert_eq!(Pattern::parse_hex("4869"), Ok(Pattern::Hex(vec![0x48, 0x69])));
        assert_eq!(
            Pattern::parse_hex(" de AD be ef "),
            Ok(Pattern::Hex(vec![0xDE, 0xAD, 0xBE, 0xEF]))
        );
    }

    #[test]
    fn test_parse_hex_accepts_0x_prefix() {
        assert_eq!(Pattern::parse_hex("0x4869"), Ok(Pattern::Hex(vec![0x48, 0x69])));
        assert_eq!(Pattern::parse_hex(" 0X de ad"), Ok(Pattern::Hex(vec![0xDE, 0xAD])));
        assert_eq!(Pattern::parse_hex("0x"), Err(PatternErrorKind::Empty));
        assert_eq!(
            Pattern::parse_hex("0x48zz"),
            Err(PatternErrorKind::InvalidHexDigit('z', 4))
        );
    }

    #[test]
    fn test_parse_hex_matches_text_bytes() {
        // Arrange
        let hex = Pattern::parse_hex("4869").unwrap();
        let text = Pattern::text("Hi").unwrap();

        // Act & Assert
        assert_eq!(hex.literal(), text.literal());
    }

    #[test]
    fn test_parse_hex_rejects_odd_length() {
        assert_eq!(
            Pattern::parse_hex("486"),
            Err(PatternErrorKind::OddLength(3))
        );
    }

    #[test]
    fn test_parse_hex_rejects_invalid_digit() {
        assert_eq!(
            Pattern::parse_hex("48 zz"),
            Err(PatternErrorKind::InvalidHexDigit('z', 3))
        );
    }

    #[test]
    fn test_empty_patterns() {
        assert_eq!(Pattern::parse_hex("   "), Err(PatternErrorKind::Empty));
        assert_eq!(Pattern::text(""), Err(PatternErrorKind::Empty));
        assert_eq!(Pattern::regex(""), Err(PatternErrorKind::Empty));
    }

    #[test]
    fn test_regex_invalid() {
        assert!(matches!(
            Pattern::regex("(unclosed"),
            Err(PatternErrorKind::InvalidRegex(_))
        ));
    }

    #[test]
    fn test_source_round_trips_into_input() {
        let hex = Pattern::parse_hex("deadBEEF").unwrap();
        assert_eq!(hex.source(), "DE AD BE EF");
        assert_eq!(Pattern::parse_hex(&hex.source()), Ok(hex));

        let re = Pattern::regex(r"\d{2}").unwrap();
        assert_eq!(re.source(), r"\d{2}");
        assert_eq!(re.kind(), PatternKind::Regex);
    }
}
