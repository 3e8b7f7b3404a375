
/// Number of raw bytes grouped into one displayed unit
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementWidth {
    #[default]
    Byte,
    Word,
    Quad,
}

impl ElementWidth {
    pub const ALL: [Self; 3] = [Self::Byte, Self::Word, Self::Quad];

    /// Size of the element in bytes
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
            Self::Quad => 8,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Byte => "bytes",
            Self::Word => "words",
            Self::Quad => "quadwords",
        }
    }

    /// Width selected by a number key in normal mode
    #[must_use]
    pub const fn from_key(ch: char) -> Option<Self> {
        match ch {
            '1' => Some(Self::Byte),
            '2' => Some(Self::Word),
            '4' | '8' => Some(Self::Quad),
            _ => None,
        }
    }
}

/// Byte order used to display multi-byte elements.
///
/// `Big` shows the bytes in file order, `Little` shows them swapped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    #[default]
    Big,
}

impl Endianness {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Little => Self::Big,
            Self::Big => Self::Little,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Little => "LE",
            Self::Big => "BE",
        }
    }
}

/// Format one element as hex digits.
///
/// `bytes` holds the element's bytes in file order; `None` marks bytes past
/// the end of the file, which are rendered as blanks.
#[must_use]
pub fn format_element(bytes: &[Option<u8>], endianness: Endianness) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);

    let mut push = |byte: &Option<u8>| match byte {
        Some(b) => out.push_str(&format!("{b:02X}")),
        None => out.push_str("  "),
    };

    match endianness {
        Endianness::Big => bytes.iter().for_each(&mut push),
        Endianness::Little => bytes.iter().rev().for_each(&mut push),
    }

    out
}

/// Printable-character sidebar representation of a byte
#[must_use]
pub const fn sidebar_char(byte: u8) -> (char, bool) {
    if byte.is_ascii_graphic() || byte == b' ' {
        (byte as char, true)
    } else {
        ('.', false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_from_key() {
        assert_eq!(ElementWidth::from_key('1'), Some(ElementWidth::Byte));
        assert_eq!(ElementWidth::from_key('2'), Some(ElementWidth::Word));
        assert_eq!(ElementWidth::from_key('4'), Some(ElementWidth::Quad));
        assert_eq!(ElementWidth::from_key('8'), Some(ElementWidth::Quad));
        assert_eq!(ElementWidth::from_key('3'), None);
    }

    #[test]
    fn test_format_element_byte_order() {
        // Arrange
        let bytes = [Some(0x12), Some(0x34)];

        // Act
        let big = format_element(&bytes, Endianness::Big);
        let little = format_element(&bytes, Endianness::Little);

        // Assert
        assert_eq!(big, "1234");
        assert_eq!(little, "3412");
    }

    #[test]
    fn test_format_element_past_eof() {
        let bytes = [Some(0xAB), None];
        assert_eq!(format_element(&bytes, Endianness::Big), "AB  ");
        assert_eq!(format_element(&bytes, Endianness::Little), "  AB");
    }

    #[test]
    fn test_sidebar_char() {
        assert_eq!(sidebar_char(b'A'), ('A', true));
        assert_eq!(sidebar_char(b' '), (' ', true));
        assert_eq!(sidebar_char(0x00), ('.', false));
        assert_eq!(sidebar_char(0x7F), ('.', false));
    }
}
