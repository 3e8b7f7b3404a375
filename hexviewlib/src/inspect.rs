//! Decoding of the bytes under the cursor for the values sub-window

use crate::element::{ElementWidth, Endianness};

/// One line of the values table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRow {
    pub label: &'static str,
    pub value: String,
}

impl ValueRow {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Format the number so that it has separators (for readability)
#[allow(clippy::needless_pass_by_value)]
#[must_use]
pub fn format_with_separators<T: ToString>(n: T) -> String {
    let s = n.to_string();

    // Keep the sign out of the digit groups
    let (sign, digits) = s
        .strip_prefix('-')
        .map_or(("", s.as_str()), |stripped| ("-", stripped));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

/// Format a float in fixed or scientific notation with trailing zeros trimmed
#[must_use]
pub fn format_float<T: Into<f64>>(float_value: T) -> String {
    let f = float_value.into();

    if !f.is_finite() {
        return f.to_string();
    }

    let scientific = f.abs() >= 1e6 || (f != 0.0 && f.abs() < 1e-5);
    let formatted = if scientific {
        format!("{f:.17e}")
    } else {
        format!("{f:.17}")
    };

    // Split off the exponent so only the mantissa gets trimmed
    let (mantissa, exponent) = formatted
        .split_once('e')
        .map_or((formatted.as_str(), None), |(m, e)| (m, Some(e)));
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut out = format_with_separators(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    if let Some(exp) = exponent {
        out.push('e');
        out.push_str(exp);
    }
    out
}

fn array<const N: usize>(bytes: &[u8], endianness: Endianness) -> Option<[u8; N]> {
    let mut arr: [u8; N] = bytes.get(..N)?.try_into().ok()?;
    // Normalize to little endian for the `from_le_bytes` calls below
    if endianness == Endianness::Big {
        arr.reverse();
    }
    Some(arr)
}

/// Decode `bytes` (file order, starting at the cursor) as every integer and float type
/// they are long enough for, plus the binary form of the active element.
#[must_use]
pub fn decode_values(bytes: &[u8], width: ElementWidth, endianness: Endianness) -> Vec<ValueRow> {
    let mut rows = Vec::new();

    if let Some(b) = array::<1>(bytes, endianness) {
        rows.push(ValueRow::new("u8", u8::from_le_bytes(b).to_string()));
        rows.push(ValueRow::new("i8", i8::from_le_bytes(b).to_string()));
    }
    if let Some(b) = array::<2>(bytes, endianness) {
        rows.push(ValueRow::new("u16", format_with_separators(u16::from_le_bytes(b))));
        rows.push(ValueRow::new("i16", format_with_separators(i16::from_le_bytes(b))));
    }
    if let Some(b) = array::<4>(bytes, endianness) {
        rows.push(ValueRow::new("u32", format_with_separators(u32::from_le_bytes(b))));
        rows.push(ValueRow::new("i32", format_with_separators(i32::from_le_bytes(b))));
        rows.push(ValueRow::new("f32", format_float(f32::from_le_bytes(b))));
    }
    if let Some(b) = array::<8>(bytes, endianness) {
        rows.push(ValueRow::new("u64", format_with_separators(u64::from_le_bytes(b))));
        rows.push(ValueRow::new("i64", format_with_separators(i64::from_le_bytes(b))));
        rows.push(ValueRow::new("f64", format_float(f64::from_le_bytes(b))));
    }

    let bin = match width {
        ElementWidth::Byte => array::<1>(bytes, endianness).map(|b| format!("{:08b}", b[0])),
        ElementWidth::Word => {
            array::<2>(bytes, endianness).map(|b| format!("{:016b}", u16::from_le_bytes(b)))
        }
        ElementWidth::Quad => {
            array::<8>(bytes, endianness).map(|b| format!("{:064b}", u64::from_le_bytes(b)))
        }
    };
    if let Some(bin) = bin {
        rows.push(ValueRow::new("bin", bin));
    }

    rows
}
