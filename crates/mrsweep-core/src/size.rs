//! Human readable byte sizes (`128MB`, `1G`, `512kb`).

use crate::errors::{FieldViolation, SweepError, ValidationErrors};

const KIB: u64 = 1024;

/// Unit suffixes accepted after the number, matched case-insensitively.
const UNITS: &[(&str, u64)] = &[
    ("B", 1),
    ("K", KIB),
    ("KB", KIB),
    ("M", KIB * KIB),
    ("MB", KIB * KIB),
    ("G", KIB * KIB * KIB),
    ("GB", KIB * KIB * KIB),
];

/// Parses a size with an optional binary unit suffix into a number of bytes.
///
/// The accepted grammar is an unsigned integer optionally followed by one of
/// `B`, `K`, `KB`, `M`, `MB`, `G`, `GB` (any case), with surrounding whitespace
/// allowed. No suffix means bytes.
///
/// ```
/// use mrsweep_core::parse_size;
///
/// assert_eq!(parse_size("128MB").unwrap(), 134_217_728);
/// assert_eq!(parse_size(" 512kb ").unwrap(), 524_288);
/// assert!(parse_size("bad").is_err());
/// ```
pub fn parse_size(text: &str) -> Result<u64, SweepError> {
    parse_size_bytes(text).map_err(|reason| {
        SweepError::Validation(ValidationErrors::single(FieldViolation::new("size", reason)))
    })
}

/// Same grammar as [`parse_size`], returning only the rejection reason so callers
/// can attribute it to a concrete field.
pub(crate) fn parse_size_bytes(text: &str) -> Result<u64, String> {
    let trimmed = text.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, rest) = trimmed.split_at(digits_end);
    if digits.is_empty() {
        return Err(format!("invalid size value '{text}'"));
    }
    let unit = rest.trim_start();
    let multiplier = if unit.is_empty() {
        1
    } else {
        UNITS
            .iter()
            .find(|(suffix, _)| suffix.eq_ignore_ascii_case(unit))
            .map(|(_, multiplier)| *multiplier)
            .ok_or_else(|| format!("invalid size value '{text}': unknown unit '{unit}'"))?
    };
    let number: u64 = digits
        .parse()
        .map_err(|_| format!("invalid size value '{text}': number out of range"))?;
    number
        .checked_mul(multiplier)
        .ok_or_else(|| format!("invalid size value '{text}': number out of range"))
}
