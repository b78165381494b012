//! Parsing utilities for dataset header and text tokens
//!
//! Pure parsing functions with no I/O dependencies.

use crate::format::constants::text::COMMENT_MARKER;
use crate::{DsioError, Field};

/// Parse a non-negative decimal count for the given header field.
///
/// Only ASCII digits are accepted: no sign, no separators, no whitespace.
pub fn parse_count(s: &str, field: Field) -> Result<u64, DsioError> {
    if s.is_empty() {
        return Err(DsioError::InvalidNumber(field));
    }

    let mut result: u64 = 0;

    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(DsioError::InvalidNumber(field));
        }

        let digit = (byte - b'0') as u64;

        result = result
            .checked_mul(10)
            .and_then(|value| value.checked_add(digit))
            .ok_or(DsioError::ShapeOverflow)?;
    }

    Ok(result)
}

/// Check whether a token parses as a floating-point number
pub fn is_numeric_token(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

/// Classify a line as numeric text: at least one token, all numeric
pub fn is_numeric_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return false;
    }
    tokens.all(is_numeric_token)
}

/// Whether a line is a full-line comment
pub fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}

/// Drop everything from the comment marker to the end of the line
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("0", Field::Rows), Ok(0));
        assert_eq!(parse_count("1234", Field::Rows), Ok(1234));
        assert_eq!(
            parse_count("18446744073709551615", Field::Cols),
            Ok(u64::MAX)
        );
        assert_eq!(
            parse_count("18446744073709551616", Field::Cols),
            Err(DsioError::ShapeOverflow)
        );
        assert_eq!(
            parse_count("", Field::Cols),
            Err(DsioError::InvalidNumber(Field::Cols))
        );
        for bad in ["-3", "+3", "3.0", " 3"] {
            assert_eq!(
                parse_count(bad, Field::Rows),
                Err(DsioError::InvalidNumber(Field::Rows))
            );
        }
    }

    #[test]
    fn test_numeric_line() {
        assert!(is_numeric_line("1 2 3"));
        assert!(is_numeric_line("  -1.5e-3\t2.0  nan inf "));
        assert!(!is_numeric_line(""));
        assert!(!is_numeric_line("   "));
        assert!(!is_numeric_line("1 two 3"));
        assert!(!is_numeric_line("BINARY"));
    }

    #[test]
    fn test_comments() {
        assert!(is_comment_line("# header"));
        assert!(is_comment_line("   # indented"));
        assert!(!is_comment_line("1 2 # trailing"));
        assert_eq!(strip_comment("1 2 # trailing"), "1 2 ");
        assert_eq!(strip_comment("# all comment"), "");
        assert_eq!(strip_comment("1 2"), "1 2");
    }
}
