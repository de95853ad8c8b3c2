//! Locale-aware numeric parsing for Norwegian tariff values
//!
//! Rate values arrive as strings using `.` as a thousands separator, `,` as
//! the decimal point, and the occasional non-breaking space.

/// Values at or above this are "not applicable" placeholders in the source
/// data, not real rates.
pub const NOT_APPLICABLE_SENTINEL: f64 = 999_999.99;

/// Parse a decimal-comma formatted rate value.
///
/// Returns `None` for blank, unparseable, non-finite, and sentinel values,
/// so callers can drop the quotation without further checks.
pub fn parse_decimal_comma(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .replace('\u{a0}', " ")
        .replace('.', "")
        .replace(',', ".");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() || value >= NOT_APPLICABLE_SENTINEL {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_separator_and_decimal_comma() {
        assert_eq!(parse_decimal_comma("1.234,56"), Some(1234.56));
    }

    #[test]
    fn test_plain_decimal_comma() {
        assert_eq!(parse_decimal_comma("12,5"), Some(12.5));
        assert_eq!(parse_decimal_comma("0,00"), Some(0.0));
    }

    #[test]
    fn test_blank_is_discarded() {
        assert_eq!(parse_decimal_comma(""), None);
        assert_eq!(parse_decimal_comma("  "), None);
        assert_eq!(parse_decimal_comma("\u{a0}"), None);
    }

    #[test]
    fn test_garbage_is_discarded() {
        assert_eq!(parse_decimal_comma("abc"), None);
        assert_eq!(parse_decimal_comma("12,5,0"), None);
    }

    #[test]
    fn test_sentinel_is_discarded() {
        assert_eq!(parse_decimal_comma("999999,99"), None);
        assert_eq!(parse_decimal_comma("1.000.000,00"), None);
    }

    #[test]
    fn test_below_sentinel_is_kept() {
        assert_eq!(parse_decimal_comma("999999,98"), Some(999_999.98));
    }

    #[test]
    fn test_non_breaking_space_padding() {
        assert_eq!(parse_decimal_comma("\u{a0}25,00\u{a0}"), Some(25.0));
    }
}
