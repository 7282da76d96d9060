//! Locale-tolerant numeric coercion.

/// Parse a clinical measurement cell as f64, accepting the comma decimal
/// separator used in the source sheets. Returns `None` for anything that
/// does not parse; garbage input is a missing value, never an error.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Parse a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_decimal_separator() {
        assert_eq!(coerce_numeric("12,5"), Some(12.5));
        assert_eq!(coerce_numeric(" 9.1 "), Some(9.1));
        assert_eq!(coerce_numeric("48"), Some(48.0));
    }

    #[test]
    fn garbage_is_missing() {
        assert_eq!(coerce_numeric("abc"), None);
        assert_eq!(coerce_numeric(""), None);
        // A thousands separator plus decimal comma does not parse; the
        // source sheets do not use grouped digits.
        assert_eq!(coerce_numeric("1.234,5"), None);
    }

    #[test]
    fn parse_i64_trims() {
        assert_eq!(parse_i64(" 12 "), Some(12));
        assert_eq!(parse_i64("12.0"), None);
        assert_eq!(parse_i64(""), None);
    }
}
