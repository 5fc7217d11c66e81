//! Digit-only form fields.

/// Keep only ASCII digits.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Convert an integer form field, treating anything unparseable as `0`.
///
/// Leading whitespace and a single sign are accepted, then the leading run of
/// digits is read; trailing garbage is ignored (`"12abc"` is `12`). Values
/// beyond the `i64` range saturate.
pub fn parse_int_field(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for digit in rest.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        let d = i64::from(digit - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(d) } else { v.checked_add(d) })
            .unwrap_or(if negative { i64::MIN } else { i64::MAX });
    }

    if seen_digit {
        value
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("04.08.01.005-5"), "0408010055");
        assert_eq!(digits_only("1a2b3"), "123");
        assert_eq!(digits_only("R$ 1.234,56"), "123456");
        assert_eq!(digits_only(""), "");
        // Non-ASCII digits are dropped
        assert_eq!(digits_only("١٢3"), "3");
    }

    #[test]
    fn test_parse_int_field() {
        assert_eq!(parse_int_field("100"), 100);
        assert_eq!(parse_int_field("  42"), 42);
        assert_eq!(parse_int_field("12abc"), 12);
        assert_eq!(parse_int_field("-7"), -7);
        assert_eq!(parse_int_field("+3"), 3);
        assert_eq!(parse_int_field("007"), 7);
    }

    #[test]
    fn test_parse_int_field_unparseable_is_zero() {
        assert_eq!(parse_int_field(""), 0);
        assert_eq!(parse_int_field("abc"), 0);
        assert_eq!(parse_int_field("-"), 0);
        assert_eq!(parse_int_field("   "), 0);
    }

    #[test]
    fn test_parse_int_field_saturates() {
        assert_eq!(parse_int_field("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_int_field("-99999999999999999999999"), i64::MIN);
    }
}
