use regex::Regex;
use std::sync::LazyLock;

// Hyphenated area-exchange-subscriber groups, or 10 to 11 bare digits.
static DOMESTIC_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0\d{1,4}-\d{1,4}-\d{3,4}$|^0\d{9,10}$").expect("valid regex")
});

/// Whether `phone` looks like a Japanese domestic number starting with `0`.
pub fn is_domestic_phone(phone: &str) -> bool {
    DOMESTIC_PHONE_RE.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenated_numbers() {
        assert!(is_domestic_phone("0742-12-3456"));
        assert!(is_domestic_phone("03-1234-5678"));
        assert!(is_domestic_phone("0120-123-456"));
        assert!(is_domestic_phone("090-1234-5678"));
    }

    #[test]
    fn test_bare_digit_numbers() {
        assert!(is_domestic_phone("0123456789"));
        assert!(is_domestic_phone("09012345678"));
        assert!(!is_domestic_phone("012345678"));
        assert!(!is_domestic_phone("012345678901"));
    }

    #[test]
    fn test_rejected_values() {
        assert!(!is_domestic_phone("03-123"));
        assert!(!is_domestic_phone("abcdefg"));
        assert!(!is_domestic_phone(" - "));
        assert!(!is_domestic_phone(""));
        assert!(!is_domestic_phone("1742-12-3456"));
        assert!(!is_domestic_phone("0742-12-34"));
        assert!(!is_domestic_phone("TEL 0742-12-3456"));
        assert!(!is_domestic_phone("0742-12-3456 (代表)"));
    }
}
