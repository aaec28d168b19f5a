//! Format checks for the fields that have one.
//!
//! Both validators are pure: the input is matched as-is, without trimming
//! or any other normalization.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?1?\d{9,15}$").expect("phone pattern is valid")
});

/// Returns whether `s` looks like `local-part@domain.tld`.
///
/// The local part and the domain are runs of word characters, dots and
/// hyphens; the segment after the last dot must be word characters only.
#[inline]
pub fn validate_email(s: &str) -> bool {
    EMAIL_PATTERN.is_match(s)
}

/// Returns whether `s` is an optional `+`, an optional `1`, then 9 to 15
/// digits.
#[inline]
pub fn validate_phone(s: &str) -> bool {
    PHONE_PATTERN.is_match(s)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_email_examples() {
        for valid in [
            "a.b@example.com",
            "alice@example.com",
            "first-last@sub.domain.org",
            "x_y@host.io",
        ] {
            assert!(validate_email(valid), "{valid}");
        }
        for invalid in [
            "",
            "bad-email",
            "alice@example",
            "@example.com",
            "alice@.com.",
            "alice@@example.com",
            "alice smith@example.com",
            " alice@example.com",
        ] {
            assert!(!validate_email(invalid), "{invalid}");
        }
    }

    #[test]
    fn test_phone_examples() {
        for valid in ["+15551234567", "5551234567", "123456789", "+1234567890"]
        {
            assert!(validate_phone(valid), "{valid}");
        }
        for invalid in [
            "",
            "12345678",
            "+1 555 123 4567",
            "555-123-4567",
            "++15551234567",
            "55512345ab",
            "2345678901234567",
        ] {
            assert!(!validate_phone(invalid), "{invalid}");
        }
    }

    proptest! {
        #[test]
        fn email_without_at_is_rejected(s in "[^@]*") {
            prop_assert!(!validate_email(&s));
        }

        #[test]
        fn email_without_dot_segment_is_rejected(
            s in "[a-z0-9._-]{1,12}@[a-z0-9_-]{1,12}"
        ) {
            prop_assert!(!validate_email(&s));
        }

        #[test]
        fn canonical_email_is_accepted(
            s in "[a-z0-9._-]{1,12}@[a-z0-9-]{1,12}(\\.[a-z0-9-]{1,8})?\\.[a-z]{2,6}"
        ) {
            prop_assert!(validate_email(&s));
        }

        #[test]
        fn phone_digits_in_range_are_accepted(
            s in "(\\+1)?[0-9]{9,15}"
        ) {
            prop_assert!(validate_phone(&s));
        }

        #[test]
        fn phone_too_short_is_rejected(s in "\\+?[0-9]{0,8}") {
            prop_assert!(!validate_phone(&s));
        }

        // A leading `1` may be taken as the country code, which lets a
        // 16-digit run through; every other 16-digit run is too long.
        #[test]
        fn phone_too_long_is_rejected(s in "\\+?[02-9][0-9]{15,20}") {
            prop_assert!(!validate_phone(&s));
        }

        #[test]
        fn phone_with_letters_is_rejected(
            head in "[0-9]{0,8}",
            letter in "[a-zA-Z]",
            tail in "[0-9]{1,8}",
        ) {
            let s = format!("{head}{letter}{tail}");
            prop_assert!(!validate_phone(&s));
        }

        #[test]
        fn validators_are_deterministic(s in ".*") {
            prop_assert_eq!(validate_email(&s), validate_email(&s));
            prop_assert_eq!(validate_phone(&s), validate_phone(&s));
        }
    }
}
