pub mod article;
pub mod auth;
pub mod expense;
pub mod finance;
pub mod fine;
pub mod payment;
pub mod player;
pub mod setting;

pub use article::*;
pub use auth::*;
pub use expense::*;
pub use finance::*;
pub use fine::*;
pub use payment::*;
pub use player::*;
pub use setting::*;

use club_core::view::ValidationRule;
use regex::Regex;

pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
pub const DIGITS_PATTERN: &str = r"^[0-9]+$";
pub const PHONE_PATTERN: &str = r"^\+?[0-9][0-9 \-]{5,18}[0-9]$";
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// Attach a format check, leaving the rule unchanged if `pattern` does not compile.
pub(crate) fn with_pattern(rule: ValidationRule, pattern: &str) -> ValidationRule {
    match Regex::new(pattern) {
        Ok(regex) => rule.pattern(regex),
        Err(err) => {
            tracing::error!("Invalid validation pattern {}: {}", pattern, err);
            rule
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        for pattern in [EMAIL_PATTERN, DIGITS_PATTERN, PHONE_PATTERN, DATE_PATTERN] {
            assert!(Regex::new(pattern).is_ok(), "{pattern}");
        }
    }

    #[test]
    fn test_phone_pattern() {
        let phone = Regex::new(PHONE_PATTERN).unwrap();
        assert!(phone.is_match("3001234567"));
        assert!(phone.is_match("+57 300 123 4567"));
        assert!(!phone.is_match("12ab"));
    }
}
