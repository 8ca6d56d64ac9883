//! Sign-in form validation.
//!
//! Checks are per-field and independent: a bad username never masks a bad
//! password, so both inline errors can surface in the same attempt.

use regex::Regex;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Inline error shown under the username field.
pub const USERNAME_ERROR: &str = "Enter a valid email address";

/// Inline error shown under the password field.
pub const PASSWORD_ERROR: &str = "Password must be at least 8 characters";

/// Returns true if the string looks like an email address.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .is_ok_and(|re| re.is_match(email))
}

/// Per-field validation outcome for a sign-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub username_error: Option<&'static str>,
    pub password_error: Option<&'static str>,
}

impl ValidationReport {
    /// Returns true when both fields passed.
    pub fn is_ok(&self) -> bool {
        self.username_error.is_none() && self.password_error.is_none()
    }
}

/// Validates already-trimmed credentials.
pub fn validate_credentials(username: &str, password: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !valid_email(username) {
        report.username_error = Some(USERNAME_ERROR);
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        report.password_error = Some(PASSWORD_ERROR);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Valid email plus eight-character password passes both checks.
    #[test]
    fn test_valid_credentials_pass() {
        let report = validate_credentials("a@b.co", "Abcdef12");
        assert!(report.is_ok());
        assert_eq!(report.username_error, None);
        assert_eq!(report.password_error, None);
    }

    #[test]
    fn test_valid_email_shapes() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("first.last+tag@sub.domain.org"));
        assert!(valid_email("a_b%c-d@host.io"));
    }

    #[test]
    fn test_invalid_email_shapes() {
        assert!(!valid_email(""));
        assert!(!valid_email("user@"));
        assert!(!valid_email("@example.com"));
        assert!(!valid_email("user@host"));
        assert!(!valid_email("user@host.c"));
        assert!(!valid_email("user example.com"));
    }

    /// Short password is rejected regardless of content.
    #[test]
    fn test_short_password_rejected() {
        let report = validate_credentials("a@b.co", "Abc1!");
        assert_eq!(report.username_error, None);
        assert_eq!(report.password_error, Some(PASSWORD_ERROR));
        assert!(!report.is_ok());
    }

    /// An invalid username does not suppress the password check.
    #[test]
    fn test_checks_are_independent() {
        let report = validate_credentials("user@", "abc");
        assert_eq!(report.username_error, Some(USERNAME_ERROR));
        assert_eq!(report.password_error, Some(PASSWORD_ERROR));
    }

    /// Exactly the minimum length passes the password check.
    #[test]
    fn test_password_boundary() {
        assert!(validate_credentials("a@b.co", "12345678").password_error.is_none());
        assert!(validate_credentials("a@b.co", "1234567").password_error.is_some());
    }
}
