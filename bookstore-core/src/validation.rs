//! Client-side form checks, run before any request is dispatched

use crate::error::{ValidationError, ValidationResult};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn require(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

/// Loose structural check: one `@`, non-empty local part, dotted domain
pub fn validate_email(email: &str) -> ValidationResult<()> {
    require("email", email)?;
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_password(password: &str) -> ValidationResult<()> {
    require("password", password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("reader@example.com").is_ok());
        assert!(validate_email("staff.member@shop.co.uk").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "plain", "@example.com", "a@b", "a@@b.com", "a@.com", "a b@c.com"] {
            assert!(validate_email(email).is_err(), "{email} should be rejected");
        }
        assert_eq!(
            validate_email("  "),
            Err(ValidationError::EmptyField("email"))
        );
    }

    #[test]
    fn test_password_length() {
        assert_eq!(
            validate_password("short"),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );
        assert!(validate_password("long enough").is_ok());
        assert_eq!(
            validate_password(""),
            Err(ValidationError::EmptyField("password"))
        );
    }
}
