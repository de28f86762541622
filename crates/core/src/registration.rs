//! Validation rules for user registration input.
//!
//! These checks cover the structural rules that do not need database
//! access: required fields, password confirmation, minimum password
//! length, and a basic email shape check. Duplicate username/email
//! detection happens against the `users` table in the API layer.

use crate::error::CoreError;

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Raw registration input as received from the HTTP layer.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegistrationInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

/// Validate registration input.
///
/// Returns `CoreError::Validation` with a human-readable message on the
/// first rule that fails.
pub fn validate_registration(input: &RegistrationInput) -> Result<(), CoreError> {
    if input.username.trim().is_empty()
        || input.email.trim().is_empty()
        || input.password.is_empty()
    {
        return Err(CoreError::Validation(
            "username, email and password are required".into(),
        ));
    }

    if input.password != input.password2 {
        return Err(CoreError::Validation("Passwords do not match".into()));
    }

    if input.password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }

    validate_email(&input.email)?;

    Ok(())
}

/// Minimal structural email check: one `@` with a non-empty local part
/// and a domain containing a dot.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(username: &str, email: &str, password: &str, password2: &str) -> RegistrationInput {
        RegistrationInput {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            password2: password2.into(),
        }
    }

    #[test]
    fn accepts_valid_input() {
        let result = validate_registration(&input(
            "alice",
            "a@example.com",
            "long-enough-password",
            "long-enough-password",
        ));
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_missing_fields() {
        for bad in [
            input("", "a@example.com", "password123", "password123"),
            input("alice", "", "password123", "password123"),
            input("alice", "a@example.com", "", ""),
        ] {
            let err = validate_registration(&bad).unwrap_err();
            assert!(
                err.to_string().contains("required"),
                "expected required-fields error, got: {err}"
            );
        }
    }

    #[test]
    fn rejects_password_mismatch() {
        let err = validate_registration(&input(
            "alice",
            "a@example.com",
            "password123",
            "password456",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("do not match"));
    }

    #[test]
    fn rejects_short_password() {
        let err =
            validate_registration(&input("alice", "a@example.com", "short", "short")).unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["no-at-sign", "@missing.local", "user@", "user@nodot", "user@dot."] {
            assert!(
                validate_email(bad).is_err(),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn accepts_reasonable_emails() {
        for good in ["a@x.com", "first.last@sub.example.org"] {
            assert!(validate_email(good).is_ok(), "expected '{good}' to pass");
        }
    }
}
