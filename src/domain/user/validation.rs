//! Signup credential validation

use thiserror::Error;

/// Errors that can occur during signup validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username and password are required.")]
    MissingCredentials,

    #[error("Username must be at least {0} characters.")]
    UsernameTooShort(usize),

    #[error("Password must be at least {0} characters.")]
    PasswordTooShort(usize),
}

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a username
///
/// Lengths are counted in characters, so "äöü" is a valid username.
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::MissingCredentials);
    }

    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    Ok(())
}

/// Validate a password
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::MissingCredentials);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate an already-trimmed signup pair.
///
/// Missing fields are reported before any length rule, and the username
/// rule before the password rule.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), UserValidationError> {
    if username.is_empty() || password.is_empty() {
        return Err(UserValidationError::MissingCredentials);
    }

    validate_username(username)?;
    validate_password(password)
}
