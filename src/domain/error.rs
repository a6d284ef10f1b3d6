use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Message meant for the person filling in a form.
    ///
    /// Only validation, conflict and authentication failures are recoverable
    /// by the user; everything else returns `None` and should fail the request.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Validation { message }
            | Self::Conflict { message }
            | Self::Authentication { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User '7' not found");
        assert_eq!(error.to_string(), "Not found: User '7' not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Username must be at least 3 characters.");
        assert_eq!(
            error.to_string(),
            "Validation error: Username must be at least 3 characters."
        );
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("That username is already taken.");
        assert_eq!(error.to_string(), "Conflict: That username is already taken.");
    }

    #[test]
    fn test_user_message_for_recoverable_errors() {
        assert_eq!(
            DomainError::validation("too short").user_message(),
            Some("too short")
        );
        assert_eq!(DomainError::conflict("taken").user_message(), Some("taken"));
        assert_eq!(
            DomainError::authentication("Invalid username or password.").user_message(),
            Some("Invalid username or password.")
        );
    }

    #[test]
    fn test_user_message_hidden_for_fatal_errors() {
        assert!(DomainError::storage("disk full").user_message().is_none());
        assert!(DomainError::not_found("gone").user_message().is_none());
        assert!(DomainError::internal("boom").user_message().is_none());
    }
}
