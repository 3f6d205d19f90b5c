//! Application error types.

use domain::ValidationErrors;
use thiserror::Error;

/// Errors returned by the order use cases.
///
/// The set of kinds is closed so the HTTP boundary can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// The request was rejected. Carries one message per failed rule.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// No order exists with the requested order number.
    #[error("Order with number {order_number} not found")]
    NotFound { order_number: String },

    /// An unexpected failure. `message` is safe to show to callers,
    /// `detail` holds the underlying cause.
    #[error("{message}")]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl ApplicationError {
    /// A validation failure with a single message.
    pub fn validation(message: impl Into<String>) -> Self {
        ApplicationError::Validation(vec![message.into()])
    }

    pub fn not_found(order_number: impl Into<String>) -> Self {
        ApplicationError::NotFound {
            order_number: order_number.into(),
        }
    }

    /// An internal failure whose cause is kept out of the public message.
    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ApplicationError::Internal {
            message: message.into(),
            detail: Some(cause.to_string()),
        }
    }

    /// Messages suitable for returning to the caller.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ApplicationError::Validation(messages) => messages.clone(),
            ApplicationError::NotFound { .. } | ApplicationError::Internal { .. } => {
                vec![self.to_string()]
            }
        }
    }
}

impl From<ValidationErrors> for ApplicationError {
    fn from(errors: ValidationErrors) -> Self {
        ApplicationError::Validation(errors.messages())
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use domain::ValidationError;

    #[test]
    fn validation_errors_keep_every_message() {
        let mut errors = ValidationErrors::from(ValidationError::AddressTooShort);
        errors.extend(ValidationErrors::from(ValidationError::EmailInvalid));

        let error = ApplicationError::from(errors);

        assert_eq!(
            error.messages(),
            vec![
                "Address must be at least 10 characters long".to_string(),
                "Invalid email format".to_string(),
            ]
        );
    }

    #[test]
    fn not_found_message_names_the_order_number() {
        let error = ApplicationError::not_found("20250801-ABCD1234");
        assert_eq!(
            error.messages(),
            vec!["Order with number 20250801-ABCD1234 not found".to_string()]
        );
    }

    #[test]
    fn internal_message_hides_detail() {
        let error = ApplicationError::internal("Failed to create order. Please try again.", "boom");

        assert_eq!(error.to_string(), "Failed to create order. Please try again.");
        assert!(matches!(
            error,
            ApplicationError::Internal { detail: Some(ref d), .. } if d == "boom"
        ));
    }
}
