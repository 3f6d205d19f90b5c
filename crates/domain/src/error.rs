//! Domain error types.

use thiserror::Error;

/// A single failed business rule.
///
/// The `Display` text is the caller-facing message and is stable: API
/// clients and tests match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    #[error("Address cannot be null or empty")]
    AddressEmpty,

    #[error("Address must be at least 10 characters long")]
    AddressTooShort,

    #[error("Email address cannot be null or empty")]
    EmailEmpty,

    #[error("Invalid email format")]
    EmailInvalid,

    #[error("Credit card number cannot be null or empty")]
    CreditCardEmpty,

    #[error("Invalid credit card number format")]
    CreditCardInvalid,

    #[error("Product ID cannot be null or empty")]
    ProductIdEmpty,

    #[error("Product name cannot be null or empty")]
    ProductNameEmpty,

    #[error("Product amount must be greater than zero")]
    ProductAmountNotPositive,

    #[error("Product price must be greater than zero")]
    ProductPriceNotPositive,

    #[error("Product price must not exceed 9999999999999999.99")]
    ProductPriceTooLarge,

    #[error("Product total price must not exceed 9999999999999999.99")]
    ProductTotalTooLarge,

    #[error("Order number cannot be null or empty")]
    OrderNumberEmpty,

    #[error("Order must contain at least one item")]
    NoItems,
}

/// An ordered, non-empty collection of validation failures.
///
/// Returned by every constructor that checks more than one rule, so that a
/// caller sees all simultaneous problems in one response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Builds the collection, returning `None` when there is nothing to report.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Returns the individual failures in the order they were detected.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns true if the given failure is part of the collection.
    pub fn contains(&self, error: ValidationError) -> bool {
        self.0.contains(&error)
    }

    /// Returns the caller-facing message of every failure.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends all failures from another collection.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_empty_collections() {
        assert!(ValidationErrors::from_vec(vec![]).is_none());
    }

    #[test]
    fn display_joins_messages_in_detection_order() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationError::AddressTooShort,
            ValidationError::EmailInvalid,
        ])
        .unwrap();

        assert_eq!(
            errors.to_string(),
            "Address must be at least 10 characters long; Invalid email format"
        );
        assert_eq!(
            errors.messages(),
            vec![
                "Address must be at least 10 characters long".to_string(),
                "Invalid email format".to_string(),
            ]
        );
    }

    #[test]
    fn extend_keeps_existing_failures() {
        let mut errors = ValidationErrors::from(ValidationError::EmailEmpty);
        errors.extend(ValidationErrors::from(ValidationError::NoItems));

        assert_eq!(errors.len(), 2);
        assert!(errors.contains(ValidationError::EmailEmpty));
        assert!(errors.contains(ValidationError::NoItems));
    }
}
