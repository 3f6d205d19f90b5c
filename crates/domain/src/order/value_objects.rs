//! Value objects for the order domain.
//!
//! Each type can only be obtained through its `create` constructor, which
//! validates the raw input. Once built, a value never changes.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrors};

const MIN_ADDRESS_LENGTH: usize = 10;
const MIN_CARD_DIGITS: usize = 13;
const MAX_CARD_DIGITS: usize = 19;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// Billing address of an order.
///
/// Stored trimmed; at least 10 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InvoiceAddress(String);

impl InvoiceAddress {
    pub fn create(address: &str) -> Result<Self, ValidationError> {
        let trimmed = address.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::AddressEmpty);
        }

        if trimmed.chars().count() < MIN_ADDRESS_LENGTH {
            return Err(ValidationError::AddressTooShort);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InvoiceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Billing email address of an order, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InvoiceEmailAddress(String);

impl InvoiceEmailAddress {
    pub fn create(email: &str) -> Result<Self, ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::EmailEmpty);
        }

        if !EMAIL_PATTERN.is_match(email) {
            return Err(ValidationError::EmailInvalid);
        }

        Ok(Self(email.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InvoiceEmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credit card number used for invoicing.
///
/// Hyphens and spaces are ignored when checking the digit count, but the
/// value keeps the separators exactly as the customer typed them.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InvoiceCreditCardNumber(String);

impl InvoiceCreditCardNumber {
    pub fn create(card_number: &str) -> Result<Self, ValidationError> {
        if card_number.trim().is_empty() {
            return Err(ValidationError::CreditCardEmpty);
        }

        let digits: String = card_number
            .chars()
            .filter(|c| *c != '-' && *c != ' ')
            .collect();

        let valid_length = (MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len());
        if !valid_length || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::CreditCardInvalid);
        }

        Ok(Self(card_number.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keeps card numbers out of logs and panic messages.
impl std::fmt::Debug for InvoiceCreditCardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self
            .0
            .chars()
            .filter(char::is_ascii_digit)
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        write!(f, "InvoiceCreditCardNumber(****{visible})")
    }
}

/// Product identifier (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = 10.00)
    cents: i64,
}

impl Money {
    /// Largest storable amount, 9999999999999999.99.
    pub const MAX: Money = Money {
        cents: 999_999_999_999_999_999,
    };

    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a Money amount from a decimal value, rounded to the nearest cent.
    ///
    /// Non-finite input yields zero. Input beyond the `i64` cent range
    /// saturates, which is always above [`Money::MAX`].
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Self::zero();
        }
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the amount as a decimal number, e.g. `2999.98`.
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Returns true if the amount does not exceed [`Money::MAX`].
    pub fn is_storable(&self) -> bool {
        *self <= Self::MAX
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    pub fn checked_multiply(&self, quantity: u32) -> Option<Money> {
        self.cents
            .checked_mul(i64::from(quantity))
            .map(Money::from_cents)
    }

    /// Multiplies by a quantity, saturating at the `i64` bounds.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

/// A line of an order.
///
/// Items have no identity of their own; two items with the same fields are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    product_id: ProductId,
    product_name: String,
    quantity: u32,
    unit_price: Money,
}

impl OrderItem {
    /// Validates and creates an order item.
    ///
    /// All failing rules are reported together.
    pub fn create(
        product_id: &str,
        product_name: &str,
        quantity: i32,
        unit_price: Money,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        if product_id.trim().is_empty() {
            errors.push(ValidationError::ProductIdEmpty);
        }
        if product_name.trim().is_empty() {
            errors.push(ValidationError::ProductNameEmpty);
        }
        let quantity = u32::try_from(quantity).ok().filter(|q| *q > 0);
        if quantity.is_none() {
            errors.push(ValidationError::ProductAmountNotPositive);
        }
        if !unit_price.is_positive() {
            errors.push(ValidationError::ProductPriceNotPositive);
        } else if !unit_price.is_storable() {
            errors.push(ValidationError::ProductPriceTooLarge);
        } else if let Some(quantity) = quantity {
            let total = unit_price.checked_multiply(quantity);
            if !total.is_some_and(|total| total.is_storable()) {
                errors.push(ValidationError::ProductTotalTooLarge);
            }
        }

        match (ValidationErrors::from_vec(errors), quantity) {
            (None, Some(quantity)) => Ok(Self {
                product_id: ProductId::new(product_id),
                product_name: product_name.to_string(),
                quantity,
                unit_price,
            }),
            (Some(errors), _) => Err(errors),
            (None, None) => Err(ValidationError::ProductAmountNotPositive.into()),
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the total price for this item (quantity * unit_price).
    ///
    /// Never exceeds [`Money::MAX`]; `create` rejects items whose total would.
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}
