//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::OrderId;

use crate::error::{ValidationError, ValidationErrors};

use super::{InvoiceAddress, InvoiceCreditCardNumber, InvoiceEmailAddress, OrderItem, OrderNumber};

/// Order aggregate root.
///
/// Holds already-validated value objects and owns its items. There are no
/// setters: once constructed an order is read-only, except for the creation
/// timestamp which the persistence boundary records exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    order_number: OrderNumber,
    created_at: Option<DateTime<Utc>>,
    invoice_address: InvoiceAddress,
    invoice_email_address: InvoiceEmailAddress,
    invoice_credit_card_number: InvoiceCreditCardNumber,
    items: Vec<OrderItem>,
}

impl Order {
    /// Builds a new order with a fresh time-ordered id.
    ///
    /// Fails with every structural violation found (blank order number, no
    /// items). Value objects are valid by construction.
    pub fn create(
        order_number: OrderNumber,
        invoice_address: InvoiceAddress,
        invoice_email_address: InvoiceEmailAddress,
        invoice_credit_card_number: InvoiceCreditCardNumber,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationErrors> {
        if let Some(errors) =
            ValidationErrors::from_vec(Self::structural_errors(&order_number, items.len()))
        {
            return Err(errors);
        }

        Ok(Self {
            id: OrderId::new(),
            order_number,
            created_at: None,
            invoice_address,
            invoice_email_address,
            invoice_credit_card_number,
            items,
        })
    }

    /// Rebuilds a persisted order from storage.
    ///
    /// Applies the same structural checks as [`Order::create`] so a damaged
    /// record can never surface as a valid aggregate.
    pub fn restore(
        id: OrderId,
        order_number: OrderNumber,
        created_at: DateTime<Utc>,
        invoice_address: InvoiceAddress,
        invoice_email_address: InvoiceEmailAddress,
        invoice_credit_card_number: InvoiceCreditCardNumber,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationErrors> {
        let mut order = Self::create(
            order_number,
            invoice_address,
            invoice_email_address,
            invoice_credit_card_number,
            items,
        )?;
        order.id = id;
        order.created_at = Some(created_at);
        Ok(order)
    }

    /// Structural rules shared with the factory.
    pub(crate) fn structural_errors(
        order_number: &OrderNumber,
        item_count: usize,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if order_number.is_blank() {
            errors.push(ValidationError::OrderNumberEmpty);
        }
        if item_count == 0 {
            errors.push(ValidationError::NoItems);
        }
        errors
    }

    /// Records the creation time. Called by the persistence boundary when the
    /// order is first saved; later calls are ignored.
    pub fn record_created_at(&mut self, created_at: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(created_at);
        }
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    /// Returns the creation time, or `None` if the order was never persisted.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn invoice_address(&self) -> &InvoiceAddress {
        &self.invoice_address
    }

    pub fn invoice_email_address(&self) -> &InvoiceEmailAddress {
        &self.invoice_email_address
    }

    pub fn invoice_credit_card_number(&self) -> &InvoiceCreditCardNumber {
        &self.invoice_credit_card_number
    }

    /// Returns the items in the order they were submitted.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Money;
    use chrono::TimeZone;

    fn address() -> InvoiceAddress {
        InvoiceAddress::create("123 Sample Street, 90402 Berlin").unwrap()
    }

    fn email() -> InvoiceEmailAddress {
        InvoiceEmailAddress::create("customer@example.com").unwrap()
    }

    fn card() -> InvoiceCreditCardNumber {
        InvoiceCreditCardNumber::create("1234-5678-9101-1121").unwrap()
    }

    fn laptop() -> OrderItem {
        OrderItem::create("12345", "Gaming Laptop", 2, Money::from_decimal(1499.99)).unwrap()
    }

    #[test]
    fn test_create_order() {
        let order = Order::create(
            OrderNumber::new("20250801-ABCD1234"),
            address(),
            email(),
            card(),
            vec![laptop()],
        )
        .unwrap();

        assert_eq!(order.order_number().as_str(), "20250801-ABCD1234");
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.id().as_uuid().get_version_num(), 7);
        assert!(order.created_at().is_none());
    }

    #[test]
    fn test_create_reports_all_structural_errors() {
        let errors = Order::create(OrderNumber::new(""), address(), email(), card(), vec![])
            .unwrap_err();

        assert_eq!(
            errors.errors(),
            &[ValidationError::OrderNumberEmpty, ValidationError::NoItems]
        );
    }

    #[test]
    fn test_created_at_is_recorded_once() {
        let mut order = Order::create(
            OrderNumber::new("20250801-ABCD1234"),
            address(),
            email(),
            card(),
            vec![laptop()],
        )
        .unwrap();

        let first = Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 8, 2, 10, 0, 0).unwrap();
        order.record_created_at(first);
        order.record_created_at(second);

        assert_eq!(order.created_at(), Some(first));
    }

    #[test]
    fn test_restore_keeps_identity_and_timestamp() {
        let id = OrderId::new();
        let created_at = Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap();

        let order = Order::restore(
            id,
            OrderNumber::new("20250801-ABCD1234"),
            created_at,
            address(),
            email(),
            card(),
            vec![laptop()],
        )
        .unwrap();

        assert_eq!(order.id(), id);
        assert_eq!(order.created_at(), Some(created_at));
    }

    #[test]
    fn test_restore_rejects_orders_without_items() {
        let result = Order::restore(
            OrderId::new(),
            OrderNumber::new("20250801-ABCD1234"),
            Utc::now(),
            address(),
            email(),
            card(),
            vec![],
        );

        assert!(result.unwrap_err().contains(ValidationError::NoItems));
    }
}
