//! Construction of orders from raw, untrusted input.

use crate::error::{ValidationError, ValidationErrors};

use super::{
    InvoiceAddress, InvoiceCreditCardNumber, InvoiceEmailAddress, Money, Order, OrderItem,
    OrderNumber,
};

/// Raw data for one order line, as received from a client.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemInput {
    pub product_id: String,
    pub product_name: String,
    pub product_amount: i32,
    pub product_price: Money,
}

impl OrderItemInput {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        product_amount: i32,
        product_price: Money,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            product_amount,
            product_price,
        }
    }
}

/// Builds validated [`Order`]s from primitive values.
///
/// Every field and every item is validated independently and all failures
/// are returned together; the aggregate is only constructed when nothing
/// failed.
///
/// Structural failures of the order itself (blank order number, no items)
/// are reported alongside field failures rather than only once every field
/// is valid. An invalid email with no items therefore yields two errors,
/// not one.
pub struct OrderFactory;

impl OrderFactory {
    #[tracing::instrument(skip_all, fields(order_number = %order_number))]
    pub fn create<I>(
        order_number: OrderNumber,
        invoice_address: &str,
        invoice_email_address: &str,
        invoice_credit_card_number: &str,
        items: I,
    ) -> Result<Order, ValidationErrors>
    where
        I: IntoIterator<Item = OrderItemInput>,
    {
        let mut errors: Vec<ValidationError> = Vec::new();

        let address = InvoiceAddress::create(invoice_address);
        let email = InvoiceEmailAddress::create(invoice_email_address);
        let card = InvoiceCreditCardNumber::create(invoice_credit_card_number);
        errors.extend(address.as_ref().err());
        errors.extend(email.as_ref().err());
        errors.extend(card.as_ref().err());

        let mut item_count = 0;
        let mut order_items = Vec::new();
        for input in items {
            item_count += 1;
            match OrderItem::create(
                &input.product_id,
                &input.product_name,
                input.product_amount,
                input.product_price,
            ) {
                Ok(item) => order_items.push(item),
                Err(item_errors) => errors.extend(item_errors),
            }
        }

        errors.extend(Order::structural_errors(&order_number, item_count));

        match (address, email, card) {
            (Ok(address), Ok(email), Ok(card)) if errors.is_empty() => {
                Order::create(order_number, address, email, card, order_items)
            }
            _ => {
                // A failed field always pushed its error, so this never falls back.
                let errors = ValidationErrors::from_vec(errors)
                    .unwrap_or_else(|| ValidationError::NoItems.into());
                tracing::debug!(error_count = errors.len(), "order input rejected");
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_NUMBER: &str = "20250801-ABCD1234";
    const ADDRESS: &str = "123 Sample Street, 90402 Berlin";
    const EMAIL: &str = "customer@example.com";
    const CARD: &str = "1234-5678-9101-1121";

    fn laptop() -> OrderItemInput {
        OrderItemInput::new("12345", "Gaming Laptop", 2, Money::from_decimal(1499.99))
    }

    #[test]
    fn test_create_with_valid_data() {
        let order = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            ADDRESS,
            "Customer@Example.com",
            CARD,
            vec![
                laptop(),
                OrderItemInput::new("67890", "Wireless Mouse", 1, Money::from_decimal(29.99)),
            ],
        )
        .unwrap();

        assert_eq!(order.order_number().as_str(), ORDER_NUMBER);
        assert_eq!(order.invoice_address().as_str(), ADDRESS);
        assert_eq!(order.invoice_email_address().as_str(), EMAIL);
        assert_eq!(order.invoice_credit_card_number().as_str(), CARD);
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.items()[0].product_name(), "Gaming Laptop");
        assert_eq!(order.items()[1].product_name(), "Wireless Mouse");
    }

    #[test]
    fn test_create_with_invalid_email() {
        let errors = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            ADDRESS,
            "invalid-email",
            CARD,
            vec![laptop()],
        )
        .unwrap_err();

        assert_eq!(errors.messages(), vec!["Invalid email format".to_string()]);
    }

    #[test]
    fn test_create_with_invalid_item() {
        let errors = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            ADDRESS,
            EMAIL,
            CARD,
            vec![OrderItemInput::new(
                "",
                "Gaming Laptop",
                2,
                Money::from_decimal(1499.99),
            )],
        )
        .unwrap_err();

        assert!(errors.contains(ValidationError::ProductIdEmpty));
        assert!(!errors.contains(ValidationError::NoItems));
    }

    #[test]
    fn test_create_collects_every_failure() {
        let errors = OrderFactory::create(
            OrderNumber::new(""),
            "Short",
            "invalid-email",
            "123",
            vec![OrderItemInput::new("", "", -1, Money::from_decimal(-10.0))],
        )
        .unwrap_err();

        assert_eq!(
            errors.errors(),
            &[
                ValidationError::AddressTooShort,
                ValidationError::EmailInvalid,
                ValidationError::CreditCardInvalid,
                ValidationError::ProductIdEmpty,
                ValidationError::ProductNameEmpty,
                ValidationError::ProductAmountNotPositive,
                ValidationError::ProductPriceNotPositive,
                ValidationError::OrderNumberEmpty,
            ]
        );
    }

    #[test]
    fn test_create_collects_failures_across_items() {
        let errors = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            ADDRESS,
            EMAIL,
            CARD,
            vec![
                laptop(),
                OrderItemInput::new("54321", "", 1, Money::from_decimal(49.0)),
                OrderItemInput::new("99999", "Headset", 0, Money::from_decimal(19.0)),
            ],
        )
        .unwrap_err();

        assert_eq!(
            errors.errors(),
            &[
                ValidationError::ProductNameEmpty,
                ValidationError::ProductAmountNotPositive,
            ]
        );
    }

    #[test]
    fn test_create_without_items() {
        let errors = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            ADDRESS,
            EMAIL,
            CARD,
            Vec::new(),
        )
        .unwrap_err();

        assert_eq!(errors.errors(), &[ValidationError::NoItems]);
    }

    #[test]
    fn test_structural_errors_are_reported_with_field_errors() {
        let errors = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            ADDRESS,
            "invalid-email",
            CARD,
            Vec::new(),
        )
        .unwrap_err();

        assert_eq!(
            errors.errors(),
            &[ValidationError::EmailInvalid, ValidationError::NoItems]
        );
    }

    #[test]
    fn test_create_rejects_unstorable_item_total() {
        let errors = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            ADDRESS,
            EMAIL,
            CARD,
            vec![
                laptop(),
                OrderItemInput::new("54321", "Keyboard", 2, Money::from_decimal(9e15)),
            ],
        )
        .unwrap_err();

        assert_eq!(errors.errors(), &[ValidationError::ProductTotalTooLarge]);
    }

    #[test]
    fn test_address_length_boundary() {
        let nine = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            "  123456789 ",
            EMAIL,
            CARD,
            vec![laptop()],
        )
        .unwrap_err();
        assert_eq!(
            nine.messages(),
            vec!["Address must be at least 10 characters long".to_string()]
        );

        let ten = OrderFactory::create(
            OrderNumber::new(ORDER_NUMBER),
            " 1234567890 ",
            EMAIL,
            CARD,
            vec![laptop()],
        )
        .unwrap();
        assert_eq!(ten.invoice_address().as_str(), "1234567890");
    }
}
