//! Request and response shapes of the order use cases.

use chrono::{DateTime, Utc};
use domain::{Money, Order, OrderItem, OrderItemInput};
use serde::{Deserialize, Serialize};

/// Raw order payload as submitted by a client.
///
/// Missing or `null` strings are treated as empty so that they are reported
/// by validation rather than rejected by the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderRequest {
    pub products: Vec<CreateOrderItemRequest>,
    #[serde(deserialize_with = "null_as_empty")]
    pub invoice_address: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub invoice_email_address: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub invoice_credit_card_number: String,
}

/// One requested order line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderItemRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub product_name: String,
    pub product_amount: i32,
    pub product_price: f64,
}

impl CreateOrderItemRequest {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        product_amount: i32,
        product_price: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            product_amount,
            product_price,
        }
    }

    /// The quantity to check against stock. Non-positive amounts check as zero
    /// and are rejected later by item validation.
    pub(crate) fn requested_amount(&self) -> u32 {
        u32::try_from(self.product_amount).unwrap_or(0)
    }
}

impl From<&CreateOrderItemRequest> for OrderItemInput {
    fn from(item: &CreateOrderItemRequest) -> Self {
        OrderItemInput::new(
            item.product_id.clone(),
            item.product_name.clone(),
            item.product_amount,
            Money::from_decimal(item.product_price),
        )
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Response body of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_number: String,
}

/// Projection of a persisted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_number: String,
    pub products: Vec<OrderItemDto>,
    pub invoice_address: String,
    pub invoice_email_address: String,
    pub invoice_credit_card_number: String,
    #[serde(with = "utc_seconds")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Projection of one order line, including its computed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub product_id: String,
    pub product_name: String,
    pub product_amount: u32,
    pub product_price: f64,
    pub total_price: f64,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            order_number: order.order_number().to_string(),
            products: order.items().iter().map(OrderItemDto::from).collect(),
            invoice_address: order.invoice_address().to_string(),
            invoice_email_address: order.invoice_email_address().to_string(),
            invoice_credit_card_number: order.invoice_credit_card_number().as_str().to_string(),
            created_at: order.created_at(),
        }
    }
}

impl From<&OrderItem> for OrderItemDto {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_id: item.product_id().to_string(),
            product_name: item.product_name().to_string(),
            product_amount: item.quantity(),
            product_price: item.unit_price().as_decimal(),
            total_price: item.total_price().as_decimal(),
        }
    }
}

/// `yyyy-MM-ddTHH:mm:ssZ` timestamps, always in UTC.
mod utc_seconds {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(at) => serializer.serialize_str(&at.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                NaiveDateTime::parse_from_str(&raw, FORMAT)
                    .map(|naive| naive.and_utc())
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domain::{OrderFactory, OrderNumber};

    fn order() -> Order {
        let mut order = OrderFactory::create(
            OrderNumber::new("20250801-ABCD1234"),
            "123 Sample Street, 90402 Berlin",
            "Customer@Example.com",
            "1234-5678-9101-1121",
            vec![OrderItemInput::new(
                "12345",
                "Gaming Laptop",
                2,
                Money::from_decimal(1499.99),
            )],
        )
        .unwrap();
        order.record_created_at(
            Utc.with_ymd_and_hms(2025, 8, 1, 9, 30, 15).unwrap()
                + chrono::TimeDelta::microseconds(123_456),
        );
        order
    }

    #[test]
    fn test_order_projection_json_shape() {
        let json = serde_json::to_value(OrderDto::from(&order())).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "orderNumber": "20250801-ABCD1234",
                "products": [{
                    "productId": "12345",
                    "productName": "Gaming Laptop",
                    "productAmount": 2,
                    "productPrice": 1499.99,
                    "totalPrice": 2999.98
                }],
                "invoiceAddress": "123 Sample Street, 90402 Berlin",
                "invoiceEmailAddress": "customer@example.com",
                "invoiceCreditCardNumber": "1234-5678-9101-1121",
                "createdAt": "2025-08-01T09:30:15Z"
            })
        );
    }

    #[test]
    fn test_created_at_parses_back() {
        let dto = OrderDto::from(&order());
        let json = serde_json::to_string(&dto).unwrap();

        let parsed: OrderDto = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.created_at,
            Some(Utc.with_ymd_and_hms(2025, 8, 1, 9, 30, 15).unwrap())
        );
    }

    #[test]
    fn test_request_treats_missing_and_null_fields_as_empty() {
        let request: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "invoiceAddress": null,
            "products": [{ "productId": "12345", "productAmount": 1, "productPrice": 9.99 }]
        }))
        .unwrap();

        assert_eq!(request.invoice_address, "");
        assert_eq!(request.invoice_email_address, "");
        assert_eq!(request.products[0].product_name, "");
        assert_eq!(request.products[0].product_amount, 1);
    }

    #[test]
    fn test_negative_amounts_request_zero_stock() {
        let item = CreateOrderItemRequest::new("12345", "Gaming Laptop", -3, 1.0);
        assert_eq!(item.requested_amount(), 0);
    }
}
