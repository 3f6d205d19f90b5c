//! Order aggregate and related types.

mod aggregate;
mod factory;
mod number;
mod value_objects;

pub use aggregate::Order;
pub use factory::{OrderFactory, OrderItemInput};
pub use number::OrderNumber;
pub use value_objects::{
    InvoiceAddress, InvoiceCreditCardNumber, InvoiceEmailAddress, Money, OrderItem, ProductId,
};
