//! Domain layer for the order intake service.
//!
//! This crate provides the invariant-carrying core:
//! - Self-validating value objects (address, email, credit card, money, order item)
//! - The `Order` aggregate root
//! - `OrderFactory`, which turns raw input into an `Order` while collecting
//!   every validation failure instead of stopping at the first

pub mod error;
pub mod order;

pub use common::OrderId;
pub use error::{ValidationError, ValidationErrors};
pub use order::{
    InvoiceAddress, InvoiceCreditCardNumber, InvoiceEmailAddress, Money, Order, OrderFactory,
    OrderItem, OrderItemInput, OrderNumber, ProductId,
};
