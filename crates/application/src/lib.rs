//! Order intake use cases.
//!
//! Provides the Create-Order and Get-Order use cases, the stock validation
//! port they depend on, and the projections they return.

pub mod create_order;
pub mod dto;
pub mod error;
pub mod get_order;
pub mod services;

pub use create_order::CreateOrderHandler;
pub use dto::{
    CreateOrderItemRequest, CreateOrderRequest, CreateOrderResponse, OrderDto, OrderItemDto,
};
pub use error::{ApplicationError, Result};
pub use get_order::GetOrderHandler;
pub use services::{InMemoryStockService, StockValidationService};
