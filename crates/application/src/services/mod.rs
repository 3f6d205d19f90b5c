//! Ports to external services consumed by the use cases.

pub mod stock;

pub use stock::{InMemoryStockService, StockValidationService};
