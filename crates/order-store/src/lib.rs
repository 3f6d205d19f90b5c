//! Persistence for orders.
//!
//! Provides the [`OrderRepository`] port consumed by the application layer
//! together with an in-memory implementation for tests and local runs, and
//! a PostgreSQL implementation backed by sqlx.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;
pub use store::OrderRepository;
