use async_trait::async_trait;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use common::OrderId;
use domain::Order;

use crate::Result;

/// Core trait for order persistence.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists a new order together with all of its items.
    ///
    /// The write is atomic: either the order and every item are stored, or
    /// nothing is. This is where the creation timestamp is recorded; the
    /// returned order carries it. Fails with `DuplicateOrderNumber` if the
    /// order number is already taken.
    async fn add(&self, order: Order) -> Result<Order>;

    /// Retrieves an order by its internal id.
    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Retrieves an order by its customer-facing order number.
    async fn get_by_order_number(&self, order_number: &str) -> Result<Option<Order>>;

    /// Retrieves all orders, newest first.
    async fn list(&self) -> Result<Vec<Order>>;
}

/// Records the creation time on an order about to be written and returns it.
///
/// Truncated to microseconds, the precision of `timestamptz`, so an order
/// reads back exactly as it was returned from `add`.
pub(crate) fn stamp_created_at(order: &mut Order) -> DateTime<Utc> {
    let now = Utc::now();
    let now = now
        .duration_trunc(TimeDelta::microseconds(1))
        .unwrap_or(now);
    order.record_created_at(now);
    order.created_at().unwrap_or(now)
}

/// Sort key for listing: newest first, ties broken by the time-ordered id.
pub(crate) fn newest_first(a: &Order, b: &Order) -> std::cmp::Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| b.id().cmp(&a.id()))
}
