use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::{OrderRepository, newest_first, stamp_created_at},
};

#[derive(Default)]
struct InMemoryState {
    orders: HashMap<OrderId, Order>,
    by_order_number: HashMap<String, OrderId>,
}

/// In-memory order repository for testing and local runs.
///
/// Provides the same interface and uniqueness guarantees as the PostgreSQL
/// implementation. Each `add` happens under a single write lock, so a
/// cancelled caller either stored the whole order or nothing.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Removes all orders.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.orders.clear();
        state.by_order_number.clear();
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    #[tracing::instrument(skip_all, fields(order_number = %order.order_number()))]
    async fn add(&self, mut order: Order) -> Result<Order> {
        let mut state = self.state.write().await;

        let order_number = order.order_number().as_str().to_string();
        if state.by_order_number.contains_key(&order_number) {
            return Err(StoreError::DuplicateOrderNumber(order_number));
        }

        stamp_created_at(&mut order);
        state.by_order_number.insert(order_number, order.id());
        state.orders.insert(order.id(), order.clone());

        Ok(order)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.state.read().await.orders.get(&id).cloned())
    }

    async fn get_by_order_number(&self, order_number: &str) -> Result<Option<Order>> {
        let state = self.state.read().await;
        Ok(state
            .by_order_number
            .get(order_number)
            .and_then(|id| state.orders.get(id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.state.read().await.orders.values().cloned().collect();
        orders.sort_by(newest_first);
        Ok(orders)
    }
}
