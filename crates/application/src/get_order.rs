//! Get-Order use case.

use order_store::OrderRepository;

use crate::dto::OrderDto;
use crate::error::{ApplicationError, Result};

/// Looks up an order by its order number.
pub struct GetOrderHandler<R: OrderRepository> {
    repository: R,
}

impl<R: OrderRepository> GetOrderHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, order_number: &str) -> Result<OrderDto> {
        match self.repository.get_by_order_number(order_number).await {
            Ok(Some(order)) => {
                metrics::counter!("orders_retrieved_total").increment(1);
                Ok(OrderDto::from(&order))
            }
            Ok(None) => {
                metrics::counter!("orders_not_found_total").increment(1);
                tracing::info!("order not found");
                Err(ApplicationError::not_found(order_number))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load order");
                Err(ApplicationError::internal(
                    format!("Failed to retrieve order {order_number}"),
                    e,
                ))
            }
        }
    }
}
