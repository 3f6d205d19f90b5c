//! Create-Order use case.

use std::time::Instant;

use chrono::Utc;
use domain::{OrderFactory, OrderItemInput, OrderNumber};
use order_store::OrderRepository;

use crate::dto::{CreateOrderItemRequest, CreateOrderRequest, OrderDto};
use crate::error::{ApplicationError, Result};
use crate::services::StockValidationService;

pub const OUT_OF_STOCK: &str = "The product is out of stock";
pub const CREATE_FAILED: &str = "Failed to create order. Please try again.";

/// Validates, builds and stores a new order.
///
/// Steps run in order and each may end the request:
/// 1. every requested line is checked against stock,
/// 2. an order number is generated,
/// 3. the factory validates all fields and items together,
/// 4. the order is saved in one atomic write.
///
/// Stock failures are never combined with field validation failures.
pub struct CreateOrderHandler<R, S>
where
    R: OrderRepository,
    S: StockValidationService,
{
    repository: R,
    stock: S,
}

impl<R, S> CreateOrderHandler<R, S>
where
    R: OrderRepository,
    S: StockValidationService,
{
    pub fn new(repository: R, stock: S) -> Self {
        Self { repository, stock }
    }

    /// Creates an order and returns its projection.
    #[tracing::instrument(skip_all, fields(product_count = request.products.len()))]
    pub async fn handle(&self, request: CreateOrderRequest) -> Result<OrderDto> {
        let started = Instant::now();
        let result = self.create(request).await;
        metrics::histogram!("order_create_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        result
    }

    async fn create(&self, request: CreateOrderRequest) -> Result<OrderDto> {
        self.ensure_in_stock(&request.products).await?;

        let order_number = OrderNumber::generate(Utc::now());

        let order = OrderFactory::create(
            order_number.clone(),
            &request.invoice_address,
            &request.invoice_email_address,
            &request.invoice_credit_card_number,
            request.products.iter().map(OrderItemInput::from),
        )
        .map_err(|errors| {
            tracing::warn!(%order_number, %errors, "order rejected by validation");
            metrics::counter!("orders_rejected_total", "reason" => "validation").increment(1);
            ApplicationError::from(errors)
        })?;

        let order = self.repository.add(order).await.map_err(|e| {
            tracing::error!(%order_number, error = %e, "failed to store order");
            metrics::counter!("orders_failed_total").increment(1);
            ApplicationError::internal(CREATE_FAILED, e)
        })?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(%order_number, "order created");

        Ok(OrderDto::from(&order))
    }

    async fn ensure_in_stock(&self, items: &[CreateOrderItemRequest]) -> Result<()> {
        for item in items {
            let in_stock = self
                .stock
                .is_product_in_stock(&item.product_id, item.requested_amount())
                .await?;

            if !in_stock {
                tracing::warn!(
                    product_id = %item.product_id,
                    product_name = %item.product_name,
                    requested_amount = item.product_amount,
                    "product out of stock"
                );
                metrics::counter!("orders_rejected_total", "reason" => "out_of_stock")
                    .increment(1);
                return Err(ApplicationError::validation(OUT_OF_STOCK));
            }
        }
        Ok(())
    }
}
