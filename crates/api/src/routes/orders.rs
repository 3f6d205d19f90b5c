//! Order intake endpoints.

use std::sync::Arc;

use application::{
    CreateOrderHandler, CreateOrderRequest, CreateOrderResponse, GetOrderHandler, OrderDto,
    StockValidationService,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use order_store::OrderRepository;

use crate::error::ApiError;

type Created = (
    StatusCode,
    [(header::HeaderName, String); 1],
    Json<CreateOrderResponse>,
);

/// Shared application state accessible from all handlers.
pub struct AppState<R, S>
where
    R: OrderRepository,
    S: StockValidationService,
{
    pub create_order: CreateOrderHandler<R, S>,
    pub get_order: GetOrderHandler<R>,
    pub expose_error_detail: bool,
}

impl<R, S> AppState<R, S>
where
    R: OrderRepository + Clone,
    S: StockValidationService,
{
    pub fn new(repository: R, stock: S, expose_error_detail: bool) -> Self {
        Self {
            create_order: CreateOrderHandler::new(repository.clone(), stock),
            get_order: GetOrderHandler::new(repository),
            expose_error_detail,
        }
    }
}

/// POST /api/orders: validate stock and input, then store a new order.
#[tracing::instrument(skip_all)]
pub async fn create<R, S>(
    State(state): State<Arc<AppState<R, S>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Created, ApiError>
where
    R: OrderRepository + 'static,
    S: StockValidationService + 'static,
{
    let Json(request) = payload?;
    tracing::info!(product_count = request.products.len(), "creating order");

    let order = state
        .create_order
        .handle(request)
        .await
        .map_err(|e| ApiError::application(e, state.expose_error_detail))?;

    let location = format!("/api/orders/{}", order.order_number);
    let response = CreateOrderResponse {
        order_number: order.order_number,
    };

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

/// GET /api/orders/{orderNumber}: load an order by its order number.
#[tracing::instrument(skip(state))]
pub async fn get<R, S>(
    State(state): State<Arc<AppState<R, S>>>,
    Path(order_number): Path<String>,
) -> Result<Json<OrderDto>, ApiError>
where
    R: OrderRepository + 'static,
    S: StockValidationService + 'static,
{
    let order = state
        .get_order
        .handle(&order_number)
        .await
        .map_err(|e| ApiError::application(e, state.expose_error_detail))?;

    Ok(Json(order))
}
