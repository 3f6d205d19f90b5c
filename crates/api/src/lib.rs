//! HTTP API server with observability for the order intake service.
//!
//! Provides REST endpoints for creating and retrieving orders, with
//! structured logging (tracing), Prometheus metrics and problem-body errors.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use application::{InMemoryStockService, StockValidationService};
use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::OrderRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R, S>(state: Arc<AppState<R, S>>, metrics_handle: PrometheusHandle) -> Router
where
    R: OrderRepository + 'static,
    S: StockValidationService + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/orders", post(routes::orders::create::<R, S>))
        .route(
            "/api/orders/{order_number}",
            get(routes::orders::get::<R, S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over `repository` with the demo stock catalogue.
pub fn create_default_state<R>(
    repository: R,
    expose_error_detail: bool,
) -> Arc<AppState<R, InMemoryStockService>>
where
    R: OrderRepository + Clone,
{
    Arc::new(AppState::new(
        repository,
        InMemoryStockService::demo(),
        expose_error_detail,
    ))
}
