//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Budget routes (`POST /get_budgets`)
//! - Liveness routes (`GET /test`, `GET /health`)
//! - The `{"error": ...}` response envelope

pub mod error;
pub mod routes;

use axum::Router;
use snt_data::DatasetProvider;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of per-country reference datasets.
    pub datasets: Arc<dyn DatasetProvider>,
}

impl AppState {
    /// Creates state over a dataset provider.
    pub fn new(datasets: impl DatasetProvider + 'static) -> Self {
        Self {
            datasets: Arc::new(datasets),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
