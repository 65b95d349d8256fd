//! Budget routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use serde::Serialize;
use snt_core::{BudgetRequest, BudgetSummary, OutputRow};
use snt_data::get_country_budgets;
use snt_shared::AppError;
use std::sync::Arc;
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/get_budgets", post(get_budgets))
}

/// Response for a budget request.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Costed rows for every requested year.
    pub rows: Vec<OutputRow>,
    /// Totals over `rows`.
    pub summary: BudgetSummary,
}

/// POST /get_budgets
///
/// Computes the budget on the blocking pool; the engine is CPU-bound and
/// the first request for a country also parses its CSV files.
async fn get_budgets(
    State(state): State<AppState>,
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> Result<Json<BudgetResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let country = request.country.clone();
    let years = (request.start_year, request.end_year);

    let datasets = Arc::clone(&state.datasets);
    let rows = tokio::task::spawn_blocking(move || get_country_budgets(&*datasets, &request))
        .await
        .map_err(|e| AppError::Internal(format!("Budget task failed: {e}")))??;

    let summary = BudgetSummary::from_rows(&rows)?;
    info!(
        country = %country,
        start_year = years.0,
        end_year = years.1,
        rows = rows.len(),
        "Budget request completed"
    );

    Ok(Json(BudgetResponse { rows, summary }))
}
