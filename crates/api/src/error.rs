//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use snt_core::{BudgetError, ErrorKind};
use snt_data::DataError;
use snt_shared::AppError;
use tracing::error;

/// An [`AppError`] rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        Self(budget_error(&err))
    }
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        Self(data_error(&err))
    }
}

fn budget_error(err: &BudgetError) -> AppError {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::Validation => AppError::Validation(message),
        ErrorKind::Lookup => AppError::NotFound(message),
        ErrorKind::Configuration => AppError::Configuration(message),
    }
}

fn data_error(err: &DataError) -> AppError {
    match err {
        DataError::Budget(err) => budget_error(err),
        DataError::Shared(err) => data_error(err),
        DataError::UnknownCountry(_) => AppError::NotFound(err.to_string()),
        DataError::InvalidCountry(_) => AppError::Validation(err.to_string()),
        DataError::Io { .. }
        | DataError::Csv { .. }
        | DataError::MissingColumn { .. }
        | DataError::InvalidValue { .. } => AppError::Dataset(err.to_string()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error!(code = self.0.error_code(), error = %self.0, "Request failed");

        (status, Json(json!({ "error": self.0.message() }))).into_response()
    }
}
