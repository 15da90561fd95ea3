//! Error types for the HTTP API.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use qsim_adapter_sim::SimError;
use qsim_hal::HalError;
use qsim_ir::IrError;
use serde::Serialize;

/// API error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request or out-of-range option.
    #[error("{0}")]
    BadRequest(String),

    /// Circuit failed validation.
    #[error(transparent)]
    Validation(#[from] IrError),

    /// Engine refused or failed the run.
    #[error(transparent)]
    Simulation(#[from] SimError),

    /// Hardware provider failure.
    #[error(transparent)]
    Provider(#[from] HalError),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Simulation(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Simulation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Provider(HalError::JobNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Provider(
                HalError::UnknownBackend(_)
                | HalError::InvalidCircuit(_)
                | HalError::CircuitTooLarge(_),
            ) => StatusCode::BAD_REQUEST,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
