//! Mapping of every failure to the HTTP response the service returns for it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::ledger::LedgerError;
use crate::router::RouteError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("malformed body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Route(_) | ApiError::Ledger(LedgerError::UnknownClient(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::MalformedBody(_)
            | ApiError::Validation(_)
            | ApiError::Ledger(LedgerError::NonPositiveAmount(_))
            | ApiError::Ledger(LedgerError::LimitExceeded { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(status = status.as_u16(), reason = %self, "request refused");
        empty_json(status)
    }
}

/// `{}` with the given status. Every non-success response has this body.
pub fn empty_json(status: StatusCode) -> Response {
    (status, Json(json!({}))).into_response()
}
