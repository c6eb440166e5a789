//! HTTP boundary.
//!
//! The whole surface goes through one fallback handler so the client id can be
//! checked before the route shape, which axum's path router cannot express.

use std::any::Any;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::ledger::Ledger;
use crate::model::ClientId;
use crate::router::{self, Route};
use crate::validation::{self, RawTransaction};

pub mod dto;
pub mod error;

pub use error::ApiError;

/// Largest transaction body read. A valid one is well under 100 bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the HTTP app around an existing ledger.
pub fn build_app(ledger: Arc<Ledger>) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(ledger)
}

async fn dispatch(
    State(ledger): State<Arc<Ledger>>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Result<Response, ApiError> {
    // Resolve before touching the body so unknown clients and routes are always 404.
    match router::resolve(&method, uri.path(), &ledger)? {
        Route::Transaction(client) => {
            let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
                .await
                .map_err(|e| ApiError::MalformedBody(e.to_string()))?;
            post_transaction(&ledger, client, &body)
        }
        Route::Statement(client) => get_statement(&ledger, client),
    }
}

fn post_transaction(ledger: &Ledger, client: ClientId, body: &[u8]) -> Result<Response, ApiError> {
    let raw = decode_body(body)?;
    let tx = validation::validate(&raw)?;
    let receipt = ledger.apply(client, tx)?;
    Ok((StatusCode::OK, Json(dto::ReceiptResponse::from(receipt))).into_response())
}

fn get_statement(ledger: &Ledger, client: ClientId) -> Result<Response, ApiError> {
    let statement = ledger.statement(client)?;
    Ok((StatusCode::OK, Json(dto::StatementResponse::from(statement))).into_response())
}

/// The body must be a JSON object; field checks are left to the validator.
fn decode_body(body: &[u8]) -> Result<RawTransaction, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
    if !value.is_object() {
        return Err(ApiError::MalformedBody(format!("expected object, got {value}")));
    }
    serde_json::from_value(value).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "request handler panicked");
    error::empty_json(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_body_requires_object() {
        assert!(decode_body(br#"{"valor": 1}"#).is_ok());
        assert!(matches!(
            decode_body(br#"[1, "c", "x"]"#),
            Err(ApiError::MalformedBody(_))
        ));
        assert!(matches!(decode_body(b""), Err(ApiError::MalformedBody(_))));
        assert!(matches!(
            decode_body(b"{not json"),
            Err(ApiError::MalformedBody(_))
        ));
    }

    #[test]
    fn panic_becomes_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
