//! Maps a method and path to a ledger operation.
//!
//! The client id is checked before the route shape: any path whose id segment
//! is not in the roster is `UnknownClient`, even if the path is otherwise
//! meaningless.

use axum::http::Method;
use thiserror::Error;

use crate::ledger::Ledger;
use crate::model::ClientId;

const PREFIX: &str = "/clientes";
const TRANSACTIONS_SUFFIX: &str = "transacoes";
const STATEMENT_SUFFIX: &str = "extrato";

/// Operation selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `POST /clientes/{id}/transacoes`
    Transaction(ClientId),
    /// `GET /clientes/{id}/extrato`
    Statement(ClientId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no client for path {0}")]
    UnknownClient(String),
    #[error("no route for {0} {1}")]
    UnknownRoute(Method, String),
}

/// Resolve a request. `path` excludes the query string.
pub fn resolve(method: &Method, path: &str, ledger: &Ledger) -> Result<Route, RouteError> {
    let client = client_id(path)
        .filter(|id| ledger.exists(*id))
        .ok_or_else(|| RouteError::UnknownClient(path.to_owned()))?;

    if !path.starts_with(PREFIX) {
        return Err(RouteError::UnknownRoute(method.clone(), path.to_owned()));
    }

    if *method == Method::POST && path.ends_with(TRANSACTIONS_SUFFIX) {
        Ok(Route::Transaction(client))
    } else if *method == Method::GET && path.ends_with(STATEMENT_SUFFIX) {
        Ok(Route::Statement(client))
    } else {
        Err(RouteError::UnknownRoute(method.clone(), path.to_owned()))
    }
}

/// Third `/`-separated segment, i.e. the `{id}` in `/clientes/{id}/...`.
///
/// Any integral decimal number is accepted, so `1`, `1.0` and `1e0` all name client 1.
fn client_id(path: &str) -> Option<ClientId> {
    let segment = path.split('/').nth(2)?;
    if let Ok(id) = segment.parse() {
        return Some(id);
    }
    let n: f64 = segment.parse().ok()?;
    let in_range = n.fract() == 0.0 && (0.0..=f64::from(ClientId::MAX)).contains(&n);
    in_range.then_some(n as ClientId)
}
