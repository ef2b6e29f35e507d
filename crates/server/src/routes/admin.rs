use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    http::{StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Percent-decoded `api_key` query parameter.
fn key_from_query(uri: &Uri) -> Option<String> {
    let Query(mut params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.remove("api_key")
}

/// Middleware: require a configured admin key in `X-API-Key` (or query `api_key`).
pub async fn require_api_key(State(state): State<ServerState>, req: Request, next: Next) -> Response {
    let key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| key_from_query(req.uri()));

    match key {
        Some(k) if !k.trim().is_empty() && state.admin_keys.contains(&k) => next.run(req).await,
        Some(_) => {
            warn!(path = %req.uri().path(), "rejected admin request with unknown key");
            unauthorized()
        }
        None => unauthorized(),
    }
}

fn unauthorized() -> Response {
    JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some("missing or invalid admin key".into())).into_response()
}
