//! Request handlers for the research API.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use research_pipeline::{ResearchClient, ResearchError};

/// Shared application state: the provider client, built once at startup.
pub struct AppState {
    pub client: ResearchClient,
}

impl AppState {
    pub fn new(client: ResearchClient) -> Self {
        Self { client }
    }
}

pub type SharedState = Arc<AppState>;

// Caller-visible messages, one per taxonomy entry. Locale text belongs to
// the presentation layer, not here.
const ERR_INVALID_QUERY: &str = "invalid query";
const ERR_UPSTREAM: &str = "failed to reach external source";
const ERR_UNEXPECTED: &str = "unexpected error";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /api/research`.
///
/// The body is parsed as a raw JSON value so a malformed body and a missing,
/// non-string, or too-short `query` all map to 400 without reaching the
/// provider.
pub async fn research(State(state): State<SharedState>, body: String) -> Response {
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
    let query = parsed.get("query").and_then(|value| value.as_str());

    let Some(query) = query else {
        return error_response(StatusCode::BAD_REQUEST, ERR_INVALID_QUERY);
    };

    match state.client.research(query).await {
        Ok(response) => Json(response).into_response(),
        Err(ResearchError::InvalidQuery) => {
            error_response(StatusCode::BAD_REQUEST, ERR_INVALID_QUERY)
        }
        Err(error) if error.is_upstream() => {
            tracing::warn!(%error, "search provider call failed");
            error_response(StatusCode::BAD_GATEWAY, ERR_UPSTREAM)
        }
        Err(error) => {
            tracing::error!(%error, "research request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, ERR_UNEXPECTED)
        }
    }
}
