use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use models::{Action, EntityKind};

use crate::errors::JsonApiError;
use crate::metrics;
use crate::state::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> (StatusCode, String) {
    metrics::encode_metrics()
}

/// `POST /:entity/:action` with a JSON body.
pub async fn entity_action(
    State(state): State<ServerState>,
    Path((entity, action)): Path<(String, String)>,
    body: Bytes,
) -> Result<Response, JsonApiError> {
    let kind: EntityKind = entity.parse().map_err(JsonApiError::not_found)?;
    let action: Action = action.parse().map_err(JsonApiError::not_found)?;

    let started = Instant::now();
    let result = state.records.handle(kind, action, &body).await;
    metrics::observe(kind, action, &result, started.elapsed().as_secs_f64());

    match result {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response()),
        Err(e) => Err(JsonApiError::from_service(action, &e)),
    }
}

/// Build the full application router: entity actions plus health and metrics.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/:entity/:action", post(entity_action))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
