use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use models::Action;
use service::ServiceError;

/// JSON error body: `{"error": <title>, "detail": <optional>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not found", Some(detail.into()))
    }

    /// Map a pipeline failure for `action`. Storage-class failures get a
    /// generic per-action title and no detail; the cause is only logged.
    pub fn from_service(action: Action, err: &ServiceError) -> Self {
        match err {
            ServiceError::Decode(msg) => Self::new(StatusCode::BAD_REQUEST, "wrong json", Some(msg.clone())),
            ServiceError::Validation(v) => Self::new(StatusCode::BAD_REQUEST, "validation fail", Some(v.to_string())),
            ServiceError::NotFound(msg) => Self::not_found(msg.clone()),
            ServiceError::Db(_) | ServiceError::Serialization(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, storage_title(action), None)
            }
        }
    }
}

fn storage_title(action: Action) -> &'static str {
    match action {
        Action::List => "get list error",
        Action::Create => "insert error",
        Action::Update => "update error",
        Action::Delete => "delete error",
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.title, detail: self.detail.as_deref() };
        (self.status, Json(body)).into_response()
    }
}
