use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};

use models::{Action, EntityKind};
use service::ServiceError;

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "market_registry_requests_total",
        "Entity requests by outcome",
        &["entity", "action", "outcome"]
    )
    .expect("register requests_total")
});

pub static REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "market_registry_request_duration_seconds",
        "Entity request duration in seconds",
        &["entity", "action"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("register request_duration")
});

/// Outcome label for one pipeline result.
pub fn outcome<T>(result: &Result<T, ServiceError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ServiceError::Decode(_)) => "decode_error",
        Err(ServiceError::Validation(_)) => "validation_error",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::Db(_) | ServiceError::Serialization(_)) => "storage_error",
    }
}

pub fn observe<T>(kind: EntityKind, action: Action, result: &Result<T, ServiceError>, seconds: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[kind.as_str(), action.as_str(), outcome(result)])
        .inc();
    REQUEST_DURATION
        .with_label_values(&[kind.as_str(), action.as_str()])
        .observe(seconds);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_requests_show_up_in_text_output() {
        let ok: Result<(), ServiceError> = Ok(());
        observe(EntityKind::Market, Action::List, &ok, 0.002);
        let (status, text) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("market_registry_requests_total"));
        assert!(text.contains(r#"outcome="ok""#));
    }

    #[test]
    fn outcome_labels() {
        let nf: Result<(), ServiceError> = Err(ServiceError::not_found("market", "x"));
        assert_eq!(outcome(&nf), "not_found");
        let db: Result<(), ServiceError> = Err(ServiceError::Db("down".into()));
        assert_eq!(outcome(&db), "storage_error");
    }
}
