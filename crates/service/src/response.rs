//! Shaping storage results into response bodies.

use serde::Serialize;

use models::Record;

use crate::errors::ServiceError;

/// Status marker returned by update and delete.
pub const SUCCESS: &str = "success";

#[derive(Debug, Serialize)]
pub struct IdResponse<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Each record serialized on its own and appended back to back, with no
/// enclosing array and no separator. No records gives an empty body.
pub fn concat_records(records: &[Record]) -> Result<Vec<u8>, ServiceError> {
    let mut body = Vec::new();
    for record in records {
        body.extend(record.to_json_bytes()?);
    }
    Ok(body)
}

/// `{"id": "<id>"}`
pub fn id_body(id: &str) -> Result<Vec<u8>, ServiceError> {
    Ok(serde_json::to_vec(&IdResponse { id })?)
}

/// `{"status": "success"}`
pub fn status_body() -> Result<Vec<u8>, ServiceError> {
    Ok(serde_json::to_vec(&StatusResponse { status: SUCCESS })?)
}
