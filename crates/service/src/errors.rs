use thiserror::Error;

use models::{errors::ModelError, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Decode(msg) => ServiceError::Decode(msg),
            ModelError::Validation(v) => ServiceError::Validation(v),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self { ServiceError::Serialization(e.to_string()) }
}
