use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}
