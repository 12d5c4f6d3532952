//! Storage engine: one façade for every entity kind.
//!
//! Callers hand over a [`Record`] and never pick a table or query themselves;
//! each backend dispatches on the variant. Backends do no validation.

use async_trait::async_trait;
use models::Record;

use crate::errors::ServiceError;

pub mod memory;
pub mod seaorm;

pub use memory::MemoryStorage;
pub use seaorm::SeaOrmStorage;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Rows whose filter field equals the one carried by `filter`. Empty when nothing matches.
    async fn get_list(&self, filter: &Record) -> Result<Vec<Record>, ServiceError>;
    /// Persist under a freshly generated id and return it.
    async fn insert(&self, record: &Record) -> Result<String, ServiceError>;
    /// Overwrite every non-id field of the row keyed by `record`'s id.
    /// `NotFound` when no row has that id.
    async fn update(&self, record: &Record) -> Result<(), ServiceError>;
    /// `NotFound` when no row has that id.
    async fn delete(&self, record: &Record) -> Result<(), ServiceError>;
}

/// Id of a record bound for update/delete.
pub(crate) fn required_id(record: &Record) -> Result<&str, ServiceError> {
    match record.id() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ServiceError::Validation(models::ValidationError::MissingField { field: "id" })),
    }
}

/// Turn an affected-row count into the update/delete outcome.
pub(crate) fn expect_affected(record: &Record, id: &str, rows: u64) -> Result<(), ServiceError> {
    if rows == 0 {
        return Err(ServiceError::not_found(record.kind().as_str(), id));
    }
    Ok(())
}
