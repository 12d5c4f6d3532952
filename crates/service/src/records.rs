use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use models::{Action, EntityKind, Record};

use crate::errors::ServiceError;
use crate::response;
use crate::storage::Storage;

/// Request pipeline shared by every entity kind: decode, validate, hand the
/// record to storage, shape the result.
#[derive(Clone)]
pub struct RecordService {
    storage: Arc<dyn Storage>,
}

impl RecordService {
    pub fn new(storage: Arc<dyn Storage>) -> Self { Self { storage } }

    /// Run one action on one entity kind and return the response body.
    ///
    /// Validation runs on the raw payload before any storage call, so a
    /// rejected payload never reaches the database.
    #[instrument(skip(self, payload), fields(entity = %kind, action = %action))]
    pub async fn handle(&self, kind: EntityKind, action: Action, payload: &[u8]) -> Result<Vec<u8>, ServiceError> {
        let record = Record::decode(kind, payload).map_err(|e| {
            warn!(error = %e, "decode failed");
            ServiceError::from(e)
        })?;
        kind.validate(action, payload).map_err(|e| {
            warn!(error = %e, field = e.field().unwrap_or("-"), "validation failed");
            ServiceError::from(e)
        })?;

        let result = match action {
            Action::List => self.run_list(&record).await,
            Action::Create => self.run_create(&record).await,
            Action::Update => self.run_update(&record).await,
            Action::Delete => self.run_delete(&record).await,
        };
        if let Err(e) = &result {
            warn!(error = %e, "request failed");
        }
        result
    }

    pub async fn list(&self, kind: EntityKind, payload: &[u8]) -> Result<Vec<u8>, ServiceError> {
        self.handle(kind, Action::List, payload).await
    }

    pub async fn create(&self, kind: EntityKind, payload: &[u8]) -> Result<Vec<u8>, ServiceError> {
        self.handle(kind, Action::Create, payload).await
    }

    pub async fn update(&self, kind: EntityKind, payload: &[u8]) -> Result<Vec<u8>, ServiceError> {
        self.handle(kind, Action::Update, payload).await
    }

    pub async fn delete(&self, kind: EntityKind, payload: &[u8]) -> Result<Vec<u8>, ServiceError> {
        self.handle(kind, Action::Delete, payload).await
    }

    async fn run_list(&self, filter: &Record) -> Result<Vec<u8>, ServiceError> {
        let rows = self.storage.get_list(filter).await?;
        debug!(filter = filter.filter_value(), rows = rows.len(), "listed");
        response::concat_records(&rows)
    }

    async fn run_create(&self, record: &Record) -> Result<Vec<u8>, ServiceError> {
        let id = self.storage.insert(record).await?;
        info!(id = %id, "created");
        response::id_body(&id)
    }

    async fn run_update(&self, record: &Record) -> Result<Vec<u8>, ServiceError> {
        self.storage.update(record).await?;
        info!(id = record.id().unwrap_or_default(), "updated");
        response::status_body()
    }

    async fn run_delete(&self, record: &Record) -> Result<Vec<u8>, ServiceError> {
        self.storage.delete(record).await?;
        info!(id = record.id().unwrap_or_default(), "deleted");
        response::status_body()
    }
}
