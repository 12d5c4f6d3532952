use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument, warn};

use models::{client, market, Record};

use super::{expect_affected, required_id, Storage};
use crate::errors::ServiceError;

/// PostgreSQL-backed storage; per-kind SQL lives in `models::client` / `models::market`.
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub db: DatabaseConnection,
}

impl SeaOrmStorage {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    #[instrument(skip_all, fields(table = filter.kind().table()))]
    async fn get_list(&self, filter: &Record) -> Result<Vec<Record>, ServiceError> {
        let rows = match filter {
            Record::Client(c) => client::list_by_last_name(&self.db, &c.last_name)
                .await
                .map(|list| list.into_iter().map(Record::Client).collect::<Vec<_>>()),
            Record::Market(m) => market::list_by_name(&self.db, &m.name)
                .await
                .map(|list| list.into_iter().map(Record::Market).collect::<Vec<_>>()),
        };
        let rows = rows.map_err(|e| { warn!(error = %e, "failed to list rows"); ServiceError::from(e) })?;
        debug!(count = rows.len(), "listed rows");
        Ok(rows)
    }

    #[instrument(skip_all, fields(table = record.kind().table()))]
    async fn insert(&self, record: &Record) -> Result<String, ServiceError> {
        let id = match record {
            Record::Client(c) => client::insert(&self.db, c).await,
            Record::Market(m) => market::insert(&self.db, m).await,
        };
        id.map_err(|e| { warn!(error = %e, "failed to insert row"); ServiceError::from(e) })
    }

    #[instrument(skip_all, fields(table = record.kind().table()))]
    async fn update(&self, record: &Record) -> Result<(), ServiceError> {
        let id = required_id(record)?;
        let rows = match record {
            Record::Client(c) => client::update(&self.db, id, c).await,
            Record::Market(m) => market::update(&self.db, id, m).await,
        };
        let rows = rows.map_err(|e| { warn!(error = %e, %id, "failed to update row"); ServiceError::from(e) })?;
        expect_affected(record, id, rows)
    }

    #[instrument(skip_all, fields(table = record.kind().table()))]
    async fn delete(&self, record: &Record) -> Result<(), ServiceError> {
        let id = required_id(record)?;
        let rows = match record {
            Record::Client(_) => client::delete(&self.db, id).await,
            Record::Market(_) => market::delete(&self.db, id).await,
        };
        let rows = rows.map_err(|e| { warn!(error = %e, %id, "failed to delete row"); ServiceError::from(e) })?;
        expect_affected(record, id, rows)
    }
}
