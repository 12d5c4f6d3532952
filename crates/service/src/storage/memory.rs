use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::{Client, Market, Record};

use super::{expect_affected, required_id, Storage};
use crate::errors::ServiceError;

/// In-process storage with the same contract as [`super::SeaOrmStorage`].
///
/// Rows keep insertion order, so list results come back in the order they
/// were created.
#[derive(Default)]
pub struct MemoryStorage {
    clients: RwLock<Vec<Client>>,
    markets: RwLock<Vec<Market>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_list(&self, filter: &Record) -> Result<Vec<Record>, ServiceError> {
        let rows: Vec<Record> = match filter {
            Record::Client(c) => self.clients.read().await
                .iter()
                .filter(|row| row.last_name == c.last_name)
                .cloned()
                .map(Record::Client)
                .collect(),
            Record::Market(m) => self.markets.read().await
                .iter()
                .filter(|row| row.name == m.name)
                .cloned()
                .map(Record::Market)
                .collect(),
        };
        Ok(rows)
    }

    async fn insert(&self, record: &Record) -> Result<String, ServiceError> {
        let id = Uuid::new_v4().to_string();
        match record {
            Record::Client(c) => self.clients.write().await.push(Client { id: Some(id.clone()), ..c.clone() }),
            Record::Market(m) => self.markets.write().await.push(Market { id: Some(id.clone()), ..m.clone() }),
        }
        Ok(id)
    }

    async fn update(&self, record: &Record) -> Result<(), ServiceError> {
        let id = required_id(record)?;
        let mut rows = 0;
        match record {
            Record::Client(c) => {
                for row in self.clients.write().await.iter_mut().filter(|row| row.id.as_deref() == Some(id)) {
                    *row = Client { id: row.id.clone(), ..c.clone() };
                    rows += 1;
                }
            }
            Record::Market(m) => {
                for row in self.markets.write().await.iter_mut().filter(|row| row.id.as_deref() == Some(id)) {
                    *row = Market { id: row.id.clone(), ..m.clone() };
                    rows += 1;
                }
            }
        }
        expect_affected(record, id, rows)
    }

    async fn delete(&self, record: &Record) -> Result<(), ServiceError> {
        let id = required_id(record)?;
        let rows = match record {
            Record::Client(_) => {
                let mut clients = self.clients.write().await;
                let before = clients.len();
                clients.retain(|row| row.id.as_deref() != Some(id));
                before - clients.len()
            }
            Record::Market(_) => {
                let mut markets = self.markets.write().await;
                let before = markets.len();
                markets.retain(|row| row.id.as_deref() != Some(id));
                before - markets.len()
            }
        };
        expect_affected(record, id, rows as u64)
    }
}
