use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

/// Row of the `clients` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: String,
    pub age: Option<i32>,
    pub registration_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Client as it travels through requests and responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub patronymic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default)]
    pub registration_date: String,
}

impl From<Model> for Client {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            last_name: m.last_name,
            first_name: m.first_name,
            patronymic: m.patronymic,
            age: m.age,
            registration_date: m.registration_date,
        }
    }
}

impl Client {
    /// Every column except the key, ready for insert or a keyed update.
    fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            last_name: Set(self.last_name.clone()),
            first_name: Set(self.first_name.clone()),
            patronymic: Set(self.patronymic.clone()),
            age: Set(self.age),
            registration_date: Set(self.registration_date.clone()),
        }
    }
}

/// Exact match on `last_name`.
pub async fn list_by_last_name(db: &DatabaseConnection, last_name: &str) -> Result<Vec<Client>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::LastName.eq(last_name))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Client::from).collect())
}

/// Persist under a freshly generated id and return it.
pub async fn insert(db: &DatabaseConnection, client: &Client) -> Result<String, errors::ModelError> {
    let id = Uuid::new_v4().to_string();
    let mut am = client.to_active_model();
    am.id = Set(id.clone());
    Entity::insert(am).exec_without_returning(db).await?;
    Ok(id)
}

/// Overwrite all non-key columns of the row keyed by `id`. Returns rows affected.
pub async fn update(db: &DatabaseConnection, id: &str, client: &Client) -> Result<u64, errors::ModelError> {
    let res = Entity::update_many()
        .set(client.to_active_model())
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Returns rows affected.
pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id.to_owned()).exec(db).await?;
    Ok(res.rows_affected)
}
