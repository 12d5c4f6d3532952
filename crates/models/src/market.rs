use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

/// Row of the `markets` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "markets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub address: String,
    pub active: bool,
    pub owner: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl From<Model> for Market {
    fn from(m: Model) -> Self {
        Self { id: Some(m.id), name: m.name, address: m.address, active: m.active, owner: m.owner }
    }
}

impl Market {
    fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name.clone()),
            address: Set(self.address.clone()),
            active: Set(self.active),
            owner: Set(self.owner.clone()),
        }
    }
}

pub async fn list_by_name(db: &DatabaseConnection, name: &str) -> Result<Vec<Market>, errors::ModelError> {
    let rows = Entity::find().filter(Column::Name.eq(name)).all(db).await?;
    Ok(rows.into_iter().map(Market::from).collect())
}

pub async fn insert(db: &DatabaseConnection, market: &Market) -> Result<String, errors::ModelError> {
    let id = Uuid::new_v4().to_string();
    let mut am = market.to_active_model();
    am.id = Set(id.clone());
    Entity::insert(am).exec_without_returning(db).await?;
    Ok(id)
}

pub async fn update(db: &DatabaseConnection, id: &str, market: &Market) -> Result<u64, errors::ModelError> {
    let res = Entity::update_many()
        .set(market.to_active_model())
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id.to_owned()).exec(db).await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_omitted_when_absent() {
        let m = Market { name: "Corner".into(), address: "Main St".into(), active: true, ..Market::default() };
        let body = serde_json::to_string(&m).expect("serialize");
        assert_eq!(body, r#"{"name":"Corner","address":"Main St","active":true}"#);
    }

    #[test]
    fn list_filter_decodes_with_defaults() {
        let m: Market = serde_json::from_str(r#"{"name":"Corner"}"#).expect("decode");
        assert_eq!(m.name, "Corner");
        assert!(!m.active);
        assert!(m.owner.is_none());
    }
}
