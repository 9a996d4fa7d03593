use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

/// A row of `items`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub stock: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewItem {
    pub name: String,
    pub stock: i64,
}

impl NewItem {
    pub fn into_active_model(self, now: DateTimeUtc) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name),
            stock: Set(self.stock),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}
