use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};

/// A row of `clients`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "fullname")]
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Body of a create request. Absent fields decode as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewClient {
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl NewClient {
    /// Both timestamps get `now`; the id is left for the database.
    pub fn into_active_model(self, now: DateTimeUtc) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            full_name: Set(self.full_name),
            email: Set(self.email),
            phone: Set(self.phone),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}
