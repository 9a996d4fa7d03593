#![cfg(test)]
use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseBackend, MockDatabase};

use models::{client, item};

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::MySql)
}

pub fn client_row(id: i64, full_name: &str) -> client::Model {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    client::Model {
        id,
        full_name: full_name.to_string(),
        email: "ada@example.com".into(),
        phone: "555-0100".into(),
        created_at: at,
        updated_at: at,
    }
}

pub fn item_row(id: i64, name: &str, stock: i64) -> item::Model {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    item::Model { id, name: name.to_string(), stock, created_at: at, updated_at: at }
}
