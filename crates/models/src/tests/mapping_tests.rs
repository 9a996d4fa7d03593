use chrono::{TimeZone, Utc};
use sea_orm::entity::prelude::{EntityName, IdenStatic};
use sea_orm::ActiveValue;

use crate::{client, item};

#[test]
fn tables_and_columns_match_existing_schema() {
    assert_eq!(client::Entity.table_name(), "clients");
    assert_eq!(item::Entity.table_name(), "items");
    assert_eq!(client::Column::FullName.as_str(), "fullname");
    assert_eq!(client::Column::CreatedAt.as_str(), "created_at");
    assert_eq!(item::Column::Stock.as_str(), "stock");
}

#[test]
fn new_client_tolerates_missing_and_extra_fields() {
    let input: client::NewClient =
        serde_json::from_str(r#"{"fullname":"Ada Lovelace","nickname":"ada"}"#).unwrap();
    assert_eq!(input.full_name, "Ada Lovelace");
    assert_eq!(input.email, "");
    assert_eq!(input.phone, "");
}

#[test]
fn new_client_sets_both_timestamps_and_leaves_id_to_storage() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let am = client::NewClient {
        full_name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        phone: "555-0100".into(),
    }
    .into_active_model(now);

    assert_eq!(am.id, ActiveValue::NotSet);
    assert_eq!(am.full_name, ActiveValue::Set("Ada Lovelace".to_string()));
    assert_eq!(am.created_at, ActiveValue::Set(now));
    assert_eq!(am.updated_at, ActiveValue::Set(now));
}

#[test]
fn new_item_defaults_stock_to_zero() {
    let input: item::NewItem = serde_json::from_str(r#"{"name":"bolt"}"#).unwrap();
    assert_eq!(input, item::NewItem { name: "bolt".into(), stock: 0 });

    let now = Utc::now();
    let am = input.into_active_model(now);
    assert_eq!(am.stock, ActiveValue::Set(0));
    assert_eq!(am.created_at, am.updated_at);
}

#[test]
fn client_serializes_with_wire_names() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let model = client::Model {
        id: 7,
        full_name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        phone: "555-0100".into(),
        created_at: now,
        updated_at: now,
    };
    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["fullname"], "Ada Lovelace");
    assert_eq!(json["created_at"], "2024-05-01T12:00:00Z");
    assert!(json.get("full_name").is_none());
}
