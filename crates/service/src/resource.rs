//! Per-entity description used by the generic registry.

use chrono::{DateTime, Utc};
use sea_orm::EntityTrait;
use serde::de::DeserializeOwned;

use models::{client, item};

/// An entity the registry can create and list.
pub trait Resource: EntityTrait + Send + Sync + 'static {
    /// Decoded body of a create request.
    type Input: DeserializeOwned + Send + 'static;

    /// Element name of one record in tree-shaped encodings.
    const ELEMENT: &'static str;
    /// Element name wrapping a list of records.
    const COLLECTION: &'static str;

    /// Active model to insert. Both timestamps are set to `now`.
    fn new_record(input: Self::Input, now: DateTime<Utc>) -> Self::ActiveModel;

    /// Column giving list results a stable order.
    fn order_column() -> Self::Column;
}

impl Resource for client::Entity {
    type Input = client::NewClient;

    const ELEMENT: &'static str = "client";
    const COLLECTION: &'static str = "clients";

    fn new_record(input: Self::Input, now: DateTime<Utc>) -> Self::ActiveModel {
        input.into_active_model(now)
    }

    fn order_column() -> Self::Column {
        client::Column::Id
    }
}

impl Resource for item::Entity {
    type Input = item::NewItem;

    const ELEMENT: &'static str = "item";
    const COLLECTION: &'static str = "items";

    fn new_record(input: Self::Input, now: DateTime<Utc>) -> Self::ActiveModel {
        input.into_active_model(now)
    }

    fn order_column() -> Self::Column {
        item::Column::Id
    }
}
