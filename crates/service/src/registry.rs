use std::marker::PhantomData;

use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, IntoActiveModel, QueryOrder,
    QuerySelect,
};
use tracing::{debug, error, info};

use crate::{errors::ServiceError, pagination::Window, resource::Resource};

/// Create/list operations over one table.
///
/// Holds the shared pool handle. Callers share the service through `Arc`.
pub struct RegistryService<E: Resource> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> RegistryService<E>
where
    E: Resource,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _entity: PhantomData }
    }

    fn table() -> String {
        E::default().table_name().to_owned()
    }

    /// Insert one record and return it as stored, generated id included.
    pub async fn create(&self, input: E::Input) -> Result<E::Model, ServiceError> {
        let am = E::new_record(input, Utc::now());
        match am.insert(&self.db).await {
            Ok(model) => {
                info!(table = %Self::table(), "record created");
                Ok(model)
            }
            Err(e) => {
                error!(table = %Self::table(), error = %e, "insert failed");
                Err(e.into())
            }
        }
    }

    /// Rows inside `window`, ordered by the resource's order column.
    ///
    /// A zero limit returns nothing without querying. Any row that fails to
    /// decode fails the whole call.
    pub async fn list(&self, window: Window) -> Result<Vec<E::Model>, ServiceError> {
        if window.is_empty() {
            return Ok(Vec::new());
        }
        let rows = E::find()
            .order_by_asc(E::order_column())
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!(table = %Self::table(), error = %e, "list failed");
                ServiceError::from(e)
            })?;
        debug!(
            table = %Self::table(),
            offset = window.offset,
            limit = window.limit,
            count = rows.len(),
            "listed records"
        );
        Ok(rows)
    }
}
