use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, DbConn, EntityTrait, IdenStatic, IntoActiveModel, Iterable,
    PrimaryKeyToColumn, PrimaryKeyTrait,
};

use gazette_core::error::StoreError;
use gazette_core::ports::BaseStore;

/// Generic PostgreSQL store implementation, one instance per entity.
///
/// The connection is shared, not cloned; every store built from the same
/// pool holds the same `Arc`.
pub struct PostgresBaseStore<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseStore<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseStore<T, ID> for PostgresBaseStore<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, StoreError> {
        let result = E::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    /// Upsert: domain entities always carry their id, so the write is an
    /// insert that falls back to updating every non-key column when the
    /// row already exists.
    async fn save(&self, entity: T) -> Result<T, StoreError> {
        let active_model: E::ActiveModel = entity.into();

        let key_names: Vec<String> = E::PrimaryKey::iter()
            .map(|pk| pk.into_column().as_str().to_owned())
            .collect();
        let mut on_conflict =
            OnConflict::columns(E::PrimaryKey::iter().map(PrimaryKeyToColumn::into_column));
        on_conflict.update_columns(
            E::Column::iter().filter(|col| !key_names.iter().any(|k| k == col.as_str())),
        );

        let model = E::insert(active_model)
            .on_conflict(on_conflict)
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate") || err_str.contains("unique") {
                    StoreError::Constraint("entity already exists".to_string())
                } else {
                    StoreError::Query(err_str)
                }
            })?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), StoreError> {
        let result = E::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
