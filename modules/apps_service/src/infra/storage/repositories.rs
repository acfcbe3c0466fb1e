//! SeaORM repository implementation

use super::{entity, mapper::changes_to_active};
use crate::contract::{App, AppChanges};
use crate::domain::repository::{AppsRepository, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, SqlErr};
use std::sync::Arc;
use uuid::Uuid;

pub struct SeaOrmAppsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAppsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// Classify driver errors into the cases the domain cares about
fn classify(err: DbErr) -> StorageError {
    if matches!(err, DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated) {
        return StorageError::NotFound;
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StorageError::UniqueViolation(detail),
        _ => StorageError::Other(err.into()),
    }
}

#[async_trait]
impl AppsRepository for SeaOrmAppsRepository {
    async fn create(&self, app: &App) -> StorageResult<App> {
        let active: entity::ActiveModel = app.try_into()?;

        let row = entity::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(classify)?;

        Ok(row.try_into()?)
    }

    async fn find_by_id(&self, id: Uuid) -> StorageResult<Option<App>> {
        let row = entity::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(classify)?;

        match row {
            Some(row) => Ok(Some(row.try_into()?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> StorageResult<Vec<App>> {
        let rows = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(classify)?;

        rows.into_iter()
            .map(|row| App::try_from(row).map_err(StorageError::from))
            .collect()
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &AppChanges,
        now: DateTime<Utc>,
    ) -> StorageResult<App> {
        let active = changes_to_active(id, changes, now)?;

        let row = entity::Entity::update(active)
            .exec(&*self.db)
            .await
            .map_err(classify)?;

        Ok(row.try_into()?)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(classify)?;

        if result.rows_affected == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> StorageResult<bool> {
        let count = entity::Entity::find_by_id(id)
            .count(&*self.db)
            .await
            .map_err(classify)?;

        Ok(count > 0)
    }
}
