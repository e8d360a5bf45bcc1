//! Punch Ledger storage. Insert and range reads only: punches are never
//! updated or deleted through the application.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::punch_record::{self, ActiveModel, Entity as PunchEntity};
use crate::domain::PunchRecord;
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PunchRepository: Send + Sync {
    /// Append a punch for `user_id` stamped `at`
    async fn create(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<PunchRecord>;

    /// Punches of `user_id` in `[from, until)`, oldest first
    async fn list_between(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<Vec<PunchRecord>>;
}

pub struct PunchStore {
    db: DatabaseConnection,
}

impl PunchStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PunchRepository for PunchStore {
    async fn create(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<PunchRecord> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            created_at: Set(at),
        }
        .insert(&self.db)
        .await?;

        Ok(PunchRecord::from(model))
    }

    async fn list_between(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<Vec<PunchRecord>> {
        let models = PunchEntity::find()
            .filter(punch_record::Column::UserId.eq(user_id))
            .filter(punch_record::Column::CreatedAt.gte(from))
            .filter(punch_record::Column::CreatedAt.lt(until))
            .order_by_asc(punch_record::Column::CreatedAt)
            .order_by_asc(punch_record::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(PunchRecord::from).collect())
    }
}
