//! Report reads: punches joined with their owning employee.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use super::entities::{punch_record, user};
use crate::domain::{PunchWithEmployee, ReportFilter, ReportStatistics};
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Every punch matching `filter`, newest first
    async fn punches(&self, filter: ReportFilter) -> AppResult<Vec<PunchWithEmployee>>;

    /// One page of [`Self::punches`] plus the total count
    async fn punches_page(
        &self,
        filter: ReportFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<PunchWithEmployee>, u64)>;

    /// Names of the given admins, keyed by id
    async fn manager_names(&self, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, String>>;

    async fn statistics(&self, filter: ReportFilter) -> AppResult<ReportStatistics>;
}

pub struct ReportStore {
    db: DatabaseConnection,
}

impl ReportStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Punches joined to `users`, scoped and bounded by `filter`.
    fn scoped(filter: &ReportFilter) -> Select<punch_record::Entity> {
        let mut condition = Condition::all();
        if let Some(admin_id) = filter.scope.admin_id() {
            condition = condition.add(user::Column::AdminId.eq(admin_id));
        }
        if let Some(from) = filter.bounds.from {
            condition = condition.add(punch_record::Column::CreatedAt.gte(from));
        }
        if let Some(until) = filter.bounds.until {
            condition = condition.add(punch_record::Column::CreatedAt.lt(until));
        }

        punch_record::Entity::find()
            .inner_join(user::Entity)
            .filter(condition)
    }

    async fn load(&self, query: Select<punch_record::Entity>) -> AppResult<Vec<PunchWithEmployee>> {
        let rows = query
            .select_also(user::Entity)
            .all(&self.db)
            .await?;

        // Inner join: the user side is always present
        Ok(rows
            .into_iter()
            .filter_map(|(punch, employee)| {
                employee.map(|employee| PunchWithEmployee {
                    punch: punch.into(),
                    employee: employee.into(),
                })
            })
            .collect())
    }
}

#[async_trait]
impl ReportRepository for ReportStore {
    async fn punches(&self, filter: ReportFilter) -> AppResult<Vec<PunchWithEmployee>> {
        let query = Self::scoped(&filter)
            .order_by_desc(punch_record::Column::CreatedAt)
            .order_by_desc(punch_record::Column::Id);
        self.load(query).await
    }

    async fn punches_page(
        &self,
        filter: ReportFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<PunchWithEmployee>, u64)> {
        let total = Self::scoped(&filter).count(&self.db).await?;

        let query = Self::scoped(&filter)
            .order_by_desc(punch_record::Column::CreatedAt)
            .order_by_desc(punch_record::Column::Id)
            .offset(offset)
            .limit(limit);
        let rows = self.load(query).await?;

        Ok((rows, total))
    }

    async fn manager_names(&self, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let managers = user::Entity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(managers.into_iter().map(|m| (m.id, m.name)).collect())
    }

    async fn statistics(&self, filter: ReportFilter) -> AppResult<ReportStatistics> {
        let total_punches = Self::scoped(&filter).count(&self.db).await?;

        let employees: Vec<Uuid> = Self::scoped(&filter)
            .select_only()
            .column(punch_record::Column::UserId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await?;

        let first = Self::scoped(&filter)
            .order_by_asc(punch_record::Column::CreatedAt)
            .one(&self.db)
            .await?;
        let last = Self::scoped(&filter)
            .order_by_desc(punch_record::Column::CreatedAt)
            .one(&self.db)
            .await?;

        Ok(ReportStatistics {
            total_punches,
            distinct_employees: employees.len() as u64,
            first_punch: first.map(|p| p.created_at),
            last_punch: last.map(|p| p.created_at),
        })
    }
}
