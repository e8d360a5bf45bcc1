//! Employee reads: user rows joined with their address.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::entities::{address, user};
use crate::config::ROLE_EMPLOYEE;
use crate::domain::{Employee, RecordScope};
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Load one employee with its address. Admin rows are not employees.
    async fn find(&self, id: Uuid) -> AppResult<Option<Employee>>;

    /// Employees visible under `scope`, newest first.
    async fn list(&self, scope: RecordScope) -> AppResult<Vec<Employee>>;
}

pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_employee((user, address): (user::Model, Option<address::Model>)) -> Employee {
    Employee {
        user: user.into(),
        address: address.map(Into::into),
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<Employee>> {
        let row = user::Entity::find_by_id(id)
            .filter(user::Column::Role.eq(ROLE_EMPLOYEE))
            .find_also_related(address::Entity)
            .one(&self.db)
            .await?;

        Ok(row.map(to_employee))
    }

    async fn list(&self, scope: RecordScope) -> AppResult<Vec<Employee>> {
        let mut query = user::Entity::find().filter(user::Column::Role.eq(ROLE_EMPLOYEE));
        if let Some(admin_id) = scope.admin_id() {
            query = query.filter(user::Column::AdminId.eq(admin_id));
        }

        let rows = query
            .order_by_desc(user::Column::CreatedAt)
            .find_also_related(address::Entity)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(to_employee).collect())
    }
}
