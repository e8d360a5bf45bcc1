//! User repository: identity lookups and single-row writes.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user row outside any transaction (admin registration, seeding)
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Replace the stored password hash
    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()>;

    /// Hard delete. Address and punches go with it through `ON DELETE CASCADE`.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Whether another user already holds `email`
    async fn email_taken(&self, email: &str, except: Option<Uuid>) -> AppResult<bool>;

    /// Whether another user already holds `cpf`
    async fn cpf_taken(&self, cpf: &str, except: Option<Uuid>) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn taken(
        &self,
        column: user::Column,
        value: &str,
        except: Option<Uuid>,
    ) -> AppResult<bool> {
        let mut query = UserEntity::find().filter(column.eq(value));
        if let Some(id) = except {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }
}

/// Active model for a fresh user row.
pub(crate) fn new_user_model(new_user: NewUser) -> ActiveModel {
    let now = chrono::Utc::now();
    ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(new_user.name),
        email: Set(new_user.email),
        password_hash: Set(new_user.password_hash),
        role: Set(new_user.role.to_string()),
        admin_id: Set(new_user.admin_id),
        cpf: Set(new_user.cpf),
        cargo: Set(new_user.cargo),
        data_nascimento: Set(new_user.data_nascimento),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let model = new_user_model(new_user).insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn email_taken(&self, email: &str, except: Option<Uuid>) -> AppResult<bool> {
        self.taken(user::Column::Email, email, except).await
    }

    async fn cpf_taken(&self, cpf: &str, except: Option<Uuid>) -> AppResult<bool> {
        self.taken(user::Column::Cpf, cpf, except).await
    }
}
