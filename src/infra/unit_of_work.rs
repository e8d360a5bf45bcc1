//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns transaction boundaries. Writes
//! that span the `users` and `addresses` tables go through
//! [`TransactionContext`] so they commit or roll back together.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{address, user};
use super::repositories::{
    new_user_model, EmployeeRepository, EmployeeStore, PunchRepository, PunchStore,
    ReportRepository, ReportStore, UserRepository, UserStore,
};
use crate::domain::{Employee, EmployeeUpdate, NewAddress, NewUser};
use crate::errors::{AppError, AppResult};

/// Unique columns on `users`, mapped to the request field and message
/// reported when a concurrent insert wins the race.
const UNIQUE_USER_COLUMNS: &[(&str, &str, &str)] = &[
    ("email", "email", "Este e-mail já está em uso"),
    ("cpf", "cpf", "Este CPF já está em uso"),
];

fn unique_violation(err: DbErr) -> AppError {
    AppError::from_unique_violation(err, UNIQUE_USER_COLUMNS)
}

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock at the repository level or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn employees(&self) -> Arc<dyn EmployeeRepository>;

    fn punches(&self) -> Arc<dyn PunchRepository>;

    fn reports(&self) -> Arc<dyn ReportRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure returns `Ok`, rolled back on `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Employee writes for this transaction
    pub fn employees(&self) -> TxEmployeeRepository<'_> {
        TxEmployeeRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    employee_repo: Arc<EmployeeStore>,
    punch_repo: Arc<PunchStore>,
    report_repo: Arc<ReportStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            employee_repo: Arc::new(EmployeeStore::new(db.clone())),
            punch_repo: Arc::new(PunchStore::new(db.clone())),
            report_repo: Arc::new(ReportStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employee_repo.clone()
    }

    fn punches(&self) -> Arc<dyn PunchRepository> {
        self.punch_repo.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.report_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware employee repository.
///
/// Writes the user row and its address inside the borrowed transaction.
pub struct TxEmployeeRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEmployeeRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert the employee and then its address.
    pub async fn create(&self, new_user: NewUser, new_address: NewAddress) -> AppResult<Employee> {
        let user = new_user_model(new_user)
            .insert(self.txn)
            .await
            .map_err(unique_violation)?;

        let address = address_model(user.id, new_address).insert(self.txn).await?;

        Ok(Employee {
            user: user.into(),
            address: Some(address.into()),
        })
    }

    /// Overwrite profile and address. A missing address row is created.
    pub async fn update(&self, id: Uuid, update: EmployeeUpdate) -> AppResult<Employee> {
        let EmployeeUpdate {
            profile,
            password_hash,
            address: new_address,
        } = update;

        let existing = user::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: user::ActiveModel = existing.into();
        active.name = Set(profile.name);
        active.email = Set(profile.email);
        active.cpf = Set(Some(profile.cpf));
        active.cargo = Set(Some(profile.cargo));
        active.data_nascimento = Set(Some(profile.data_nascimento));
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }
        active.updated_at = Set(chrono::Utc::now());
        let user = active.update(self.txn).await.map_err(unique_violation)?;

        let current = address::Entity::find()
            .filter(address::Column::UserId.eq(id))
            .one(self.txn)
            .await?;

        let address = match current {
            Some(model) => {
                let mut active: address::ActiveModel = model.into();
                active.cep = Set(new_address.cep);
                active.endereco = Set(new_address.endereco);
                active.numero = Set(new_address.numero);
                active.complemento = Set(new_address.complemento);
                active.bairro = Set(new_address.bairro);
                active.cidade = Set(new_address.cidade);
                active.estado = Set(new_address.estado);
                active.updated_at = Set(chrono::Utc::now());
                active.update(self.txn).await?
            }
            None => address_model(id, new_address).insert(self.txn).await?,
        };

        Ok(Employee {
            user: user.into(),
            address: Some(address.into()),
        })
    }
}

fn address_model(user_id: Uuid, address: NewAddress) -> address::ActiveModel {
    let now = chrono::Utc::now();
    address::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        cep: Set(address.cep),
        endereco: Set(address.endereco),
        numero: Set(address.numero),
        complemento: Set(address.complemento),
        bairro: Set(address.bairro),
        cidade: Set(address.cidade),
        estado: Set(address.estado),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
