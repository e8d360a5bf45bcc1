//! Unit-of-work double backed by repository mocks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Principal, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    EmployeeRepository, MockEmployeeRepository, MockPunchRepository, MockReportRepository,
    MockUserRepository, PunchRepository, ReportRepository, TransactionContext, UnitOfWork,
    UserRepository,
};

pub struct MockUow {
    pub users: MockUserRepository,
    pub employees: MockEmployeeRepository,
    pub punches: MockPunchRepository,
    pub reports: MockReportRepository,
}

impl MockUow {
    pub fn new() -> Self {
        Self {
            users: MockUserRepository::new(),
            employees: MockEmployeeRepository::new(),
            punches: MockPunchRepository::new(),
            reports: MockReportRepository::new(),
        }
    }

    pub fn build(self) -> Arc<MockUowHandle> {
        Arc::new(MockUowHandle {
            users: Arc::new(self.users),
            employees: Arc::new(self.employees),
            punches: Arc::new(self.punches),
            reports: Arc::new(self.reports),
        })
    }
}

pub struct MockUowHandle {
    users: Arc<MockUserRepository>,
    employees: Arc<MockEmployeeRepository>,
    punches: Arc<MockPunchRepository>,
    reports: Arc<MockReportRepository>,
}

#[async_trait]
impl UnitOfWork for MockUowHandle {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employees.clone()
    }

    fn punches(&self) -> Arc<dyn PunchRepository> {
        self.punches.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.reports.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transactions need a real connection; see the integration tests
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn user(role: UserRole, admin_id: Option<Uuid>) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Test".into(),
        email: format!("{}@empresa.com.br", Uuid::new_v4()),
        password_hash: "hash".into(),
        role,
        admin_id,
        cpf: None,
        cargo: None,
        data_nascimento: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn principal(role: UserRole) -> Principal {
    Principal::from(&user(role, None))
}
