//! Shared fixtures: an in-memory SQLite database with migrations applied,
//! services wired to a frozen clock and a mocked CEP lookup.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use ponto_api::config::Config;
use ponto_api::domain::{AddressInfo, Principal};
use ponto_api::infra::{AddressLookup, Migrator};
use ponto_api::services::{EmployeeInput, FixedClock, Registration, ServiceContainer, Services};

pub const PASSWORD: &str = "segredo123";
pub const JWT_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Valid CPFs, one per fixture employee
pub const CPFS: [&str; 6] = [
    "123.456.789-09",
    "529.982.247-25",
    "111.444.777-35",
    "987.654.321-00",
    "246.813.579-28",
    "135.792.468-28",
];

mockall::mock! {
    pub Lookup {}

    #[async_trait]
    impl AddressLookup for Lookup {
        async fn lookup(&self, cep: &str) -> Option<AddressInfo>;
    }
}

/// Lookup that must never be called
pub fn no_lookup() -> MockLookup {
    let mut lookup = MockLookup::new();
    lookup.expect_lookup().times(0);
    lookup
}

pub fn paulista() -> AddressInfo {
    AddressInfo {
        cep: Some("01310-100".into()),
        endereco: Some("Avenida Paulista".into()),
        bairro: Some("Bela Vista".into()),
        cidade: Some("São Paulo".into()),
        estado: Some("SP".into()),
    }
}

/// 2024-03-15 12:00 UTC (09:00 local at -03:00)
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

pub fn config() -> Config {
    Config::new("sqlite::memory:", JWT_SECRET).unwrap()
}

/// One pooled connection, so every query sees the same in-memory database.
pub async fn connect() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = SeaDatabase::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub struct TestApp {
    pub db: DatabaseConnection,
    pub services: Services,
}

pub async fn app(lookup: MockLookup, now: DateTime<Utc>) -> TestApp {
    app_with_config(lookup, now, config()).await
}

pub async fn app_with_config(lookup: MockLookup, now: DateTime<Utc>, config: Config) -> TestApp {
    let db = connect().await;
    let services = Services::build(
        db.clone(),
        config,
        Arc::new(lookup),
        Arc::new(FixedClock(now)),
    );
    TestApp { db, services }
}

impl TestApp {
    pub async fn admin(&self, name: &str, email: &str) -> Principal {
        let user = self
            .services
            .auth()
            .register(Registration {
                name: name.into(),
                email: email.into(),
                password: PASSWORD.into(),
            })
            .await
            .unwrap();
        Principal::from(&user)
    }

    /// Create an employee with a complete address and return it as a principal.
    pub async fn employee(&self, admin: &Principal, name: &str, cpf: &str) -> Principal {
        let employee = self
            .services
            .employees()
            .create(admin, employee_input(name, cpf))
            .await
            .unwrap();
        Principal::from(&employee.user)
    }
}

/// Complete input: no lookup needed.
pub fn employee_input(name: &str, cpf: &str) -> EmployeeInput {
    EmployeeInput {
        name: name.into(),
        email: format!("{}@empresa.com.br", name.to_lowercase()),
        password: Some(PASSWORD.into()),
        cpf: cpf.into(),
        cargo: "Analista".into(),
        data_nascimento: "1990-05-15".into(),
        cep: "01310-100".into(),
        numero: "1000".into(),
        complemento: Some("Sala 12".into()),
        endereco: Some("Avenida Paulista".into()),
        bairro: Some("Bela Vista".into()),
        cidade: Some("São Paulo".into()),
        estado: Some("SP".into()),
    }
}

/// Only CEP and number: the rest must come from the lookup.
pub fn sparse_input(name: &str, cpf: &str) -> EmployeeInput {
    EmployeeInput {
        endereco: None,
        bairro: None,
        cidade: None,
        estado: None,
        ..employee_input(name, cpf)
    }
}
