//! Employee management against a real (in-memory) database.

mod common;

use std::sync::Arc;

use chrono::Duration;
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

use common::{
    app, app_with_config, config, employee_input, no_lookup, noon, paulista, sparse_input,
    MockLookup, CPFS,
};
use ponto_api::domain::{NewAddress, UserRole, VisibilityScope};
use ponto_api::errors::AppError;
use ponto_api::infra::{Persistence, UnitOfWork};
use ponto_api::services::{EmployeeInput, ServiceContainer};
use ponto_api::with_transaction;

fn field_errors(err: AppError) -> Vec<String> {
    match err {
        AppError::Validation(fields) => fields.into_keys().collect(),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_persists_employee_and_address() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;

    let employee = app
        .services
        .employees()
        .create(&admin, employee_input("Joao", "12345678909"))
        .await
        .unwrap();

    assert_eq!(employee.user.role, UserRole::Employee);
    assert_eq!(employee.user.admin_id, Some(admin.id));
    assert_eq!(employee.user.cpf.as_deref(), Some("123.456.789-09"));
    let address = employee.address.unwrap();
    assert_eq!(address.cep, "01310-100");
    assert_eq!(address.cidade, "São Paulo");

    let fetched = app.services.employees().get(&admin, employee.user.id).await.unwrap();
    assert_eq!(fetched.user.email, "joao@empresa.com.br");
    assert!(fetched.address.is_some());
}

#[tokio::test]
async fn list_is_scoped_to_the_owning_admin() {
    let app = app(no_lookup(), noon()).await;
    let a = app.admin("Admin A", "a@empresa.com.br").await;
    let b = app.admin("Admin B", "b@empresa.com.br").await;

    let ana = app.employee(&a, "Ana", CPFS[0]).await;
    let bia = app.employee(&a, "Bia", CPFS[1]).await;
    let caio = app.employee(&b, "Caio", CPFS[2]).await;

    let listed: Vec<Uuid> = app
        .services
        .employees()
        .list(&a)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.user.id)
        .collect();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&ana.id));
    assert!(listed.contains(&bia.id));

    // Someone else's employee reads as missing
    let err = app.services.employees().get(&a, caio.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = app.services.employees().delete(&a, caio.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert!(app.services.employees().get(&b, caio.id).await.is_ok());
}

#[tokio::test]
async fn global_scope_lists_every_employee() {
    let mut cfg = config();
    cfg.visibility_scope = VisibilityScope::Global;
    let app = app_with_config(no_lookup(), noon(), cfg).await;
    let a = app.admin("Admin A", "a@empresa.com.br").await;
    let b = app.admin("Admin B", "b@empresa.com.br").await;

    app.employee(&a, "Ana", CPFS[0]).await;
    app.employee(&b, "Caio", CPFS[1]).await;

    assert_eq!(app.services.employees().list(&a).await.unwrap().len(), 2);
}

#[tokio::test]
async fn employees_cannot_manage_employees() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let ana = app.employee(&admin, "Ana", CPFS[0]).await;

    let err = app.services.employees().list(&ana).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let err = app
        .services
        .employees()
        .create(&ana, employee_input("Bia", CPFS[1]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn malformed_cep_fails_before_any_lookup() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let ana = app.employee(&admin, "Ana", CPFS[1]).await;

    for cep in ["1234", "0131010", "013101000", "01310-1000"] {
        let input = EmployeeInput {
            cep: cep.into(),
            ..sparse_input("Joao", CPFS[0])
        };
        let err = app.services.employees().create(&admin, input).await.unwrap_err();
        assert_eq!(field_errors(err), vec!["cep".to_string()], "create with {}", cep);

        let input = EmployeeInput {
            cep: cep.into(),
            ..sparse_input("Ana", CPFS[1])
        };
        let err = app
            .services
            .employees()
            .update(&admin, ana.id, input)
            .await
            .unwrap_err();
        assert_eq!(field_errors(err), vec!["cep".to_string()], "update with {}", cep);
    }

    let listed = app.services.employees().list(&admin).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].address.as_ref().unwrap().cep, "01310-100");
}

#[tokio::test]
async fn only_the_owning_admin_can_update() {
    let app = app(no_lookup(), noon()).await;
    let a = app.admin("Admin A", "a@empresa.com.br").await;
    let b = app.admin("Admin B", "b@empresa.com.br").await;
    let ana = app.employee(&a, "Ana", CPFS[0]).await;

    let promoted = EmployeeInput {
        cargo: "Coordenadora".into(),
        ..employee_input("Ana", CPFS[0])
    };

    let err = app
        .services
        .employees()
        .update(&b, ana.id, promoted.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    let untouched = app.services.employees().get(&a, ana.id).await.unwrap();
    assert_eq!(untouched.user.cargo.as_deref(), Some("Analista"));

    let updated = app
        .services
        .employees()
        .update(&a, ana.id, promoted)
        .await
        .unwrap();
    assert_eq!(updated.user.cargo.as_deref(), Some("Coordenadora"));
    assert_eq!(updated.user.admin_id, Some(a.id));
}

#[tokio::test]
async fn lookup_fills_missing_address_fields() {
    let mut lookup = MockLookup::new();
    lookup
        .expect_lookup()
        .withf(|cep| cep == "01310-100")
        .times(1)
        .returning(|_| Some(paulista()));
    let app = app(lookup, noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;

    let input = EmployeeInput {
        bairro: Some("Jardins".into()),
        ..sparse_input("Joao", CPFS[0])
    };
    let employee = app.services.employees().create(&admin, input).await.unwrap();
    let address = employee.address.unwrap();

    assert_eq!(address.endereco, "Avenida Paulista");
    assert_eq!(address.cidade, "São Paulo");
    assert_eq!(address.estado, "SP");
    // Submitted values win over the lookup
    assert_eq!(address.bairro, "Jardins");
}

#[tokio::test]
async fn lookup_miss_reports_the_missing_fields() {
    let mut lookup = MockLookup::new();
    lookup.expect_lookup().times(1).returning(|_| None);
    let app = app(lookup, noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;

    let err = app
        .services
        .employees()
        .create(&admin, sparse_input("Joao", CPFS[0]))
        .await
        .unwrap_err();

    assert_eq!(
        field_errors(err),
        vec!["bairro", "cidade", "endereco", "estado"]
    );
}

#[tokio::test]
async fn invalid_fields_are_reported_together() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;

    let input = EmployeeInput {
        cpf: "123.456.789-00".into(),
        data_nascimento: (noon().date_naive() + Duration::days(1)).to_string(),
        password: Some("123".into()),
        ..employee_input("Joao", CPFS[0])
    };
    let err = app.services.employees().create(&admin, input).await.unwrap_err();

    assert_eq!(
        field_errors(err),
        vec!["cpf", "data_nascimento", "password"]
    );
}

#[tokio::test]
async fn password_is_required_on_create_only() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;

    let err = app
        .services
        .employees()
        .create(
            &admin,
            EmployeeInput {
                password: None,
                ..employee_input("Joao", CPFS[0])
            },
        )
        .await
        .unwrap_err();
    assert_eq!(field_errors(err), vec!["password"]);

    let ana = app.employee(&admin, "Ana", CPFS[1]).await;
    let updated = app
        .services
        .employees()
        .update(
            &admin,
            ana.id,
            EmployeeInput {
                password: None,
                cargo: "Coordenadora".into(),
                ..employee_input("Ana", CPFS[1])
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.user.cargo.as_deref(), Some("Coordenadora"));

    // Old password still works
    assert!(app
        .services
        .auth()
        .login("ana@empresa.com.br".into(), common::PASSWORD.into())
        .await
        .is_ok());
}

#[tokio::test]
async fn duplicate_email_and_cpf_are_rejected() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    app.employee(&admin, "Ana", CPFS[0]).await;

    let input = EmployeeInput {
        email: "ana@empresa.com.br".into(),
        ..employee_input("Outra", "12345678909")
    };
    let err = app.services.employees().create(&admin, input).await.unwrap_err();
    assert_eq!(field_errors(err), vec!["cpf", "email"]);

    assert_eq!(app.services.employees().list(&admin).await.unwrap().len(), 1);
    let addresses = ponto_api::infra::repositories::entities::address::Entity::find()
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(addresses, 1);
}

#[tokio::test]
async fn update_keeps_own_email_and_cpf() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let ana = app.employee(&admin, "Ana", CPFS[0]).await;

    let updated = app
        .services
        .employees()
        .update(
            &admin,
            ana.id,
            EmployeeInput {
                numero: "42".into(),
                ..employee_input("Ana", CPFS[0])
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.address.unwrap().numero, "42");
}

#[tokio::test]
async fn failed_transaction_leaves_no_rows_behind() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let uow = Arc::new(Persistence::new(app.db.clone()));

    let new_user = ponto_api::domain::NewUser {
        name: "Joao".into(),
        email: "joao@empresa.com.br".into(),
        password_hash: "hash".into(),
        role: UserRole::Employee,
        admin_id: Some(admin.id),
        cpf: Some(CPFS[0].into()),
        cargo: Some("Analista".into()),
        data_nascimento: None,
    };
    let address = NewAddress {
        cep: "01310-100".into(),
        endereco: "Avenida Paulista".into(),
        numero: "1000".into(),
        complemento: None,
        bairro: "Bela Vista".into(),
        cidade: "São Paulo".into(),
        estado: "SP".into(),
    };

    let result: Result<(), AppError> = with_transaction!(uow, |ctx| {
        ctx.employees().create(new_user, address).await?;
        Err(AppError::internal("abort"))
    });
    assert!(result.is_err());

    assert!(uow.users().find_by_email("joao@empresa.com.br").await.unwrap().is_none());
    let addresses = ponto_api::infra::repositories::entities::address::Entity::find()
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(addresses, 0);
}

#[tokio::test]
async fn delete_removes_employee_address_and_punches() {
    let app = app(no_lookup(), noon()).await;
    let admin = app.admin("Maria", "maria@empresa.com.br").await;
    let ana = app.employee(&admin, "Ana", CPFS[0]).await;
    app.services.punches().register(&ana).await.unwrap();

    app.services.employees().delete(&admin, ana.id).await.unwrap();

    let err = app.services.employees().get(&admin, ana.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    let punches = ponto_api::infra::repositories::entities::punch_record::Entity::find()
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(punches, 0);
}
