//! Seed command - Inserts a demo admin with one employee.
//!
//! Goes through the regular services, so every domain rule applies to the
//! seeded rows as well. Running it twice is a no-op.

use crate::cli::args::SeedArgs;
use crate::config::Config;
use crate::domain::Principal;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::{EmployeeInput, Registration, ServiceContainer, Services};

const ADMIN_NAME: &str = "Administrador";

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let services = Services::from_connection(db.get_connection(), config)?;

    let registration = Registration {
        name: ADMIN_NAME.to_string(),
        email: args.admin_email.clone(),
        password: args.password.clone(),
    };

    let admin = match services.auth().register(registration).await {
        Ok(user) => user,
        Err(AppError::Validation(fields)) if fields.contains_key("email") => {
            tracing::info!(email = %args.admin_email, "Seed admin already exists, skipping");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    tracing::info!(admin_id = %admin.id, email = %admin.email, "Seed admin created");

    let employee = services
        .employees()
        .create(&Principal::from(&admin), demo_employee(&args.password))
        .await?;
    tracing::info!(
        employee_id = %employee.user.id,
        email = %employee.user.email,
        "Seed employee created"
    );

    println!("Admin:    {} / {}", admin.email, args.password);
    println!("Employee: {} / {}", employee.user.email, args.password);
    Ok(())
}

fn demo_employee(password: &str) -> EmployeeInput {
    EmployeeInput {
        name: "João da Silva".to_string(),
        email: "joao@ponto.local".to_string(),
        password: Some(password.to_string()),
        cpf: "529.982.247-25".to_string(),
        cargo: "Analista".to_string(),
        data_nascimento: "1990-05-15".to_string(),
        cep: "01310-100".to_string(),
        numero: "1000".to_string(),
        complemento: Some("Sala 12".to_string()),
        endereco: Some("Avenida Paulista".to_string()),
        bairro: Some("Bela Vista".to_string()),
        cidade: Some("São Paulo".to_string()),
        estado: Some("SP".to_string()),
    }
}
