//! Employee management - CRUD scoped to the acting admin.

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use std::sync::Arc;
use uuid::Uuid;

use super::clock::Clock;
use crate::config::{ISO_DATE_FORMAT, MIN_PASSWORD_LENGTH};
use crate::domain::access::{authorize_employee_access, require_admin};
use crate::domain::{
    cep, cpf, AddressDraft, Employee, EmployeeProfile, EmployeeUpdate, NewAddress, Password,
    Principal, VisibilityScope,
};
use crate::errors::{AppError, AppResult, FieldErrorsBuilder};
use crate::infra::{AddressLookup, UnitOfWork};
use crate::with_transaction;

/// Employee fields as submitted. Format checks (e-mail syntax, lengths)
/// already ran at the boundary; domain rules run here.
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    /// Required on create, optional on update
    pub password: Option<String>,
    pub cpf: String,
    pub cargo: String,
    /// `YYYY-MM-DD`
    pub data_nascimento: String,
    pub cep: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub endereco: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
}

#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Employees visible to the admin, newest first
    async fn list(&self, principal: &Principal) -> AppResult<Vec<Employee>>;

    async fn get(&self, principal: &Principal, id: Uuid) -> AppResult<Employee>;

    /// Create an employee owned by the caller, with its address, atomically
    async fn create(&self, principal: &Principal, input: EmployeeInput) -> AppResult<Employee>;

    /// Full update of an owned employee and its address, atomically
    async fn update(&self, principal: &Principal, id: Uuid, input: EmployeeInput)
        -> AppResult<Employee>;

    /// Hard delete of an owned employee
    async fn delete(&self, principal: &Principal, id: Uuid) -> AppResult<()>;
}

/// Validated input, ready to persist.
struct Checked {
    profile: EmployeeProfile,
    password_hash: Option<String>,
    address: AddressDraft,
}

pub struct EmployeeManager<U: UnitOfWork> {
    uow: Arc<U>,
    lookup: Arc<dyn AddressLookup>,
    clock: Arc<dyn Clock>,
    scope: VisibilityScope,
    offset: FixedOffset,
}

impl<U: UnitOfWork> EmployeeManager<U> {
    pub fn new(
        uow: Arc<U>,
        lookup: Arc<dyn AddressLookup>,
        clock: Arc<dyn Clock>,
        scope: VisibilityScope,
        offset: FixedOffset,
    ) -> Self {
        Self {
            uow,
            lookup,
            clock,
            scope,
            offset,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.offset).date_naive()
    }

    /// Load an employee and apply the ownership gate.
    async fn owned(&self, principal: &Principal, id: Uuid) -> AppResult<Employee> {
        require_admin(principal)?;
        let found = self.uow.employees().find(id).await?;
        authorize_employee_access(principal, found.as_ref().map(|e| &e.user))?;
        found.ok_or(AppError::NotFound)
    }

    /// Local rules, then uniqueness. Nothing here calls the lookup, so a
    /// malformed CEP is rejected before any network traffic.
    async fn check(
        &self,
        input: EmployeeInput,
        except: Option<Uuid>,
        password_required: bool,
    ) -> AppResult<Checked> {
        let mut errors = FieldErrorsBuilder::new();
        let email = input.email.trim().to_string();

        let formatted_cpf = cpf::format(&input.cpf);
        if formatted_cpf.is_none() {
            errors.add("cpf", "CPF inválido");
        }

        let birth = match NaiveDate::parse_from_str(input.data_nascimento.trim(), ISO_DATE_FORMAT) {
            Ok(date) if date < self.today() => Some(date),
            Ok(_) => {
                errors.add(
                    "data_nascimento",
                    "A data de nascimento deve ser anterior a hoje",
                );
                None
            }
            Err(_) => {
                errors.add("data_nascimento", "Data de nascimento inválida");
                None
            }
        };

        let formatted_cep = cep::format(&input.cep);
        if formatted_cep.is_none() {
            errors.add("cep", "O CEP deve conter 8 dígitos");
        }

        let password = input.password.filter(|p| !p.is_empty());
        match &password {
            None if password_required => errors.add("password", "A senha é obrigatória"),
            Some(p) if p.chars().count() < MIN_PASSWORD_LENGTH as usize => errors.add(
                "password",
                format!("A senha deve ter pelo menos {} caracteres", MIN_PASSWORD_LENGTH),
            ),
            _ => {}
        }

        if self.uow.users().email_taken(&email, except).await? {
            errors.add("email", "Este e-mail já está em uso");
        }
        if let Some(formatted) = &formatted_cpf {
            if self.uow.users().cpf_taken(formatted, except).await? {
                errors.add("cpf", "Este CPF já está em uso");
            }
        }

        errors.finish()?;

        let (Some(cpf), Some(data_nascimento), Some(cep)) = (formatted_cpf, birth, formatted_cep)
        else {
            return Err(AppError::internal("validated employee fields missing"));
        };

        let password_hash = password
            .map(|p| Password::new(&p).map(Password::into_string))
            .transpose()?;

        Ok(Checked {
            profile: EmployeeProfile {
                name: input.name.trim().to_string(),
                email,
                cpf,
                cargo: input.cargo.trim().to_string(),
                data_nascimento,
            },
            password_hash,
            address: AddressDraft::new(
                cep,
                input.numero,
                input.complemento,
                input.endereco,
                input.bairro,
                input.cidade,
                input.estado,
            ),
        })
    }

    /// Fill address gaps from the lookup when needed.
    async fn complete(&self, mut draft: AddressDraft) -> AppResult<NewAddress> {
        if draft.needs_lookup() {
            match self.lookup.lookup(&draft.cep).await {
                Some(info) => draft.fill_from(info),
                None => tracing::debug!(cep = %draft.cep, "CEP lookup missed"),
            }
        }
        draft.finish()
    }
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeManager<U> {
    async fn list(&self, principal: &Principal) -> AppResult<Vec<Employee>> {
        require_admin(principal)?;
        self.uow.employees().list(self.scope.resolve(principal)).await
    }

    async fn get(&self, principal: &Principal, id: Uuid) -> AppResult<Employee> {
        self.owned(principal, id).await
    }

    async fn create(&self, principal: &Principal, input: EmployeeInput) -> AppResult<Employee> {
        require_admin(principal)?;

        let checked = self.check(input, None, true).await?;
        let address = self.complete(checked.address).await?;
        let password_hash = checked
            .password_hash
            .ok_or_else(|| AppError::internal("password hash missing after validation"))?;
        let new_user = checked.profile.into_new_user(principal.id, password_hash);

        let employee = with_transaction!(self.uow, |ctx| {
            ctx.employees().create(new_user, address).await
        })?;

        tracing::info!(
            employee_id = %employee.user.id,
            admin_id = %principal.id,
            "Employee created"
        );
        Ok(employee)
    }

    async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        input: EmployeeInput,
    ) -> AppResult<Employee> {
        self.owned(principal, id).await?;

        let checked = self.check(input, Some(id), false).await?;
        let address = self.complete(checked.address).await?;
        let update = EmployeeUpdate {
            profile: checked.profile,
            password_hash: checked.password_hash,
            address,
        };

        let employee = with_transaction!(self.uow, |ctx| {
            ctx.employees().update(id, update).await
        })?;

        tracing::info!(employee_id = %id, admin_id = %principal.id, "Employee updated");
        Ok(employee)
    }

    async fn delete(&self, principal: &Principal, id: Uuid) -> AppResult<()> {
        self.owned(principal, id).await?;
        self.uow.users().delete(id).await?;

        tracing::info!(employee_id = %id, admin_id = %principal.id, "Employee deleted");
        Ok(())
    }
}
