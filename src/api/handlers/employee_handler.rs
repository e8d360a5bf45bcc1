//! Employee management handlers (admin only).

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{EmployeeResponse, Principal};
use crate::errors::AppResult;
use crate::services::EmployeeInput;
use crate::types::{ApiResponse, CreatedWithMessage, MessageResponse};

/// Employee payload for both create and update.
///
/// Address fields other than `cep` and `numero` may be omitted; they are
/// then filled from the postal-code lookup.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EmployeeRequest {
    #[validate(length(min = 1, max = 255, message = "O nome é obrigatório"))]
    #[schema(example = "João Silva")]
    pub name: String,
    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "joao@empresa.com.br")]
    pub email: String,
    /// Required on create. On update, omit to keep the current password.
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    #[schema(example = "segredo123", min_length = 6)]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "O CPF é obrigatório"))]
    #[schema(example = "123.456.789-09")]
    pub cpf: String,
    #[validate(length(min = 1, max = 255, message = "O cargo é obrigatório"))]
    #[schema(example = "Desenvolvedor")]
    pub cargo: String,
    #[validate(length(min = 1, message = "A data de nascimento é obrigatória"))]
    #[schema(example = "1990-05-15")]
    pub data_nascimento: String,
    #[validate(length(min = 1, message = "O CEP é obrigatório"))]
    #[schema(example = "01310-100")]
    pub cep: String,
    #[validate(length(min = 1, max = 10, message = "O número deve ter entre 1 e 10 caracteres"))]
    #[schema(example = "1000")]
    pub numero: String,
    #[validate(length(max = 255))]
    pub complemento: Option<String>,
    #[validate(length(max = 255))]
    pub endereco: Option<String>,
    #[validate(length(max = 255))]
    pub bairro: Option<String>,
    #[validate(length(max = 255))]
    pub cidade: Option<String>,
    #[schema(example = "SP")]
    pub estado: Option<String>,
}

impl From<EmployeeRequest> for EmployeeInput {
    fn from(req: EmployeeRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            cpf: req.cpf,
            cargo: req.cargo,
            data_nascimento: req.data_nascimento,
            cep: req.cep,
            numero: req.numero,
            complemento: req.complemento,
            endereco: req.endereco,
            bairro: req.bairro,
            cidade: req.cidade,
            estado: req.estado,
        }
    }
}

/// Create employee routes (require authentication)
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// List employees visible to the caller, newest first
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "Employee list", body = [EmployeeResponse]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<ApiResponse<Vec<EmployeeResponse>>> {
    let employees = state.employee_service.list(&principal).await?;
    Ok(ApiResponse::success(
        employees.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

/// Get one employee with its address
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<EmployeeResponse>> {
    let employee = state.employee_service.get(&principal, id).await?;
    Ok(ApiResponse::success(EmployeeResponse::from(employee)))
}

/// Create an employee owned by the caller
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<EmployeeRequest>,
) -> AppResult<CreatedWithMessage<EmployeeResponse>> {
    let employee = state
        .employee_service
        .create(&principal, payload.into())
        .await?;

    Ok(CreatedWithMessage(
        EmployeeResponse::from(employee),
        "Funcionário cadastrado com sucesso",
    ))
}

/// Replace an employee's data and address
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Employee not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<EmployeeRequest>,
) -> AppResult<ApiResponse<EmployeeResponse>> {
    let employee = state
        .employee_service
        .update(&principal, id, payload.into())
        .await?;

    Ok(ApiResponse::with_message(
        EmployeeResponse::from(employee),
        "Funcionário atualizado com sucesso",
    ))
}

/// Delete an employee together with its address and punches
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> AppResult<MessageResponse> {
    state.employee_service.delete(&principal, id).await?;
    Ok(MessageResponse::new("Funcionário excluído com sucesso"))
}
