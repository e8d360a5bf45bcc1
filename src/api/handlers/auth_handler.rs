//! Authentication handlers.

use axum::{
    extract::State,
    routing::{post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Principal, UserResponse};
use crate::errors::AppResult;
use crate::services::{PasswordChange, Registration, TokenResponse};
use crate::types::{ApiResponse, CreatedWithMessage, MessageResponse};

/// Admin self-registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "O nome é obrigatório"))]
    #[schema(example = "Maria Souza")]
    pub name: String,
    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "maria@empresa.com.br")]
    pub email: String,
    /// Minimum 6 characters
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    #[schema(example = "segredo123", min_length = 6)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "maria@empresa.com.br")]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória"))]
    #[schema(example = "segredo123")]
    pub password: String,
}

/// Password change request for the authenticated user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "A senha atual é obrigatória"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "A nova senha deve ter pelo menos 6 caracteres"))]
    pub new_password: String,
    #[validate(must_match(
        other = "new_password",
        message = "A confirmação da senha não confere"
    ))]
    pub new_password_confirmation: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Authenticated account routes, mounted behind the auth middleware
pub fn password_routes() -> Router<AppState> {
    Router::new().route("/auth/password", put(change_password))
}

/// Register a new admin account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin registered successfully", body = UserResponse),
        (status = 422, description = "Validation error or e-mail already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<CreatedWithMessage<UserResponse>> {
    let user = state
        .auth_service
        .register(Registration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(CreatedWithMessage(
        UserResponse::from(user),
        "Usuário registrado com sucesso",
    ))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(ApiResponse::success(token))
}

/// Change the caller's password
#[utoipa::path(
    put,
    path = "/auth/password",
    tag = "Authentication",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Current password is incorrect"),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<MessageResponse> {
    state
        .auth_service
        .change_password(
            &principal,
            PasswordChange {
                current_password: payload.current_password,
                new_password: payload.new_password,
            },
        )
        .await?;

    Ok(MessageResponse::new("Senha alterada com sucesso"))
}
