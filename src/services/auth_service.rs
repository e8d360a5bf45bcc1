//! Authentication service - registration, login, token resolution and
//! password changes.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, MIN_PASSWORD_LENGTH, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{NewUser, Password, Principal, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

const EMAIL_TAKEN: &str = "Este e-mail já está em uso";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Self-registration input, validated at the boundary.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Password change input. Confirmation is checked at the boundary.
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new admin account
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Resolve a bearer token to the principal it was issued for.
    /// Tokens of deleted users are rejected.
    async fn authenticate(&self, token: &str) -> AppResult<Principal>;

    /// Change the caller's own password. A wrong current password is a
    /// `BadRequest` and leaves the stored hash untouched.
    async fn change_password(&self, principal: &Principal, change: PasswordChange) -> AppResult<()>;
}

/// Generate JWT token for a user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        let Registration {
            name,
            email,
            password,
        } = registration;

        if self.uow.users().email_taken(&email, None).await? {
            return Err(AppError::field("email", EMAIL_TAKEN));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser::admin(name, email, password_hash))
            .await
            .map_err(|e| match e {
                AppError::Database(db) => {
                    AppError::from_unique_violation(db, &[("email", "email", EMAIL_TAKEN)])
                }
                other => other,
            })?;

        tracing::info!(user_id = %user.id, "Admin registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_email(&email).await?;

        // Verify against a dummy hash for unknown emails so both paths cost
        // the same and valid addresses cannot be enumerated by timing.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(dummy_hash);
        let password_valid = Password::from_hash(stored_hash.to_string()).verify(&password);

        match user {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    async fn authenticate(&self, token: &str) -> AppResult<Principal> {
        let claims = verify_token(token, &self.config)?;

        let user = self
            .uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(Principal::from(&user))
    }

    async fn change_password(
        &self,
        principal: &Principal,
        change: PasswordChange,
    ) -> AppResult<()> {
        if change.new_password.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::field(
                "new_password",
                format!(
                    "A nova senha deve ter pelo menos {} caracteres",
                    MIN_PASSWORD_LENGTH
                ),
            ));
        }

        let user = self
            .uow
            .users()
            .find_by_id(principal.id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !Password::from_hash(user.password_hash).verify(&change.current_password) {
            return Err(AppError::bad_request("A senha atual está incorreta"));
        }
        if change.new_password == change.current_password {
            return Err(AppError::field(
                "new_password",
                "A nova senha deve ser diferente da atual",
            ));
        }

        let new_hash = Password::new(&change.new_password)?.into_string();
        self.uow.users().update_password(principal.id, new_hash).await?;

        tracing::info!(user_id = %principal.id, "Password changed");
        Ok(())
    }
}
