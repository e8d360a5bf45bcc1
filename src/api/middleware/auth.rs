//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// JWT authentication middleware.
///
/// Resolves the bearer token to a [`Principal`] (loading the user row, so
/// deleted accounts are rejected) and injects it into the request
/// extensions for handlers to pass on explicitly.
///
/// [`Principal`]: crate::domain::Principal
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let principal = state.auth_service.authenticate(token).await?;
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
