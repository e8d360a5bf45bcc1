//! Public postal-code lookup.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::{cep, AddressInfo};
use crate::errors::{AppError, AppResult};
use crate::types::ApiResponse;

pub fn cep_routes() -> Router<AppState> {
    Router::new().route("/:cep", get(lookup_cep))
}

/// Resolve a CEP to street, district, city and state
#[utoipa::path(
    get,
    path = "/cep/{cep}",
    tag = "Address",
    params(
        (
            "cep" = String,
            Path,
            description = "CEP, with or without the hyphen",
            example = "01310-100"
        )
    ),
    responses(
        (status = 200, description = "Address found", body = AddressInfo),
        (status = 404, description = "CEP not found or lookup unavailable"),
        (status = 422, description = "Malformed CEP")
    )
)]
pub async fn lookup_cep(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<ApiResponse<AddressInfo>> {
    if cep::normalize(&raw).is_none() {
        return Err(AppError::field("cep", "O CEP deve conter 8 dígitos"));
    }

    let info = state
        .address_lookup
        .lookup(&raw)
        .await
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(info))
}
