//! Punch clock handlers (employees only).

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Router,
};

use crate::api::AppState;
use crate::domain::{Principal, PunchRegistered, TodayPunch};
use crate::errors::AppResult;
use crate::types::{ApiResponse, CreatedWithMessage};

pub fn punch_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register_punch))
        .route("/today", get(list_today))
}

/// Register a punch at the current server time
#[utoipa::path(
    post,
    path = "/punches",
    tag = "Punches",
    responses(
        (status = 201, description = "Punch registered", body = PunchRegistered),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Only employees can punch")
    ),
    security(("bearer_auth" = []))
)]
pub async fn register_punch(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<CreatedWithMessage<PunchRegistered>> {
    let punch = state.punch_service.register(&principal).await?;

    Ok(CreatedWithMessage(
        PunchRegistered::new(&punch, state.utc_offset),
        "Ponto registrado com sucesso",
    ))
}

/// The caller's punches for the current local day, oldest first
#[utoipa::path(
    get,
    path = "/punches/today",
    tag = "Punches",
    responses(
        (status = 200, description = "Today's punches", body = [TodayPunch]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Only employees have punches")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_today(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<ApiResponse<Vec<TodayPunch>>> {
    let punches = state.punch_service.list_today(&principal).await?;

    Ok(ApiResponse::success(
        punches
            .iter()
            .map(|p| TodayPunch::new(p, state.utc_offset))
            .collect(),
    ))
}
