//! Punch report handlers (admin only).

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Router,
};

use crate::api::AppState;
use crate::domain::{DateFilterQuery, DateRange, Principal, ReportRow, ReportStatistics};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated, PaginatedReportRows, PaginationParams};

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/punches", get(punch_report))
        .route("/punches/paged", get(punch_report_page))
        .route("/punches/stats", get(punch_statistics))
}

/// Every punch of the caller's employees in the range, most recent first
#[utoipa::path(
    get,
    path = "/reports/punches",
    tag = "Reports",
    params(DateFilterQuery),
    responses(
        (status = 200, description = "Report rows", body = [ReportRow]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Invalid date filter")
    ),
    security(("bearer_auth" = []))
)]
pub async fn punch_report(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<DateFilterQuery>,
) -> AppResult<ApiResponse<Vec<ReportRow>>> {
    let range = DateRange::try_from(&query)?;
    let rows = state.report_service.build_report(&principal, range).await?;
    Ok(ApiResponse::success(rows))
}

/// Paged variant of the punch report
#[utoipa::path(
    get,
    path = "/reports/punches/paged",
    tag = "Reports",
    params(DateFilterQuery, PaginationParams),
    responses(
        (status = 200, description = "One page of report rows", body = PaginatedReportRows),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Invalid date filter")
    ),
    security(("bearer_auth" = []))
)]
pub async fn punch_report_page(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<DateFilterQuery>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<ApiResponse<Paginated<ReportRow>>> {
    let range = DateRange::try_from(&query)?;
    let page = state
        .report_service
        .build_report_page(&principal, range, pagination)
        .await?;
    Ok(ApiResponse::success(page))
}

/// Totals over the same scope and range as the report
#[utoipa::path(
    get,
    path = "/reports/punches/stats",
    tag = "Reports",
    params(DateFilterQuery),
    responses(
        (status = 200, description = "Report statistics", body = ReportStatistics),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required"),
        (status = 422, description = "Invalid date filter")
    ),
    security(("bearer_auth" = []))
)]
pub async fn punch_statistics(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<DateFilterQuery>,
) -> AppResult<ApiResponse<ReportStatistics>> {
    let range = DateRange::try_from(&query)?;
    let stats = state.report_service.statistics(&principal, range).await?;
    Ok(ApiResponse::success(stats))
}
