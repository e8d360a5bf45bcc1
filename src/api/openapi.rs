//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, cep_handler, employee_handler, punch_handler, report_handler,
};
use crate::domain::{
    AddressInfo, AddressResponse, EmployeeResponse, PunchRegistered, ReportRow, ReportStatistics,
    TodayPunch, UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::{MessageResponse, PaginatedReportRows, PaginationMeta};

/// OpenAPI documentation for the time-clock API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ponto API",
        version = "0.1.0",
        description = "Employee time clock: employee management, punches and punch reports",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::change_password,
        // Employee endpoints
        employee_handler::list_employees,
        employee_handler::get_employee,
        employee_handler::create_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        // Punch endpoints
        punch_handler::register_punch,
        punch_handler::list_today,
        // Report endpoints
        report_handler::punch_report,
        report_handler::punch_report_page,
        report_handler::punch_statistics,
        // Address lookup
        cep_handler::lookup_cep,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            EmployeeResponse,
            AddressResponse,
            AddressInfo,
            PunchRegistered,
            TodayPunch,
            ReportRow,
            ReportStatistics,
            PaginatedReportRows,
            PaginationMeta,
            MessageResponse,
            TokenResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::ChangePasswordRequest,
            employee_handler::EmployeeRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Admin registration, login and password changes"),
        (name = "Employees", description = "Employee management for admins"),
        (name = "Punches", description = "Employee punch clock"),
        (name = "Reports", description = "Punch reports for admins"),
        (name = "Address", description = "Postal-code lookup")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in [
            "/auth/register",
            "/auth/login",
            "/auth/password",
            "/employees",
            "/employees/{id}",
            "/punches",
            "/punches/today",
            "/reports/punches",
            "/reports/punches/paged",
            "/reports/punches/stats",
            "/cep/{cep}",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {}", expected);
        }
    }
}
