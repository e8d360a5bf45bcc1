//! Application state - Dependency injection container.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{AddressLookup, Database};
use crate::services::{
    AuthService, EmployeeService, PunchService, ReportService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub punch_service: Arc<dyn PunchService>,
    pub report_service: Arc<dyn ReportService>,
    pub address_lookup: Arc<dyn AddressLookup>,
    /// Database connection
    pub database: Arc<Database>,
    /// Offset used to render local dates and times
    pub utc_offset: FixedOffset,
}

impl AppState {
    /// Production wiring from a connected database and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let utc_offset = config.utc_offset;
        let container = Services::from_connection(database.get_connection(), config)?;
        Ok(Self::from_container(&container, database, utc_offset))
    }

    /// Build state from any service container (tests inject their own).
    pub fn from_container(
        container: &dyn ServiceContainer,
        database: Arc<Database>,
        utc_offset: FixedOffset,
    ) -> Self {
        Self {
            auth_service: container.auth(),
            employee_service: container.employees(),
            punch_service: container.punches(),
            report_service: container.reports(),
            address_lookup: container.address_lookup(),
            database,
            utc_offset,
        }
    }
}
