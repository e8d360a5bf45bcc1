//! Service Container - wires repositories, the address lookup and the
//! clock into the application services.

use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::{
    AuthService, Authenticator, EmployeeManager, EmployeeService, PunchLedger, PunchService,
    ReportAggregator, ReportService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{AddressLookup, Persistence, ViaCepClient};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn employees(&self) -> Arc<dyn EmployeeService>;

    fn punches(&self) -> Arc<dyn PunchService>;

    fn reports(&self) -> Arc<dyn ReportService>;

    /// Postal-code lookup, also exposed directly over HTTP
    fn address_lookup(&self) -> Arc<dyn AddressLookup>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    employee_service: Arc<dyn EmployeeService>,
    punch_service: Arc<dyn PunchService>,
    report_service: Arc<dyn ReportService>,
    address_lookup: Arc<dyn AddressLookup>,
}

impl Services {
    /// Production wiring: ViaCEP over HTTP and the system clock.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> AppResult<Self> {
        let lookup = Arc::new(ViaCepClient::from_config(&config)?);
        Ok(Self::build(db, config, lookup, Arc::new(SystemClock)))
    }

    /// Wire services with an explicit lookup and clock.
    pub fn build(
        db: sea_orm::DatabaseConnection,
        config: Config,
        address_lookup: Arc<dyn AddressLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let scope = config.visibility_scope;
        let offset = config.utc_offset;

        Self {
            employee_service: Arc::new(EmployeeManager::new(
                uow.clone(),
                address_lookup.clone(),
                clock.clone(),
                scope,
                offset,
            )),
            punch_service: Arc::new(PunchLedger::new(uow.clone(), clock.clone(), offset)),
            report_service: Arc::new(ReportAggregator::new(uow.clone(), clock, scope, offset)),
            auth_service: Arc::new(Authenticator::new(uow, config)),
            address_lookup,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }

    fn punches(&self) -> Arc<dyn PunchService> {
        self.punch_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }

    fn address_lookup(&self) -> Arc<dyn AddressLookup> {
        self.address_lookup.clone()
    }
}
