//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Unit of Work for transaction management
//! - ViaCEP client for postal-code lookup

pub mod address_lookup;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use address_lookup::{AddressLookup, ViaCepClient};
pub use db::{Database, Migrator};
pub use repositories::{
    EmployeeRepository, EmployeeStore, PunchRepository, PunchStore, ReportRepository, ReportStore,
    UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxEmployeeRepository, UnitOfWork};

#[cfg(test)]
pub use address_lookup::MockAddressLookup;
#[cfg(test)]
pub use repositories::{
    MockEmployeeRepository, MockPunchRepository, MockReportRepository, MockUserRepository,
};
