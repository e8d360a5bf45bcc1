//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. Every call takes the acting [`Principal`]
//! explicitly; authorization is decided here, not in the HTTP layer.
//!
//! [`Principal`]: crate::domain::Principal

mod auth_service;
pub mod clock;
pub mod container;
mod employee_service;
mod punch_service;
mod report_service;
#[cfg(test)]
mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{
    AuthService, Authenticator, Claims, PasswordChange, Registration, TokenResponse,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use employee_service::{EmployeeInput, EmployeeManager, EmployeeService};
pub use punch_service::{PunchLedger, PunchService};
pub use report_service::{ReportAggregator, ReportService};
