//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod employee_repository;
pub mod entities;
mod punch_repository;
mod report_repository;
mod user_repository;

pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use punch_repository::{PunchRepository, PunchStore};
pub use report_repository::{ReportRepository, ReportStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use user_repository::new_user_model;

#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
#[cfg(test)]
pub use punch_repository::MockPunchRepository;
#[cfg(test)]
pub use report_repository::MockReportRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
