//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and the pure rules around them: who may see
//! what, how punches map to local days, how report rows are built.
//! Nothing here touches the database or HTTP.

pub mod access;
pub mod address;
pub mod cep;
pub mod cpf;
pub mod password;
pub mod punch;
pub mod report;
pub mod user;

pub use access::{Principal, RecordScope, VisibilityScope};
pub use address::{Address, AddressDraft, AddressInfo, AddressResponse, NewAddress};
pub use password::Password;
pub use punch::{PunchRecord, PunchRegistered, TodayPunch};
pub use report::{
    DateFilterQuery, DateRange, PunchWithEmployee, ReportFilter, ReportRow, ReportStatistics,
    TimeBounds,
};
pub use user::{
    Employee, EmployeeProfile, EmployeeResponse, EmployeeUpdate, NewUser, User, UserResponse,
    UserRole,
};
