//! HTTP request handlers.

pub mod auth_handler;
pub mod cep_handler;
pub mod employee_handler;
pub mod punch_handler;
pub mod report_handler;

pub use auth_handler::{auth_routes, password_routes};
pub use cep_handler::cep_routes;
pub use employee_handler::employee_routes;
pub use punch_handler::punch_routes;
pub use report_handler::report_routes;
