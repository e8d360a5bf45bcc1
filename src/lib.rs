//! Ponto API - Employee time clock backend
//!
//! Admins register, manage the employees they own (with a postal address
//! resolved through ViaCEP) and read joined punch reports. Employees log in
//! and punch the clock.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and rules (access, addresses, punches, reports)
//! - **services**: Application use cases
//! - **infra**: Database, repositories, unit of work and the CEP lookup client
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Insert demo data
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Principal, User, UserRole};
pub use errors::{AppError, AppResult};
