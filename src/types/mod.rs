//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedReportRows, PaginationMeta, PaginationParams};
pub use response::{ApiResponse, CreatedWithMessage, MessageResponse};
