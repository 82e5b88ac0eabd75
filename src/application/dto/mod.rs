/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod insert_summary;
mod status_query;

pub use insert_summary::InsertSummary;
pub use status_query::StatusQuery;
