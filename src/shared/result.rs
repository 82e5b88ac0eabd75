use super::error::StoreError;

/// Type alias for Result with anyhow::Error as the error type.
/// Used by the application shell (config loading, CLI, file input).
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Type alias for Result with the typed store error.
/// Every operation that touches the record store returns this.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
