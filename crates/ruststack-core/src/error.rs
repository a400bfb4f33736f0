//! Error types for the RustStack core.

/// Core error type for RustStack infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum RustStackError {
    /// Account ID does not follow the `RGW` + 17 digits format.
    #[error("invalid account ID {id:?}: {reason}")]
    InvalidAccountId {
        /// The rejected identifier.
        id: String,
        /// Which format rule was violated.
        reason: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for RustStack operations.
pub type RustStackResult<T> = Result<T, RustStackError>;
