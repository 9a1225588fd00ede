//! Common error types used throughout edgecount.
//!
//! The variants follow the storage boundary: a backend that cannot be reached,
//! a record that breaks a constraint, and a statement that fails to run.

/// Common error type for edgecount.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The storage backend could not be reached or refused the credentials.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A record violated a storage constraint.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A statement could not be prepared or executed.
    #[error("Query error: {0}")]
    Query(String),

    /// The edge table could not be created.
    #[error("Schema error: {0}")]
    Schema(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new Connection error.
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a new ConstraintViolation error.
    pub fn constraint<S: Into<String>>(msg: S) -> Self {
        Self::ConstraintViolation(msg.into())
    }

    /// Create a new Query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        Self::Query(msg.into())
    }

    /// Create a new Schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error means the backend itself is unavailable.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
