use thiserror::Error;

/// Result type alias for clinic directory operations
pub type Result<T> = std::result::Result<T, ClinicError>;

/// Error taxonomy shared by every crate of the clinic directory API.
///
/// Repository implementations return these variants; the HTTP layer decides
/// the final status code depending on whether the failing call was a read or
/// a write.
///
/// # Examples
///
/// ```rust
/// use clinic_core::error::ClinicError;
///
/// let not_found = ClinicError::task_not_found("64b7f0c2a1b2c3d4e5f60718");
/// assert!(not_found.is_not_found());
///
/// let bad_id = ClinicError::invalid_identifier("not-hex");
/// assert!(bad_id.is_client_error());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    /// Could not build, connect or ping the database client
    #[error("Connection error: {0}")]
    Connection(String),

    /// Identifier is not a valid 24 character hex object id
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Request parameters failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// No document matched the given identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Scan, count or cursor decoding failed
    #[error("Query error: {0}")]
    Query(String),

    /// Insert, update or index operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClinicError {
    /// Not found error for a task identifier
    pub fn task_not_found(id: &str) -> Self {
        Self::NotFound(format!("Task with ID {id} not found"))
    }

    /// Not found error for a doctor identifier
    pub fn doctor_not_found(id: &str) -> Self {
        Self::NotFound(format!("Doctor with ID {id} not found"))
    }

    pub fn invalid_identifier(id: &str) -> Self {
        Self::InvalidIdentifier(format!("'{id}' is not a valid object id"))
    }

    /// Validation error for a required field that was missing or blank
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClinicError::NotFound(_))
    }

    /// Check if the caller sent something unusable (bad id or parameters)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClinicError::InvalidIdentifier(_) | ClinicError::Validation(_)
        )
    }
}
