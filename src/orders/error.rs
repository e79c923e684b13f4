/// Error types for order placement
///
/// Transport failures never appear here: the order service turns them into a
/// local recording.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Order rejected by backend (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid submission transition: {0}")]
    InvalidTransition(String),
}

impl From<validator::ValidationErrors> for OrderError {
    fn from(errors: validator::ValidationErrors) -> Self {
        OrderError::ValidationError(errors.to_string())
    }
}
