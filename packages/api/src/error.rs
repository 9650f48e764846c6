//! Error taxonomy for calls against the authentication API.

/// Failure of an API operation. The `Display` text is user-facing: the
/// server's `message` when it sent one, otherwise an operation-specific
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Credentials rejected, or a login response without a token.
    #[error("{0}")]
    Auth(String),
    /// A protected operation was attempted with no stored token.
    #[error("No authentication token found")]
    SessionMissing,
    /// The server refused the session token (401/403).
    #[error("{0}")]
    Unauthorized(String),
    /// Listing users failed or returned a malformed payload.
    #[error("{0}")]
    Fetch(String),
    /// The server rejected a create or delete.
    #[error("{0}")]
    Submission(String),
}

impl ApiError {
    /// Whether the stored session can no longer be used and the operator
    /// must sign in again.
    pub fn ends_session(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::SessionMissing)
    }
}
