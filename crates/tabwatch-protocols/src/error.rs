//! Errors for the collaborator seams.

use thiserror::Error;

/// Errors from the remote analysis/research collaborators.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status code.
    #[error("Server responded with status: {status}")]
    Status { status: u16, message: String },

    /// The response body was not the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The input could not be submitted (e.g. malformed URL).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
