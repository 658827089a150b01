//! Error types for the Grove core

use thiserror::Error;

/// Grove core error type
#[derive(Error, Debug)]
pub enum GroveError {
    /// Malformed input: bad URL, empty title, wrong selector kind
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A single-entity lookup that did not resolve
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation unavailable on this deployment, or a protected entity
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Tenant provisioning failed; the host's message is passed through
    #[error("creation failed: {0}")]
    CreationFailed(String),

    /// Any other fault reported by the platform host
    #[error("host error: {0}")]
    Host(String),
}

impl GroveError {
    /// The host's message with no error-kind prefix.
    ///
    /// Used where a caller wants the collaborator's text verbatim, e.g.
    /// when re-wrapping a provisioning fault as `CreationFailed`.
    pub fn into_message(self) -> String {
        match self {
            Self::InvalidArgument(msg)
            | Self::NotFound(msg)
            | Self::Unsupported(msg)
            | Self::CreationFailed(msg)
            | Self::Host(msg) => msg,
        }
    }
}

/// Result type for the Grove core
pub type GroveResult<T> = Result<T, GroveError>;
