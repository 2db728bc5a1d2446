//! Error taxonomy for the external collaborators.
//!
//! Every failure from the credential backend or the geolocation provider is
//! converted into one of these variants at the client boundary, so the rest
//! of the crate never sees a raw transport error and no operation is left
//! partially applied.

use std::fmt;

/// Errors produced by the collaborator clients.
#[derive(Debug)]
pub enum ClientError {
    /// The collaborator could not be reached.
    ///
    /// Connection failures, DNS errors and other transport-level issues.
    NetworkError(String),

    /// The request exceeded the configured timeout.
    Timeout,

    /// The HTTP client could not be constructed or the request built.
    BuildError(String),

    /// The collaborator answered with a body the client could not use.
    InvalidResponse(String),

    /// The credential backend rejected the login.
    ///
    /// Carries the backend-provided message unchanged; the session stays
    /// unauthenticated and no retry is automatic.
    Credential(String),

    /// The geolocation provider reported a lookup error for the address.
    ///
    /// Carries the provider's error title unchanged.
    Lookup(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ClientError::Timeout => write!(f, "Request timed out"),
            ClientError::BuildError(msg) => write!(f, "Request build error: {}", msg),
            ClientError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            // User-facing messages pass through verbatim.
            ClientError::Credential(msg) => write!(f, "{}", msg),
            ClientError::Lookup(title) => write!(f, "{}", title),
        }
    }
}

impl std::error::Error for ClientError {}

/// Convert reqwest errors into the collaborator taxonomy.
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            ClientError::BuildError(err.to_string())
        } else {
            ClientError::NetworkError(err.to_string())
        }
    }
}
