//! Credential backend client.
//!
//! Speaks to the login endpoint and nothing else. The backend is an opaque
//! credential-issuing service: the client posts an email/password pair and,
//! on success, takes the returned profile and token at face value. The
//! token is never inspected.

use super::error::ClientError;
use crate::models::UserProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of the login request.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Wire shape of the login reply.
///
/// The backend always sends `success`; the remaining fields depend on the
/// outcome, so they all default to absent.
#[derive(Debug, Deserialize)]
struct LoginReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(default)]
    token: Option<String>,
}

/// A successful login: the profile and the opaque credential to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSuccess {
    /// Profile of the authenticated user.
    pub user: UserProfile,
    /// Opaque credential token, stored and replayed verbatim.
    pub token: String,
}

/// Client for the credential backend.
pub struct CredentialClient {
    base_url: String,
    client: reqwest::Client,
}

impl CredentialClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::BuildError` if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::BuildError(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Attempts to log in with `email` and `password`.
    ///
    /// # Errors
    ///
    /// - `ClientError::Credential` with the backend's message when the
    ///   login is rejected (`"Login failed"` if the backend sent none).
    /// - `ClientError::NetworkError` / `Timeout` when the backend is
    ///   unreachable.
    /// - `ClientError::InvalidResponse` when a success reply is missing the
    ///   user or token; no partial session is ever constructed from such a
    ///   reply.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, ClientError> {
        let url = format!("{}/api/login", self.base_url);
        let body = LoginRequest { email, password };

        let response = self.client.post(&url).json(&body).send().await?;
        let reply: LoginReply = response.json().await?;

        if !reply.success {
            return Err(ClientError::Credential(
                reply.message.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        match (reply.user, reply.token) {
            (Some(user), Some(token)) => Ok(LoginSuccess { user, token }),
            _ => Err(ClientError::InvalidResponse(
                "login reply missing user or token".to_string(),
            )),
        }
    }
}
