//! User profile records issued by the credential backend.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The profile of an authenticated user.
///
/// The credential backend decides what a profile contains; the client only
/// ever displays it. `name` and `email` get first-class fields because the
/// greeting falls back across them, everything else rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, if the backend provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address, if the backend provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Any further profile fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl UserProfile {
    /// Best-effort human-readable name: `name`, then `email`, then `"User"`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("User")
    }
}
