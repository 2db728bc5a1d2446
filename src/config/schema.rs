//! Configuration schema.
//!
//! Defines the user-configurable settings and their validation. Missing or
//! invalid settings fall back to defaults.

use serde::{Deserialize, Serialize};
use url::Url;

/// Settings for the tracker client.
///
/// All fields are optional in the source JSON; anything missing takes its
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Base URL of the credential backend.
    ///
    /// The login endpoint lives at `{apiBaseUrl}/api/login`. Defaults to
    /// `http://localhost:8000`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the geolocation provider.
    ///
    /// Lookups hit `{geoBaseUrl}/{ip}/geo` and the current-location query
    /// hits `{geoBaseUrl}/geo`. Defaults to `https://ipinfo.io`.
    #[serde(default = "default_geo_base_url")]
    pub geo_base_url: String,

    /// Request timeout in milliseconds for both collaborators.
    ///
    /// Must be greater than 0. Defaults to 30000ms.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Directory for persisted state (session, history).
    ///
    /// When absent, the platform default data directory is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            geo_base_url: default_geo_base_url(),
            timeout: default_timeout(),
            data_dir: None,
        }
    }
}

impl TrackerConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are usable, or `Err` with a descriptive
    /// message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        Url::parse(&self.api_base_url)
            .map_err(|e| format!("apiBaseUrl is not a valid URL: {}", e))?;
        Url::parse(&self.geo_base_url)
            .map_err(|e| format!("geoBaseUrl is not a valid URL: {}", e))?;

        Ok(())
    }

    /// The timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_geo_base_url() -> String {
    "https://ipinfo.io".to_string()
}

fn default_timeout() -> u64 {
    30000
}
