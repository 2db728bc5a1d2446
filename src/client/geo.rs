//! Geolocation provider client.
//!
//! Two lookups: the caller's own network-derived location and the location
//! of an arbitrary address. The provider is opaque; whatever record it
//! returns is passed through unmodified. A reply carrying an error record
//! (`{"error": {"title": ...}}`) is surfaced as a lookup failure with that
//! title.

use super::error::ClientError;
use crate::models::GeoLocation;
use std::time::Duration;

/// Fallback title when the provider's error record carries none.
const GENERIC_LOOKUP_ERROR: &str = "Invalid IP address";

/// Client for the geolocation provider.
pub struct GeoClient {
    base_url: String,
    client: reqwest::Client,
}

impl GeoClient {
    /// Creates a client for the provider at `base_url`.
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

    /// Fetches the caller's own network-derived location.
    pub async fn current(&self) -> Result<GeoLocation, ClientError> {
        self.fetch(format!("{}/geo", self.base_url)).await
    }

    /// Looks up the location of `ip`.
    ///
    /// # Errors
    ///
    /// - `ClientError::Lookup` with the provider's error title when the
    ///   provider reports the address as unresolvable (generic fallback if
    ///   the record has no title).
    /// - `ClientError::NetworkError` / `Timeout` for transport failures.
    pub async fn lookup(&self, ip: &str) -> Result<GeoLocation, ClientError> {
        self.fetch(format!("{}/{}/geo", self.base_url, ip)).await
    }

    async fn fetch(&self, url: String) -> Result<GeoLocation, ClientError> {
        let response = self.client.get(&url).send().await?;
        let value: serde_json::Value = response.json().await?;

        // The provider signals failures in-band with an error record.
        if let Some(error) = value.get("error") {
            let title = error
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or(GENERIC_LOOKUP_ERROR);
            return Err(ClientError::Lookup(title.to_string()));
        }

        serde_json::from_value(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
