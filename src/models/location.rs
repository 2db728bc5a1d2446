//! Geolocation result records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A geolocation record as returned by the lookup collaborator.
///
/// Every field is optional: the provider decides what it knows about an
/// address, and the core passes the record through unmodified. Fields the
/// provider sends beyond the well-known ones are preserved in `extra` so
/// nothing is lost across a persist/load round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// The address the record describes, as reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// City name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Region or state, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Country code or name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// IANA timezone identifier, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Coordinates in "lat,lon" form, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,

    /// Provider fields beyond the well-known set, preserved verbatim.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl GeoLocation {
    /// Creates an empty record. Useful as a test fixture base.
    pub fn empty() -> Self {
        Self {
            ip: None,
            city: None,
            region: None,
            country: None,
            timezone: None,
            loc: None,
            extra: HashMap::new(),
        }
    }
}
