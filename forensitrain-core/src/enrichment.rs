//! Backend payload shapes at the deserialization boundary
//!
//! The backend is duck-typed; fields come and go between enrichment sources.
//! Every section here is optional with an explicit default, and structured
//! sections decode leniently: a section with the wrong shape degrades to its
//! empty value instead of failing the whole payload. Partial data must never
//! block the sections that did parse.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Decode a section to its default value when the JSON shape is wrong.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Result of `/phone/analyze`: carrier and validity data only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneReport {
    pub phone_number: String,
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub line_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One discovered account, as the backend reports it.
///
/// Older enrichment sources emit bare profile URLs, newer ones emit
/// `{username, url}` objects; both shapes occur in the same payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountEntry {
    Profile {
        #[serde(default)]
        username: Option<String>,
        url: String,
    },
    Url(String),
}

impl AccountEntry {
    pub fn url(&self) -> &str {
        match self {
            AccountEntry::Url(url) => url,
            AccountEntry::Profile { url, .. } => url,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AccountEntry::Url(_) => None,
            AccountEntry::Profile { username, .. } => username.as_deref(),
        }
    }
}

/// A single geotagged post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Result of `/geosocial/footprint`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeosocialFootprint {
    #[serde(default, deserialize_with = "lenient")]
    pub locations: Vec<LocationPoint>,
}

/// Result of `/analyze-image`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageReport {
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub exif: Option<serde_json::Value>,
    #[serde(default)]
    pub faces_detected: u32,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub objects: Vec<String>,
    #[serde(default)]
    pub inferred_platform: Option<String>,
}

/// Raw `/phone/enrich` payload, pre-graph.
///
/// Superset of [`PhoneReport`]: adds accounts, breaches, emails and the
/// optional geosocial section. Feed it to
/// [`build_result`](crate::build_result) for the normalized record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEnrichment {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub line_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub accounts: Vec<AccountEntry>,
    #[serde(default, deserialize_with = "lenient")]
    pub emails: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub breaches: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email_breaches: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub geosocial: Option<GeosocialFootprint>,
}
