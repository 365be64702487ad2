//! Inbound trigger payloads

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};

/// Build notification sent by the CI service when a build finishes
#[derive(Debug, Deserialize)]
pub struct BuildNotification {
    /// Build number (only used for logging)
    pub number: serde_json::Value,
    /// PR the build ran for; absent or null for branch builds
    #[serde(default, deserialize_with = "optional_number")]
    pub pull_request_number: Option<u64>,
    /// Repository the build ran in
    pub repository: BuildRepository,
}

/// Repository section of a build notification
#[derive(Debug, Deserialize)]
pub struct BuildRepository {
    /// Owner login
    pub owner_name: String,
    /// Repository name
    pub name: String,
}

impl BuildRepository {
    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner_name, self.name)
    }
}

/// Query parameters of the manual trigger
#[derive(Debug, Deserialize)]
pub struct ManualCheck {
    /// Repository as `owner/name`
    pub repo: String,
    /// PR number
    pub pr: u64,
}

/// CI services disagree on whether PR numbers are numbers or strings
fn optional_number<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid PR number: {s}"))),
    }
}

/// Parse a build notification from a raw request body
///
/// Form bodies carry the JSON in a `payload` field; JSON bodies carry it
/// directly.
pub fn parse_build_notification(body: &[u8], is_json: bool) -> Result<BuildNotification> {
    let json = if is_json {
        body.to_vec()
    } else {
        url::form_urlencoded::parse(body)
            .find(|(key, _)| key == "payload")
            .map(|(_, value)| value.into_owned().into_bytes())
            .ok_or_else(|| Error::Config("form body has no payload field".to_string()))?
    };

    serde_json::from_slice(&json).map_err(|e| Error::Config(format!("invalid build payload: {e}")))
}
