//! XML response wrapper types and custom deserializers.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

use super::types::{Show, TheatreArea};

/// Deserializes empty strings as `None` (for `String` fields).
pub fn deserialize_empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let result = Option::deserialize(deserializer);
    let s: Option<String> = result.map_err(D::Error::custom)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserializes empty strings as `None` (for `u32` fields).
pub fn deserialize_empty_string_as_none_u32<'de, D>(
    deserializer: D,
) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let result = Option::deserialize(deserializer);
    let s: Option<String> = result.map_err(D::Error::custom)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<u32>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("failed to parse u32: {e}"))),
    }
}

/// `TheatreAreas` full response.
#[derive(Debug, Deserialize)]
#[serde(rename = "TheatreAreas")]
pub struct TheatreAreasResponse {
    /// Area items (absent in empty responses).
    #[serde(rename = "TheatreArea", default)]
    pub areas: Vec<TheatreArea>,
}

/// `Schedule` full response.
#[derive(Debug, Deserialize)]
#[serde(rename = "Schedule")]
pub struct ScheduleResponse {
    /// Publication timestamp.
    #[serde(
        rename = "PubDate",
        deserialize_with = "deserialize_empty_string_as_none",
        default
    )]
    pub pub_date: Option<String>,
    /// Show items (absent when the area has no shows).
    #[serde(rename = "Shows", default)]
    pub shows: Option<ShowItems>,
}

/// `Shows` container.
#[derive(Debug, Deserialize)]
pub struct ShowItems {
    #[serde(rename = "Show", default)]
    pub items: Vec<Show>,
}
