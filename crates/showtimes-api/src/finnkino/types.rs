//! Finnkino API response types.

use serde::Deserialize;

use super::xml::{deserialize_empty_string_as_none, deserialize_empty_string_as_none_u32};

/// A single theater area from the `TheatreAreas` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TheatreArea {
    /// Area ID (e.g. "1016").
    #[serde(rename = "ID")]
    pub id: String,
    /// Display name (e.g. "Espoo").
    #[serde(rename = "Name")]
    pub name: String,
}

/// Poster image group of a show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShowImages {
    /// Medium-size portrait poster URL.
    #[serde(
        rename = "EventMediumImagePortrait",
        deserialize_with = "deserialize_empty_string_as_none",
        default
    )]
    pub medium_portrait: Option<String>,
}

/// A single scheduled screening from the `Schedule` listing.
///
/// Several shows may share a title (different times or theaters).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Show {
    /// Localized title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Original title (may be empty).
    #[serde(
        rename = "OriginalTitle",
        deserialize_with = "deserialize_empty_string_as_none",
        default
    )]
    pub original_title: Option<String>,
    /// Production year.
    #[serde(
        rename = "ProductionYear",
        deserialize_with = "deserialize_empty_string_as_none_u32",
        default
    )]
    pub production_year: Option<u32>,
    /// Theater name (e.g. "ISO OMENA, Espoo").
    #[serde(
        rename = "Theatre",
        deserialize_with = "deserialize_empty_string_as_none",
        default
    )]
    pub theatre: Option<String>,
    /// Show start (e.g. "2024-03-07T18:00:00").
    #[serde(
        rename = "dttmShowStart",
        deserialize_with = "deserialize_empty_string_as_none",
        default
    )]
    pub show_start: Option<String>,
    /// Poster URL given directly under `<Show>`.
    #[serde(
        rename = "EventMediumImagePortrait",
        deserialize_with = "deserialize_empty_string_as_none",
        default
    )]
    pub medium_portrait: Option<String>,
    /// Poster URLs grouped under `<Images>`.
    #[serde(rename = "Images", default)]
    pub images: Option<ShowImages>,
}

impl Show {
    /// Returns the medium portrait poster URL, or `""` when the show has none.
    ///
    /// The first `EventMediumImagePortrait` wins: a direct child of `<Show>`
    /// takes precedence over the one nested in `<Images>`.
    #[must_use]
    pub fn poster_url(&self) -> &str {
        self.medium_portrait
            .as_deref()
            .or_else(|| {
                self.images
                    .as_ref()
                    .and_then(|images| images.medium_portrait.as_deref())
            })
            .unwrap_or_default()
    }
}
