//! OMDb API response types.

use serde::Deserialize;
use serde_json::Value;

/// Response of a title lookup (`?t=`).
///
/// Only the fields used for rendering are mapped; OMDb answers a miss
/// with `{"Response":"False","Error":"Movie not found!"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbMovie {
    /// Matched title.
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    /// Release year (e.g. "2024", "2019–2023").
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    /// Short plot summary.
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    /// Comma-separated lead actors.
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    /// `"True"` or `"False"`.
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    /// Error value, present when the lookup failed. Usually a string,
    /// but any JSON value is accepted.
    #[serde(rename = "Error", default)]
    pub error: Option<Value>,
}

impl OmdbMovie {
    /// Returns the `Error` field as text.
    ///
    /// `null` and the empty string count as no error; non-string values
    /// are rendered as JSON.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Returns `true` if the response reports a lookup failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }
}

/// Plot and cast of one title, as used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieMetadata {
    /// Plot text (verbatim from OMDb).
    pub plot: String,
    /// Actors text (verbatim from OMDb).
    pub actors: String,
    /// `false` when OMDb answered with an `Error` field.
    pub found: bool,
}

impl MovieMetadata {
    /// Metadata for a title OMDb does not know.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            plot: String::new(),
            actors: String::new(),
            found: false,
        }
    }
}

impl From<OmdbMovie> for MovieMetadata {
    fn from(movie: OmdbMovie) -> Self {
        if movie.is_error() {
            return Self::not_found();
        }
        Self {
            plot: movie.plot.unwrap_or_default(),
            actors: movie.actors.unwrap_or_default(),
            found: true,
        }
    }
}
