//! `OmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::OmdbMovie;

/// OMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(OmdbApi: Send)]
pub trait LocalOmdbApi {
    /// Looks up a movie by exact title (`t` parameter).
    ///
    /// A miss is not an error: the response carries an `Error` field instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn lookup_title(&self, title: &str) -> Result<OmdbMovie>;
}
