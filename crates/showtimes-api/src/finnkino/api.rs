//! `FinnkinoApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::ScheduleParams;
use super::types::{Show, TheatreArea};

/// Finnkino listings API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(FinnkinoApi: Send)]
pub trait LocalFinnkinoApi {
    /// Looks up the list of theater areas.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or XML parsing fails.
    async fn theatre_areas(&self) -> Result<Vec<TheatreArea>>;

    /// Looks up the show schedule of one area.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or XML parsing fails.
    async fn schedule(&self, params: &ScheduleParams) -> Result<Vec<Show>>;
}
