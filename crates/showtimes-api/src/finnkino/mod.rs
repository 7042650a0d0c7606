//! Finnkino listings API client module.
//!
//! Handles HTTP requests to the Finnkino XML endpoints and retrieves
//! theater areas and show schedules.

mod api;
mod client;
mod params;
mod types;
pub(crate) mod xml;

#[allow(clippy::module_name_repetitions)]
pub use api::{FinnkinoApi, LocalFinnkinoApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{FinnkinoClient, FinnkinoClientBuilder};
pub use params::{ScheduleParams, parse_schedule_date};
pub use types::{Show, ShowImages, TheatreArea};
