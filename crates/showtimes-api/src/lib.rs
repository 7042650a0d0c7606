//! API client library for showtimes.
//!
//! Provides clients for the Finnkino listings API and the OMDb API.

/// Single-request HTTP fetcher shared by both clients.
pub mod fetch;

/// Finnkino listings API client.
pub mod finnkino;

/// OMDb API client.
pub mod omdb;
