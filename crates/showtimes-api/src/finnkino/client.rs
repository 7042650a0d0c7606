//! `FinnkinoClient` - Finnkino listings API client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::FinnkinoApi;
use super::params::ScheduleParams;
use super::types::{Show, TheatreArea};
use super::xml::{ScheduleResponse, TheatreAreasResponse};
use crate::fetch::{PayloadFormat, fetch};

/// Default base URL of the Finnkino XML API.
const DEFAULT_BASE_URL: &str = "https://www.finnkino.fi/xml/";

/// Path of the theater area listing, relative to the base URL.
const THEATRE_AREAS_PATH: &str = "TheatreAreas/";

/// Path of the schedule listing, relative to the base URL.
const SCHEDULE_PATH: &str = "Schedule/";

/// Finnkino listings API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FinnkinoClient {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// Base URL (must end with `/`).
    base_url: Url,
}

/// Builder for `FinnkinoClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FinnkinoClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl FinnkinoClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (config override, wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<FinnkinoClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(FinnkinoClient {
            http_client,
            base_url,
        })
    }
}

impl FinnkinoClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> FinnkinoClientBuilder {
        FinnkinoClientBuilder::new()
    }

    /// Resolves an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))
    }
}

impl FinnkinoApi for FinnkinoClient {
    #[instrument(skip_all)]
    async fn theatre_areas(&self) -> Result<Vec<TheatreArea>> {
        let url = self.endpoint(THEATRE_AREAS_PATH)?;
        tracing::debug!(%url, "TheatreAreas request");

        let response: TheatreAreasResponse = fetch(
            self.http_client.get(url),
            PayloadFormat::Xml,
            "TheatreAreas",
        )
        .await?;
        Ok(response.areas)
    }

    #[instrument(skip_all, fields(area = %params.area))]
    async fn schedule(&self, params: &ScheduleParams) -> Result<Vec<Show>> {
        let url = self.endpoint(SCHEDULE_PATH)?;
        let query = params.to_query();
        tracing::debug!(%url, ?query, "Schedule request");

        let response: ScheduleResponse = fetch(
            self.http_client.get(url).query(&query),
            PayloadFormat::Xml,
            "Schedule",
        )
        .await?;

        let shows = response.shows.map_or_else(Vec::new, |shows| shows.items);
        tracing::debug!(
            fetched = shows.len(),
            pub_date = response.pub_date.as_deref().unwrap_or("-"),
            "Schedule received"
        );
        Ok(shows)
    }
}
