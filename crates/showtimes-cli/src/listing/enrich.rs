//! Show enrichment with OMDb metadata.

use anyhow::{Context, Result};
use showtimes_api::finnkino::Show;
use showtimes_api::omdb::{MovieMetadata, OmdbApi};
use tracing::instrument;

/// Plot text rendered when OMDb does not know the title.
pub const PLOT_NOT_FOUND: &str = "Plot not found.";

/// Actors text rendered when OMDb does not know the title.
pub const ACTORS_NOT_FOUND: &str = "Actors not found.";

/// Outcome of a metadata lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// Metadata found.
    Ok,
    /// OMDb answered with an `Error` field.
    Error,
}

impl RecordStatus {
    /// CSS class of the movie block.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// One rendered movie block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRecord {
    /// Show title as listed in the schedule.
    pub title: String,
    /// Poster URL (empty when the show has none).
    pub poster_url: String,
    /// Plot text or [`PLOT_NOT_FOUND`].
    pub plot: String,
    /// Actors text or [`ACTORS_NOT_FOUND`].
    pub actors: String,
    /// Lookup outcome.
    pub status: RecordStatus,
}

impl RenderRecord {
    /// Merges a show with its metadata, substituting placeholders on a miss.
    #[must_use]
    pub fn from_metadata(show: &Show, metadata: MovieMetadata) -> Self {
        let (plot, actors, status) = if metadata.found {
            (metadata.plot, metadata.actors, RecordStatus::Ok)
        } else {
            (
                String::from(PLOT_NOT_FOUND),
                String::from(ACTORS_NOT_FOUND),
                RecordStatus::Error,
            )
        };
        Self {
            title: show.title.clone(),
            poster_url: String::from(show.poster_url()),
            plot,
            actors,
            status,
        }
    }
}

/// Looks up a show's metadata by exact title and builds its record.
///
/// # Errors
///
/// Returns an error if the request fails or the response cannot be parsed.
#[instrument(skip_all, fields(title = %show.title))]
pub async fn enrich_show<O: OmdbApi + Sync>(omdb: &O, show: &Show) -> Result<RenderRecord> {
    let movie = omdb
        .lookup_title(&show.title)
        .await
        .with_context(|| format!("failed to look up metadata for {}", show.title))?;
    Ok(RenderRecord::from_metadata(show, MovieMetadata::from(movie)))
}
