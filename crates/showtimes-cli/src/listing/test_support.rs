//! In-memory API doubles for listing tests.
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, bail};
use showtimes_api::finnkino::{FinnkinoApi, ScheduleParams, Show, TheatreArea};
use showtimes_api::omdb::{OmdbApi, OmdbMovie};

/// Builds a show with a direct poster URL.
pub fn make_show(title: &str, poster: &str) -> Show {
    Show {
        title: String::from(title),
        original_title: None,
        production_year: None,
        theatre: None,
        show_start: None,
        medium_portrait: (!poster.is_empty()).then(|| String::from(poster)),
        images: None,
    }
}

/// Builds a theater area.
pub fn make_area(id: &str, name: &str) -> TheatreArea {
    TheatreArea {
        id: String::from(id),
        name: String::from(name),
    }
}

/// Finnkino double serving a fixed schedule and recording requests.
#[derive(Debug, Default)]
pub struct MockFinnkino {
    areas: Vec<TheatreArea>,
    schedule: Option<Vec<Show>>,
    pub requests: Mutex<Vec<ScheduleParams>>,
}

impl MockFinnkino {
    pub fn new(areas: Vec<TheatreArea>, schedule: Vec<Show>) -> Self {
        Self {
            areas,
            schedule: Some(schedule),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl FinnkinoApi for MockFinnkino {
    async fn theatre_areas(&self) -> Result<Vec<TheatreArea>> {
        Ok(self.areas.clone())
    }

    async fn schedule(&self, params: &ScheduleParams) -> Result<Vec<Show>> {
        self.requests.lock().unwrap().push(params.clone());
        match &self.schedule {
            Some(shows) => Ok(shows.clone()),
            None => bail!("Schedule XML decoding failed (len=0): "),
        }
    }
}

/// OMDb double keyed by exact title.
///
/// Unknown titles answer like OMDb does for a miss.
#[derive(Debug, Default)]
pub struct MockOmdb {
    movies: HashMap<String, Option<OmdbMovie>>,
    delays: HashMap<String, Duration>,
    pub lookups: Mutex<Vec<String>>,
}

impl MockOmdb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, title: &str, movie: OmdbMovie) -> Self {
        self.movies.insert(String::from(title), Some(movie));
        self
    }

    pub fn found(self, title: &str, plot: &str, actors: &str) -> Self {
        self.with_movie(
            title,
            OmdbMovie {
                title: Some(String::from(title)),
                plot: Some(String::from(plot)),
                actors: Some(String::from(actors)),
                response: Some(String::from("True")),
                ..OmdbMovie::default()
            },
        )
    }

    pub fn missing(self, title: &str) -> Self {
        self.with_movie(title, not_found())
    }

    /// The lookup for `title` answers only after `delay`.
    pub fn delayed(mut self, title: &str, delay: Duration) -> Self {
        self.delays.insert(String::from(title), delay);
        self
    }

    /// The lookup for `title` fails as if the body were unparsable.
    pub fn broken(mut self, title: &str) -> Self {
        self.movies.insert(String::from(title), None);
        self
    }
}

fn not_found() -> OmdbMovie {
    OmdbMovie {
        response: Some(String::from("False")),
        error: Some(serde_json::Value::from("Movie not found!")),
        ..OmdbMovie::default()
    }
}

impl OmdbApi for MockOmdb {
    async fn lookup_title(&self, title: &str) -> Result<OmdbMovie> {
        self.lookups.lock().unwrap().push(String::from(title));
        if let Some(delay) = self.delays.get(title).copied() {
            tokio::time::sleep(delay).await;
        }
        match self.movies.get(title) {
            Some(Some(movie)) => Ok(movie.clone()),
            Some(None) => bail!("OMDb JSON decoding failed (len=6): <html>"),
            None => Ok(not_found()),
        }
    }
}
