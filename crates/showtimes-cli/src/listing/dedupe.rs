//! Title-based show deduplication.

use std::collections::HashSet;

use showtimes_api::finnkino::Show;

/// Keeps the first show of each title, preserving schedule order.
///
/// Titles are compared exactly (case and whitespace sensitive).
#[must_use]
pub fn dedupe_shows(shows: Vec<Show>) -> Vec<Show> {
    let mut seen: HashSet<String> = HashSet::with_capacity(shows.len());
    shows
        .into_iter()
        .filter(|show| seen.insert(show.title.clone()))
        .collect()
}
