//! Batch runner: schedule, dedupe, concurrent enrichment.

use chrono::NaiveDate;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use showtimes_api::finnkino::{FinnkinoApi, ScheduleParams};
use showtimes_api::omdb::OmdbApi;
use tokio::sync::mpsc::UnboundedSender;
use tracing::instrument;

use super::controller::{Batch, BatchEvent};
use super::dedupe::dedupe_shows;
use super::enrich::enrich_show;

/// Runs one batch and reports its progress on `tx`.
///
/// Metadata lookups run concurrently; records are sent in completion
/// order. Stops early if the receiver is gone. `tx` is dropped on return,
/// so a receiver holding no other sender sees the channel close.
#[allow(clippy::needless_pass_by_value)]
#[instrument(skip_all, fields(generation = batch.generation, area = %batch.area))]
pub async fn run_batch<F, O>(
    finnkino: &F,
    omdb: &O,
    batch: Batch,
    date: Option<NaiveDate>,
    tx: UnboundedSender<BatchEvent>,
) where
    F: FinnkinoApi + Sync,
    O: OmdbApi + Sync,
{
    let generation = batch.generation;
    let mut params = ScheduleParams::new(batch.area);
    if let Some(date) = date {
        params = params.date(date);
    }

    let shows = match finnkino.schedule(&params).await {
        Ok(shows) => shows,
        Err(e) => {
            let _ = tx.send(BatchEvent::ScheduleFailed {
                generation,
                error: format!("{e:#}"),
            });
            return;
        }
    };

    let fetched = shows.len();
    let unique = dedupe_shows(shows);
    tracing::debug!(fetched, unique = unique.len(), "Schedule deduplicated");

    if tx
        .send(BatchEvent::ScheduleReceived {
            generation,
            count: unique.len(),
        })
        .is_err()
    {
        return;
    }

    let mut lookups: FuturesUnordered<_> = unique
        .iter()
        .map(|show| async move { (show, enrich_show(omdb, show).await) })
        .collect();

    while let Some((show, result)) = lookups.next().await {
        let event = match result {
            Ok(record) => BatchEvent::RecordReady { generation, record },
            Err(e) => {
                tracing::warn!(title = %show.title, error = %format!("{e:#}"), "Metadata lookup failed");
                BatchEvent::RecordDropped {
                    generation,
                    title: show.title.clone(),
                }
            }
        };
        if tx.send(event).is_err() {
            tracing::debug!("Receiver closed, abandoning batch");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::panic)]

    use std::time::Duration;

    use tokio::sync::mpsc;
    use tracing_mock::{expect, subscriber};

    use super::*;
    use crate::listing::controller::{Controller, Selection};
    use crate::listing::enrich::{PLOT_NOT_FOUND, RecordStatus};
    use crate::listing::html::HtmlDocument;
    use crate::listing::sink::PresentationSink;
    use crate::listing::test_support::{MockFinnkino, MockOmdb, make_area, make_show};

    async fn collect(
        finnkino: &MockFinnkino,
        omdb: &MockOmdb,
        area: &str,
        date: Option<NaiveDate>,
    ) -> Vec<BatchEvent> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let batch = Batch {
            generation: 7,
            area: String::from(area),
        };
        run_batch(finnkino, omdb, batch, date, tx).await;
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_batch_dedupes_before_lookup() {
        // Arrange
        let finnkino = MockFinnkino::new(
            vec![make_area("1016", "Espoo")],
            vec![
                make_show("A", "a1.jpg"),
                make_show("B", "b.jpg"),
                make_show("A", "a2.jpg"),
            ],
        );
        let omdb = MockOmdb::new().found("A", "plot A", "cast A");

        // Act
        let events = collect(&finnkino, &omdb, "1016", None).await;

        // Assert
        assert_eq!(
            events[0],
            BatchEvent::ScheduleReceived {
                generation: 7,
                count: 2
            }
        );
        let mut lookups = omdb.lookups.lock().unwrap().clone();
        lookups.sort();
        assert_eq!(lookups, vec!["A", "B"]);

        let records: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                BatchEvent::RecordReady { record, .. } => Some(record.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(records.len(), 2);
        let a = records.iter().find(|r| r.title == "A").unwrap();
        assert_eq!(a.poster_url, "a1.jpg");
        assert_eq!(a.status, RecordStatus::Ok);
        let b = records.iter().find(|r| r.title == "B").unwrap();
        assert_eq!(b.plot, PLOT_NOT_FOUND);
        assert_eq!(b.status, RecordStatus::Error);
    }

    #[tokio::test]
    async fn test_batch_sends_area_and_date() {
        // Arrange
        let finnkino = MockFinnkino::new(Vec::new(), Vec::new());
        let omdb = MockOmdb::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        // Act
        let events = collect(&finnkino, &omdb, "1016", Some(date)).await;

        // Assert
        let requests = finnkino.requests.lock().unwrap().clone();
        assert_eq!(requests, vec![ScheduleParams::new("1016").date(date)]);
        assert_eq!(
            events,
            vec![BatchEvent::ScheduleReceived {
                generation: 7,
                count: 0
            }]
        );
    }

    #[tokio::test]
    async fn test_batch_schedule_failure() {
        // Arrange
        let finnkino = MockFinnkino::failing();
        let omdb = MockOmdb::new();

        // Act
        let events = collect(&finnkino, &omdb, "1016", None).await;

        // Assert
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            BatchEvent::ScheduleFailed { generation: 7, error } if error.contains("Schedule XML decoding failed")
        ));
        assert!(omdb.lookups.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_drops_unparsable_metadata() {
        // Arrange
        let finnkino = MockFinnkino::new(
            Vec::new(),
            vec![make_show("Good", ""), make_show("Broken", "")],
        );
        let omdb = MockOmdb::new().found("Good", "p", "a").broken("Broken");

        // Act
        let events = collect(&finnkino, &omdb, "1016", None).await;

        // Assert
        assert_eq!(events.len(), 3);
        assert!(events.contains(&BatchEvent::RecordDropped {
            generation: 7,
            title: String::from("Broken"),
        }));
        assert!(events.iter().any(
            |e| matches!(e, BatchEvent::RecordReady { record, .. } if record.title == "Good")
        ));
    }

    /// Runs the batch of a fresh "1016" selection and renders its events.
    async fn render(finnkino: &MockFinnkino, omdb: &MockOmdb) -> (Vec<BatchEvent>, HtmlDocument) {
        let mut controller = Controller::new("1029");
        let mut doc = HtmlDocument::new();
        doc.set_areas(&[make_area("1016", "Espoo")]);
        let Selection::Fetch(batch) = controller.select(&mut doc, "1016") else {
            panic!("1016 must start a batch");
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_batch(finnkino, omdb, batch, None, tx).await;
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event.clone());
            assert!(controller.apply(&mut doc, event));
        }
        (events, doc)
    }

    #[tokio::test]
    async fn test_batch_records_follow_completion_order() {
        // Arrange
        let finnkino = MockFinnkino::new(
            Vec::new(),
            vec![make_show("Slow", "slow.jpg"), make_show("Fast", "fast.jpg")],
        );
        let omdb = MockOmdb::new()
            .found("Slow", "p", "a")
            .found("Fast", "p", "a")
            .delayed("Slow", Duration::from_millis(50));

        // Act
        let (events, doc) = render(&finnkino, &omdb).await;

        // Assert
        let titles: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                BatchEvent::RecordReady { record, .. } => Some(record.title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["Fast", "Slow"]);

        let html = doc.movies_html();
        assert!(html.find("fast.jpg").unwrap() < html.find("slow.jpg").unwrap());
    }

    #[tokio::test]
    async fn test_batch_dropped_show_logs_one_warning() {
        // Arrange
        let finnkino = MockFinnkino::new(Vec::new(), vec![make_show("Broken", "")]);
        let omdb = MockOmdb::new().broken("Broken");

        let (subscriber, handle) = subscriber::mock()
            .with_filter(|meta| meta.is_event() && *meta.level() <= tracing::Level::WARN)
            .event(expect::event().at_level(tracing::Level::WARN))
            .only()
            .run_with_handle();
        let guard = tracing::subscriber::set_default(subscriber);

        // Act
        let (events, doc) = render(&finnkino, &omdb).await;

        // Assert
        drop(guard);
        handle.assert_finished();
        assert_eq!(events.len(), 2);
        assert_eq!(doc.movie_count(), 0);
    }

    #[tokio::test]
    async fn test_batch_stops_when_receiver_closed() {
        // Arrange
        let finnkino = MockFinnkino::new(Vec::new(), vec![make_show("A", "")]);
        let omdb = MockOmdb::new();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let batch = Batch {
            generation: 1,
            area: String::from("1016"),
        };

        // Act
        run_batch(&finnkino, &omdb, batch, None, tx).await;

        // Assert
        assert!(omdb.lookups.lock().unwrap().is_empty());
    }
}
