//! Showtime listing pipeline.
//!
//! A selection runs as one batch: the schedule is fetched, shows are
//! deduplicated by title, each unique show is enriched with OMDb metadata,
//! and the resulting records stream to a [`Controller`] that renders them
//! into a [`PresentationSink`].

mod batch;
mod controller;
mod dedupe;
mod enrich;
mod html;
mod sink;

pub use batch::run_batch;
pub use controller::{Controller, ControllerState, Selection};
pub use enrich::{RecordStatus, RenderRecord};
pub use html::HtmlDocument;
pub use sink::PresentationSink;

#[cfg(test)]
mod test_support;
