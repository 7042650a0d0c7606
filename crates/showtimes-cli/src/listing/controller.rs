//! Selection state machine.
//!
//! Each non-placeholder selection starts a batch tagged with a fresh
//! generation. Events from older generations are discarded, so a slow
//! batch never renders into the list of a newer selection.

use showtimes_api::finnkino::TheatreArea;

use super::enrich::RenderRecord;
use super::sink::PresentationSink;

/// Message shown when no area is selected.
pub const PICK_THEATRE_PROMPT: &str = "Pick a theatre to display movies!";

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Areas not loaded yet.
    Idle,
    /// Waiting for a selection.
    Ready,
    /// Schedule requested.
    Loading,
    /// Metadata requests in flight.
    Populating {
        /// Requests issued for the batch.
        total: usize,
        /// Requests not yet completed.
        pending: usize,
    },
}

/// Work triggered by one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Selection sequence number.
    pub generation: u64,
    /// Area ID to fetch.
    pub area: String,
}

/// What the caller must do after a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Placeholder selected; the prompt is already shown.
    Prompt,
    /// Run the batch.
    Fetch(Batch),
}

/// Progress reported by a running batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// Schedule parsed and deduplicated; `count` lookups follow.
    ScheduleReceived {
        /// Batch generation.
        generation: u64,
        /// Number of unique shows.
        count: usize,
    },
    /// One show enriched.
    RecordReady {
        /// Batch generation.
        generation: u64,
        /// Rendered record.
        record: RenderRecord,
    },
    /// One show dropped because its metadata request failed.
    RecordDropped {
        /// Batch generation.
        generation: u64,
        /// Title of the dropped show.
        title: String,
    },
    /// Schedule request failed; the batch ends.
    ScheduleFailed {
        /// Batch generation.
        generation: u64,
        /// Error chain.
        error: String,
    },
}

impl BatchEvent {
    /// Generation of the batch that produced the event.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        match self {
            Self::ScheduleReceived { generation, .. }
            | Self::RecordReady { generation, .. }
            | Self::RecordDropped { generation, .. }
            | Self::ScheduleFailed { generation, .. } => *generation,
        }
    }
}

/// Drives a [`PresentationSink`] through selections and batch events.
#[derive(Debug)]
pub struct Controller {
    state: ControllerState,
    generation: u64,
    placeholder_area: String,
}

impl Controller {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(placeholder_area: impl Into<String>) -> Self {
        Self {
            state: ControllerState::Idle,
            generation: 0,
            placeholder_area: placeholder_area.into(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Populates the area control and shows the prompt.
    pub fn areas_loaded<S: PresentationSink>(&mut self, sink: &mut S, areas: &[TheatreArea]) {
        sink.set_areas(areas);
        sink.show_prompt(PICK_THEATRE_PROMPT);
        self.state = ControllerState::Ready;
        tracing::debug!(areas = areas.len(), "Areas loaded");
    }

    /// Handles a selection change.
    ///
    /// Every selection, placeholder included, supersedes the batch in flight.
    pub fn select<S: PresentationSink>(&mut self, sink: &mut S, area_id: &str) -> Selection {
        self.generation = self.generation.saturating_add(1);
        sink.mark_selected(area_id);

        if area_id == self.placeholder_area {
            sink.clear();
            sink.show_prompt(PICK_THEATRE_PROMPT);
            self.state = ControllerState::Ready;
            tracing::debug!(generation = self.generation, "Placeholder area selected");
            return Selection::Prompt;
        }

        self.state = ControllerState::Loading;
        tracing::debug!(generation = self.generation, area = area_id, "Batch started");
        Selection::Fetch(Batch {
            generation: self.generation,
            area: String::from(area_id),
        })
    }

    /// Applies a batch event. Returns `false` if the event was stale.
    pub fn apply<S: PresentationSink>(&mut self, sink: &mut S, event: BatchEvent) -> bool {
        if event.generation() != self.generation {
            tracing::debug!(
                event_generation = event.generation(),
                current = self.generation,
                "Discarding stale batch event"
            );
            return false;
        }

        match event {
            BatchEvent::ScheduleReceived { count, .. } => {
                sink.clear();
                self.state = if count == 0 {
                    ControllerState::Ready
                } else {
                    ControllerState::Populating {
                        total: count,
                        pending: count,
                    }
                };
            }
            BatchEvent::RecordReady { record, .. } => {
                sink.append(&record);
                self.complete_one();
            }
            BatchEvent::RecordDropped { title, .. } => {
                tracing::debug!(%title, "Show dropped");
                self.complete_one();
            }
            BatchEvent::ScheduleFailed { error, .. } => {
                sink.clear();
                tracing::error!(%error, "Schedule request failed");
                self.state = ControllerState::Ready;
            }
        }
        true
    }

    fn complete_one(&mut self) {
        if let ControllerState::Populating { total, pending } = self.state {
            let pending = pending.saturating_sub(1);
            self.state = if pending == 0 {
                ControllerState::Ready
            } else {
                ControllerState::Populating { total, pending }
            };
        }
    }
}
