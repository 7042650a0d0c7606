//! Presentation surface abstraction.

use showtimes_api::finnkino::TheatreArea;

use super::enrich::RenderRecord;

/// Surface the controller renders into (HTML document, TUI state).
pub trait PresentationSink {
    /// Populates the area selection control, one entry per area in order.
    fn set_areas(&mut self, areas: &[TheatreArea]);

    /// Marks `area_id` as the chosen area.
    fn mark_selected(&mut self, area_id: &str);

    /// Removes every movie block and any prompt.
    fn clear(&mut self);

    /// Shows a message in place of the movie list.
    fn show_prompt(&mut self, message: &str);

    /// Appends one movie block after the existing ones.
    fn append(&mut self, record: &RenderRecord);
}
