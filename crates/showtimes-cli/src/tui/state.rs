//! Browser state management.

use showtimes_api::finnkino::TheatreArea;

use crate::listing::{PresentationSink, RenderRecord};

/// Identifies which pane is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivePane {
    /// Left pane: theater areas.
    #[default]
    Areas,
    /// Right pane: movies of the displayed area.
    Movies,
}

/// Key handling outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    /// Nothing to do outside the state.
    None,
    /// Area chosen with Enter.
    Select(String),
    /// Leave the browser.
    Quit,
}

/// State for the browser TUI.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// All theater areas in listing order.
    pub areas: Vec<TheatreArea>,
    /// Area whose movies are displayed.
    pub displayed_area: Option<String>,
    /// Movie records in completion order.
    pub records: Vec<RenderRecord>,
    /// Message shown instead of the movie list.
    pub prompt: Option<String>,
    /// Active pane.
    pub active_pane: ActivePane,
    /// Cursor position in the area list.
    pub area_cursor: usize,
    /// Cursor position in the movie list.
    pub movie_cursor: usize,
}

impl BrowserState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Area under the cursor.
    #[must_use]
    pub fn current_area(&self) -> Option<&TheatreArea> {
        self.areas.get(self.area_cursor)
    }

    /// Movie under the cursor.
    #[must_use]
    pub fn current_record(&self) -> Option<&RenderRecord> {
        self.records.get(self.movie_cursor)
    }

    /// Name of the displayed area, if any.
    #[must_use]
    pub fn displayed_area_name(&self) -> Option<&str> {
        let id = self.displayed_area.as_deref()?;
        self.areas
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.as_str())
    }

    /// Moves the cursor up in the active pane.
    pub const fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Areas => self.area_cursor = self.area_cursor.saturating_sub(1),
            ActivePane::Movies => self.movie_cursor = self.movie_cursor.saturating_sub(1),
        }
    }

    /// Moves the cursor down in the active pane.
    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Areas => {
                if self.area_cursor.saturating_add(1) < self.areas.len() {
                    self.area_cursor = self.area_cursor.saturating_add(1);
                }
            }
            ActivePane::Movies => {
                if self.movie_cursor.saturating_add(1) < self.records.len() {
                    self.movie_cursor = self.movie_cursor.saturating_add(1);
                }
            }
        }
    }

    /// Switches between panes.
    pub const fn switch_pane(&mut self) {
        self.active_pane = match self.active_pane {
            ActivePane::Areas => ActivePane::Movies,
            ActivePane::Movies => ActivePane::Areas,
        };
    }

    /// Returns the action for Enter in the active pane.
    #[must_use]
    pub fn confirm(&self) -> BrowserAction {
        match self.active_pane {
            ActivePane::Areas => self
                .current_area()
                .map_or(BrowserAction::None, |a| BrowserAction::Select(a.id.clone())),
            ActivePane::Movies => BrowserAction::None,
        }
    }
}

impl PresentationSink for BrowserState {
    fn set_areas(&mut self, areas: &[TheatreArea]) {
        self.areas = areas.to_vec();
        self.area_cursor = 0;
    }

    fn mark_selected(&mut self, area_id: &str) {
        self.displayed_area = Some(String::from(area_id));
    }

    fn clear(&mut self) {
        self.records.clear();
        self.prompt = None;
        self.movie_cursor = 0;
    }

    fn show_prompt(&mut self, message: &str) {
        self.prompt = Some(String::from(message));
    }

    fn append(&mut self, record: &RenderRecord) {
        self.records.push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::listing::RecordStatus;

    fn area(id: &str, name: &str) -> TheatreArea {
        TheatreArea {
            id: String::from(id),
            name: String::from(name),
        }
    }

    fn record(title: &str) -> RenderRecord {
        RenderRecord {
            title: String::from(title),
            poster_url: String::new(),
            plot: String::new(),
            actors: String::new(),
            status: RecordStatus::Ok,
        }
    }

    fn make_test_state() -> BrowserState {
        let mut state = BrowserState::new();
        state.set_areas(&[
            area("1029", "Valitse alue/teatteri"),
            area("1014", "Pääkaupunkiseutu"),
            area("1016", "Espoo"),
        ]);
        state
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let state = make_test_state();

        // Assert
        assert_eq!(state.active_pane, ActivePane::Areas);
        assert_eq!(state.current_area().unwrap().id, "1029");
        assert!(state.displayed_area.is_none());
    }

    #[test]
    fn test_move_down_up_clamps() {
        // Arrange
        let mut state = make_test_state();

        // Act & Assert
        state.move_down();
        state.move_down();
        state.move_down();
        assert_eq!(state.area_cursor, 2);
        state.move_up();
        assert_eq!(state.area_cursor, 1);
        state.move_up();
        state.move_up();
        assert_eq!(state.area_cursor, 0);
    }

    #[test]
    fn test_confirm_selects_area_under_cursor() {
        // Arrange
        let mut state = make_test_state();
        state.move_down();
        state.move_down();

        // Act
        let action = state.confirm();

        // Assert
        assert_eq!(action, BrowserAction::Select(String::from("1016")));
    }

    #[test]
    fn test_confirm_in_movies_pane_does_nothing() {
        // Arrange
        let mut state = make_test_state();
        state.switch_pane();

        // Act
        let action = state.confirm();

        // Assert
        assert_eq!(action, BrowserAction::None);
    }

    #[test]
    fn test_sink_calls_update_movies() {
        // Arrange
        let mut state = make_test_state();
        state.show_prompt("Pick");

        // Act
        state.mark_selected("1016");
        state.clear();
        state.append(&record("A"));
        state.append(&record("B"));

        // Assert
        assert!(state.prompt.is_none());
        assert_eq!(state.displayed_area_name(), Some("Espoo"));
        let titles: Vec<&str> = state.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_clear_resets_movie_cursor() {
        // Arrange
        let mut state = make_test_state();
        state.append(&record("A"));
        state.append(&record("B"));
        state.switch_pane();
        state.move_down();
        assert_eq!(state.current_record().unwrap().title, "B");

        // Act
        state.clear();

        // Assert
        assert_eq!(state.movie_cursor, 0);
        assert!(state.current_record().is_none());
    }
}
