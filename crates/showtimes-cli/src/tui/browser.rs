//! Browser TUI main loop.

use std::io;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use showtimes_api::finnkino::{FinnkinoApi, TheatreArea};
use showtimes_api::omdb::OmdbApi;
use tokio::sync::mpsc;

use super::state::{BrowserAction, BrowserState};
use super::ui;
use crate::listing::{Controller, Selection, run_batch};

/// Runs the browser TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<F, O>(
    finnkino: &F,
    omdb: &O,
    areas: &[TheatreArea],
    placeholder_area: &str,
    date: Option<NaiveDate>,
) -> Result<()>
where
    F: FinnkinoApi + Sync,
    O: OmdbApi + Sync,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut state = BrowserState::new();
    let mut controller = Controller::new(placeholder_area);
    controller.areas_loaded(&mut state, areas);

    let result = run_event_loop(
        &mut terminal,
        &mut state,
        &mut controller,
        finnkino,
        omdb,
        date,
    )
    .await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
///
/// Terminal input, batch events and the running batches are polled on
/// the same task. Superseded batches keep running; their events are
/// discarded by the controller.
async fn run_event_loop<F, O>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    controller: &mut Controller,
    finnkino: &F,
    omdb: &O,
    date: Option<NaiveDate>,
) -> Result<()>
where
    F: FinnkinoApi + Sync,
    O: OmdbApi + Sync,
{
    let mut events = EventStream::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut batches = FuturesUnordered::new();

    loop {
        let status = controller.state();
        terminal
            .draw(|frame| ui::draw(frame, state, status))
            .context("failed to draw TUI")?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_key(state, key.code, key.modifiers) {
                        BrowserAction::Quit => return Ok(()),
                        BrowserAction::Select(area_id) => {
                            if let Selection::Fetch(batch) = controller.select(state, &area_id) {
                                batches.push(run_batch(finnkino, omdb, batch, date, tx.clone()));
                            }
                        }
                        BrowserAction::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("failed to read terminal event"),
                None => return Ok(()),
            },
            Some(event) = rx.recv() => {
                controller.apply(state, event);
            }
            Some(()) = batches.next(), if !batches.is_empty() => {}
        }
    }
}

/// Handles key input. Returns the action for the event loop.
fn handle_key(state: &mut BrowserState, key: KeyCode, modifiers: KeyModifiers) -> BrowserAction {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => BrowserAction::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => BrowserAction::Quit,
        KeyCode::Enter => state.confirm(),
        KeyCode::Tab | KeyCode::BackTab => {
            state.switch_pane();
            BrowserAction::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up();
            BrowserAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down();
            BrowserAction::None
        }
        _ => BrowserAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::PresentationSink;

    fn make_test_state() -> BrowserState {
        let mut state = BrowserState::new();
        state.set_areas(&[
            TheatreArea {
                id: String::from("1029"),
                name: String::from("Valitse alue/teatteri"),
            },
            TheatreArea {
                id: String::from("1016"),
                name: String::from("Espoo"),
            },
        ]);
        state
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut state = make_test_state();

        // Act & Assert
        assert_eq!(
            handle_key(&mut state, KeyCode::Char('q'), KeyModifiers::NONE),
            BrowserAction::Quit
        );
        assert_eq!(
            handle_key(&mut state, KeyCode::Esc, KeyModifiers::NONE),
            BrowserAction::Quit
        );
        assert_eq!(
            handle_key(&mut state, KeyCode::Char('c'), KeyModifiers::CONTROL),
            BrowserAction::Quit
        );
    }

    #[test]
    fn test_navigate_and_select() {
        // Arrange
        let mut state = make_test_state();

        // Act
        let moved = handle_key(&mut state, KeyCode::Char('j'), KeyModifiers::NONE);
        let action = handle_key(&mut state, KeyCode::Enter, KeyModifiers::NONE);

        // Assert
        assert_eq!(moved, BrowserAction::None);
        assert_eq!(action, BrowserAction::Select(String::from("1016")));
    }

    #[test]
    fn test_plain_c_is_ignored() {
        // Arrange
        let mut state = make_test_state();

        // Act
        let action = handle_key(&mut state, KeyCode::Char('c'), KeyModifiers::NONE);

        // Assert
        assert_eq!(action, BrowserAction::None);
    }
}
