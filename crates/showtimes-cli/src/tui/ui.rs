//! TUI rendering logic for the showtimes browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::state::{ActivePane, BrowserState};
use crate::listing::{ControllerState, RecordStatus};

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &BrowserState, status: ControllerState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state, status);
    draw_main(frame, chunks[1], state);
    draw_footer(frame, chunks[2]);
}

/// Status line text for a controller state.
fn status_text(status: ControllerState) -> String {
    match status {
        ControllerState::Idle => String::from("Loading areas..."),
        ControllerState::Ready => String::from("Ready"),
        ControllerState::Loading => String::from("Loading schedule..."),
        ControllerState::Populating { total, pending } => {
            format!("Fetching metadata {}/{}", total.saturating_sub(pending), total)
        }
    }
}

/// Draws the header with the displayed area and progress.
#[allow(clippy::indexing_slicing)]
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState, status: ControllerState) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let area_name = state.displayed_area_name().unwrap_or("-");
    let title = Paragraph::new(format!("Area: {area_name}")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Finnkino Showtimes "),
    );
    frame.render_widget(title, header_chunks[0]);

    let status_style = match status {
        ControllerState::Loading | ControllerState::Populating { .. } => {
            Style::default().fg(Color::Yellow)
        }
        ControllerState::Idle | ControllerState::Ready => Style::default(),
    };
    let progress = Paragraph::new(status_text(status))
        .style(status_style)
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(progress, header_chunks[1]);
}

/// Draws the main two-pane content.
#[allow(clippy::indexing_slicing)]
fn draw_main(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    draw_areas_pane(frame, pane_chunks[0], state);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(pane_chunks[1]);

    draw_movies_pane(frame, right_chunks[0], state);
    draw_details_pane(frame, right_chunks[1], state);
}

/// Border style for a pane.
fn pane_border(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Draws the area list (left pane).
fn draw_areas_pane(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let is_active = state.active_pane == ActivePane::Areas;

    let items: Vec<ListItem> = state
        .areas
        .iter()
        .enumerate()
        .map(|(i, theatre_area)| {
            let is_cursor = i == state.area_cursor && is_active;
            let is_displayed = state.displayed_area.as_deref() == Some(theatre_area.id.as_str());

            let marker = if is_cursor { "\u{25b8} " } else { "  " };
            let style = if is_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if is_displayed {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::raw(String::from(marker)),
                Span::styled(theatre_area.name.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(pane_border(is_active))
            .title(" Areas "),
    );

    frame.render_widget(list, area);
}

/// Draws the movie list (upper right pane).
fn draw_movies_pane(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let is_active = state.active_pane == ActivePane::Movies;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border(is_active))
        .title(format!(" Movies ({}) ", state.records.len()));

    if let Some(prompt) = &state.prompt {
        let paragraph = Paragraph::new(prompt.as_str())
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i == state.movie_cursor && is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if record.status == RecordStatus::Error {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(format!(" {}", record.title), style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Draws plot, cast and poster of the movie under the cursor.
fn draw_details_pane(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let lines = state.current_record().map_or_else(Vec::new, |record| {
        let poster = if record.poster_url.is_empty() {
            "-"
        } else {
            record.poster_url.as_str()
        };
        vec![
            Line::from(Span::styled(
                record.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(record.plot.clone()),
            Line::from(""),
            Line::from(format!("Actors: {}", record.actors)),
            Line::from(format!("Poster: {poster}")),
        ]
    });

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect) {
    let help_text = "Tab: pane switch  \u{2191}\u{2193}/j/k: move  Enter: select area  q/Esc: quit";
    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
