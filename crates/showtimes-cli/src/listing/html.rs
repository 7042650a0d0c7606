//! Standalone HTML document sink.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use showtimes_api::finnkino::TheatreArea;

use super::enrich::RenderRecord;
use super::sink::PresentationSink;

/// Stylesheet embedded in the page head.
const STYLESHEET: &str = "\
body { font-family: sans-serif; margin: 2rem; }
#movies { display: flex; flex-direction: column; gap: 1rem; }
.movie { border: 1px solid #ccc; border-radius: 4px; padding: 1rem; }
.movie.error { border-color: #c33; }
.movie-container { display: grid; grid-template-columns: 120px 1fr; gap: 0 1rem; }
.poster { grid-row: span 3; width: 120px; }
.title { margin: 0; }
.prompt { font-style: italic; }
footer { margin-top: 2rem; color: #777; font-size: 0.8rem; }
";

/// HTML page built from presentation calls.
#[derive(Debug, Default)]
pub struct HtmlDocument {
    areas: Vec<TheatreArea>,
    selected_area: Option<String>,
    prompt: Option<String>,
    movies: Vec<String>,
}

impl HtmlDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of movie blocks appended since the last clear.
    #[must_use]
    pub const fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Renders the `<select id="areas">` control.
    #[must_use]
    pub fn areas_html(&self) -> String {
        let mut out = String::from("<select id=\"areas\">\n");
        for area in &self.areas {
            let selected = if self.selected_area.as_deref() == Some(area.id.as_str()) {
                " selected"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  <option value=\"{}\"{selected}>{}</option>",
                escape_html(&area.id),
                escape_html(&area.name)
            );
        }
        out.push_str("</select>");
        out
    }

    /// Renders the `#movies` container with its blocks or prompt.
    #[must_use]
    pub fn movies_html(&self) -> String {
        let mut out = String::from("<div id=\"movies\">\n");
        if let Some(prompt) = &self.prompt {
            let _ = writeln!(out, "<p class=\"prompt\">{}</p>", escape_html(prompt));
        }
        for block in &self.movies {
            out.push_str(block);
        }
        out.push_str("</div>");
        out
    }

    /// Renders the complete page.
    #[must_use]
    pub fn render_page(&self, generated_at: DateTime<Local>) -> String {
        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"fi\">\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <title>Finnkino showtimes</title>\n\
             <style>\n{STYLESHEET}</style>\n\
             </head>\n\
             <body>\n\
             <h1>Finnkino showtimes</h1>\n\
             {}\n\
             {}\n\
             <footer>Generated {}</footer>\n\
             </body>\n\
             </html>\n",
            self.areas_html(),
            self.movies_html(),
            generated_at.format("%Y-%m-%d %H:%M:%S %:z"),
        )
    }
}

impl PresentationSink for HtmlDocument {
    fn set_areas(&mut self, areas: &[TheatreArea]) {
        self.areas = areas.to_vec();
    }

    fn mark_selected(&mut self, area_id: &str) {
        self.selected_area = Some(String::from(area_id));
    }

    fn clear(&mut self) {
        self.movies.clear();
        self.prompt = None;
    }

    fn show_prompt(&mut self, message: &str) {
        self.prompt = Some(String::from(message));
    }

    fn append(&mut self, record: &RenderRecord) {
        self.movies.push(render_movie(record));
    }
}

/// Renders one movie block.
fn render_movie(record: &RenderRecord) -> String {
    let poster = if record.poster_url.is_empty() {
        format!("<img class=\"poster\" alt=\"{}\">", escape_html(&record.title))
    } else {
        format!(
            "<img class=\"poster\" src=\"{}\" alt=\"{}\">",
            escape_html(&record.poster_url),
            escape_html(&record.title)
        )
    };
    format!(
        "<div class=\"movie {}\">\n\
         <div class=\"movie-container\">\n\
         {poster}\n\
         <h2 class=\"title\">{}</h2>\n\
         <div class=\"plot\">{}</div>\n\
         <div class=\"actors\">{}</div>\n\
         </div>\n\
         </div>\n",
        record.status.css_class(),
        escape_html(&record.title),
        escape_html(&record.plot),
        escape_html(&record.actors),
    )
}

/// Escapes text for use in element content and quoted attributes.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
