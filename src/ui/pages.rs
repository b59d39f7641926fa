//! HTML rendering for the web interface.
//!
//! Pages are minijinja templates compiled into the binary. Their names end
//! in `.html`, so every interpolated value is HTML-escaped.

use minijinja::{context, Environment, Error};
use serde::Serialize;
use serde_json::Value;

use super::state::SessionState;
use crate::models::{self, Notebook, Source};
use crate::nlm::ServiceMode;

pub const BASE_TEMPLATE: &str = include_str!("templates/base.html");
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
pub const NOTEBOOK_TEMPLATE: &str = include_str!("templates/notebook.html");

fn environment() -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.add_template("base.html", BASE_TEMPLATE)?;
    env.add_template("index.html", INDEX_TEMPLATE)?;
    env.add_template("notebook.html", NOTEBOOK_TEMPLATE)?;
    Ok(env)
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// What a notebook card shows.
#[derive(Debug, Serialize)]
struct NotebookCard<'a> {
    id: &'a str,
    title: &'a str,
    emoji: &'a str,
    source_count: usize,
}

impl<'a> NotebookCard<'a> {
    fn from_notebook(notebook: &'a Notebook) -> Self {
        Self {
            id: models::notebook_id(notebook).unwrap_or(""),
            title: str_field(notebook, "title").unwrap_or("Untitled"),
            emoji: str_field(notebook, "emoji").unwrap_or("📚"),
            source_count: notebook
                .get("sources")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
        }
    }
}

/// The notebook list page.
pub fn render_index(state: &SessionState, mode: ServiceMode) -> Result<String, Error> {
    let notebooks: Vec<NotebookCard> = state
        .notebooks
        .iter()
        .map(NotebookCard::from_notebook)
        .collect();

    environment()?.get_template("index.html")?.render(context! {
        notebooks => &notebooks,
        demo => mode == ServiceMode::Demo,
        error => &state.error,
    })
}

/// Display name of a source: its title, else its id.
fn source_label(source: &Source) -> String {
    if let Some(title) = str_field(source, "title") {
        return title.to_string();
    }
    // nlm reports source ids either as a string or as {"source_id": "..."}.
    match source.get("source_id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Object(inner)) => inner
            .get("source_id")
            .and_then(Value::as_str)
            .unwrap_or("Untitled source")
            .to_string(),
        _ => "Untitled source".to_string(),
    }
}

/// The detail page of one notebook with its sources.
pub fn render_notebook(state: &SessionState, notebook_id: &str) -> Result<String, Error> {
    let title = state
        .notebook(notebook_id)
        .and_then(|nb| str_field(nb, "title"))
        .unwrap_or(notebook_id);

    let sources: Vec<String> = if state.current_notebook_id.as_deref() == Some(notebook_id) {
        state.sources.iter().map(source_label).collect()
    } else {
        Vec::new()
    };

    environment()?.get_template("notebook.html")?.render(context! {
        title => title,
        notebook_id => notebook_id,
        sources => &sources,
        error => &state.error,
    })
}
