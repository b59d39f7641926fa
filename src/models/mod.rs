//! Request and response types shared by the service interface and the
//! HTTP layer.
//!
//! Notebooks, sources, audio overviews and notes are whatever JSON objects
//! the nlm binary prints; no schema is imposed beyond reading `project_id`
//! off notebooks. Inputs are typed and validated before any invocation.

mod audio;
mod content;
mod note;
mod notebook;
mod source;

pub use audio::*;
pub use content::*;
pub use note::*;
pub use notebook::*;
pub use source::*;

use crate::nlm::NlmError;

/// A notebook as printed by `nlm list --json`.
pub type Notebook = serde_json::Value;
/// A source as printed by `nlm sources --json`.
pub type Source = serde_json::Value;
pub type AudioOverview = serde_json::Value;
pub type Note = serde_json::Value;

/// Identifier field used to find a notebook in a listing.
pub const NOTEBOOK_ID_FIELD: &str = "project_id";

/// The `project_id` of a listed notebook, if it has one.
pub fn notebook_id(notebook: &Notebook) -> Option<&str> {
    notebook.get(NOTEBOOK_ID_FIELD).and_then(|v| v.as_str())
}

/// Reject `value` unless its length in characters is within `min..=max`.
pub(crate) fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), NlmError> {
    let len = value.chars().count();
    if len < min {
        return Err(NlmError::Validation(format!("{} must not be empty", field)));
    }
    if len > max {
        return Err(NlmError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
