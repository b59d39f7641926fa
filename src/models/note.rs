use serde::{Deserialize, Serialize};

use super::check_len;
use crate::nlm::NlmError;

/// Input for creating a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub title: String,
}

impl CreateNoteInput {
    pub fn validate(&self) -> Result<(), NlmError> {
        check_len("title", &self.title, 1, 200)
    }
}

/// Input for replacing a note's content and title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    /// The note content (markdown supported).
    pub content: String,
    pub title: String,
}

impl UpdateNoteInput {
    pub fn validate(&self) -> Result<(), NlmError> {
        check_len("title", &self.title, 1, 200)
    }
}
