use serde::{Deserialize, Serialize};

use super::check_len;
use crate::nlm::NlmError;

/// Input for creating a notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotebookInput {
    pub title: String,
    /// Optional emoji shown next to the title. An empty string means none.
    #[serde(default)]
    pub emoji: Option<String>,
}

impl CreateNotebookInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            emoji: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn validate(&self) -> Result<(), NlmError> {
        check_len("title", &self.title, 1, 200)?;
        if let Some(emoji) = &self.emoji {
            check_len("emoji", emoji, 0, 10)?;
        }
        Ok(())
    }

    /// The emoji to pass on, with blanks treated as absent.
    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref().filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_title() {
        assert!(matches!(
            CreateNotebookInput::new("").validate(),
            Err(NlmError::Validation(_))
        ));
    }

    #[test]
    fn rejects_long_title() {
        let input = CreateNotebookInput::new("x".repeat(201));
        assert!(input.validate().is_err());
        assert!(CreateNotebookInput::new("x".repeat(200)).validate().is_ok());
    }

    #[test]
    fn emoji_is_measured_in_characters() {
        assert!(CreateNotebookInput::new("Notes").with_emoji("📚📚").validate().is_ok());
        let long = CreateNotebookInput::new("Notes").with_emoji("📚".repeat(11));
        assert!(long.validate().is_err());
    }

    #[test]
    fn blank_emoji_is_none() {
        assert_eq!(CreateNotebookInput::new("Notes").with_emoji("").emoji(), None);
        assert_eq!(CreateNotebookInput::new("Notes").with_emoji("📖").emoji(), Some("📖"));
    }
}
