use serde::{Deserialize, Serialize};

use super::check_len;
use crate::nlm::NlmError;

/// How `source_input` of an [`AddSourceInput`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A web URL.
    #[default]
    Url,
    /// A path on the machine running nlm.
    File,
    /// Literal text, piped to nlm on stdin.
    Text,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Url => "url",
            SourceType::File => "file",
            SourceType::Text => "text",
        }
    }
}

/// Input for adding a source to a notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSourceInput {
    /// URL, file path, or text content depending on `source_type`.
    pub source_input: String,
    #[serde(default)]
    pub source_type: SourceType,
    /// MIME type hint. Ignored for text sources.
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl AddSourceInput {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            source_input: url.into(),
            source_type: SourceType::Url,
            mime_type: None,
        }
    }

    pub fn file(path: impl Into<String>, mime_type: Option<String>) -> Self {
        Self {
            source_input: path.into(),
            source_type: SourceType::File,
            mime_type,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            source_input: content.into(),
            source_type: SourceType::Text,
            mime_type: None,
        }
    }

    pub fn validate(&self) -> Result<(), NlmError> {
        check_len("source_input", &self.source_input, 1, usize::MAX)
    }
}

/// Input for renaming a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameSourceInput {
    pub name: String,
}

impl RenameSourceInput {
    pub fn validate(&self) -> Result<(), NlmError> {
        check_len("name", &self.name, 1, 200)
    }
}
