use async_trait::async_trait;
use serde::Serialize;

use super::error::NlmError;
use crate::models::*;

/// Which implementation is answering requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// Backed by the nlm binary.
    Live,
    /// Fixed sample data; no credentials configured.
    Demo,
}

/// Notebook, source, audio and note operations.
///
/// Callers depend on this interface only, never on how the work gets done.
/// List operations return an empty list when the backend yields no usable
/// array; boolean operations return `true` on success.
#[async_trait]
pub trait NotebookService: Send + Sync {
    fn mode(&self) -> ServiceMode;

    // Notebooks

    async fn list_notebooks(&self) -> Result<Vec<Notebook>, NlmError>;

    async fn create_notebook(&self, input: &CreateNotebookInput) -> Result<Notebook, NlmError>;

    async fn delete_notebook(&self, notebook_id: &str) -> Result<bool, NlmError>;

    /// Look a notebook up by `project_id`.
    async fn get_notebook(&self, notebook_id: &str) -> Result<Notebook, NlmError>;

    // Sources

    async fn list_sources(&self, notebook_id: &str) -> Result<Vec<Source>, NlmError>;

    async fn add_source(
        &self,
        notebook_id: &str,
        input: &AddSourceInput,
    ) -> Result<Source, NlmError>;

    async fn delete_source(&self, notebook_id: &str, source_id: &str) -> Result<bool, NlmError>;

    async fn rename_source(&self, source_id: &str, new_name: &str) -> Result<bool, NlmError>;

    // Generated content

    /// Generated prose, exactly as printed.
    async fn generate(&self, notebook_id: &str, kind: GenerateKind) -> Result<String, NlmError>;

    async fn generate_guide(&self, notebook_id: &str) -> Result<String, NlmError> {
        self.generate(notebook_id, GenerateKind::Guide).await
    }

    async fn generate_outline(&self, notebook_id: &str) -> Result<String, NlmError> {
        self.generate(notebook_id, GenerateKind::Outline).await
    }

    async fn generate_faq(&self, notebook_id: &str) -> Result<String, NlmError> {
        self.generate(notebook_id, GenerateKind::Faq).await
    }

    async fn generate_glossary(&self, notebook_id: &str) -> Result<String, NlmError> {
        self.generate(notebook_id, GenerateKind::Glossary).await
    }

    // Audio overviews

    async fn create_audio(
        &self,
        notebook_id: &str,
        input: &CreateAudioInput,
    ) -> Result<AudioOverview, NlmError>;

    async fn get_audio(&self, notebook_id: &str) -> Result<AudioOverview, NlmError>;

    async fn list_audio(&self, notebook_id: &str) -> Result<Vec<AudioOverview>, NlmError>;

    async fn delete_audio(&self, notebook_id: &str) -> Result<bool, NlmError>;

    // Notes

    async fn list_notes(&self, notebook_id: &str) -> Result<Vec<Note>, NlmError>;

    async fn create_note(&self, notebook_id: &str, input: &CreateNoteInput)
        -> Result<Note, NlmError>;

    async fn update_note(
        &self,
        notebook_id: &str,
        note_id: &str,
        input: &UpdateNoteInput,
    ) -> Result<bool, NlmError>;

    async fn delete_note(&self, note_id: &str) -> Result<bool, NlmError>;
}
