use async_trait::async_trait;
use serde_json::json;

use super::error::NlmError;
use super::service::{NotebookService, ServiceMode};
use crate::models::{self, *};

/// Sample-data stand-in used when no credentials are configured.
///
/// Writes are accepted and forgotten; reads always return the same two
/// notebooks.
#[derive(Debug, Clone, Default)]
pub struct DemoClient;

impl DemoClient {
    pub fn new() -> Self {
        Self
    }

    fn notebooks() -> Vec<Notebook> {
        vec![
            json!({
                "project_id": "demo-nb-1",
                "title": "Demo Research Notebook",
                "emoji": "📚",
                "sources": [],
            }),
            json!({
                "project_id": "demo-nb-2",
                "title": "Demo Study Notes",
                "emoji": "📖",
                "sources": [],
            }),
        ]
    }
}

#[async_trait]
impl NotebookService for DemoClient {
    fn mode(&self) -> ServiceMode {
        ServiceMode::Demo
    }

    async fn list_notebooks(&self) -> Result<Vec<Notebook>, NlmError> {
        Ok(Self::notebooks())
    }

    async fn create_notebook(&self, input: &CreateNotebookInput) -> Result<Notebook, NlmError> {
        input.validate()?;
        Ok(json!({
            "project_id": "demo-nb-new",
            "title": input.title,
            "emoji": input.emoji().unwrap_or("📝"),
        }))
    }

    async fn delete_notebook(&self, _notebook_id: &str) -> Result<bool, NlmError> {
        Ok(true)
    }

    async fn get_notebook(&self, notebook_id: &str) -> Result<Notebook, NlmError> {
        Self::notebooks()
            .into_iter()
            .find(|nb| models::notebook_id(nb) == Some(notebook_id))
            .ok_or_else(|| NlmError::NotebookNotFound(format!("Notebook {} not found", notebook_id)))
    }

    async fn list_sources(&self, _notebook_id: &str) -> Result<Vec<Source>, NlmError> {
        Ok(Vec::new())
    }

    async fn add_source(
        &self,
        _notebook_id: &str,
        input: &AddSourceInput,
    ) -> Result<Source, NlmError> {
        input.validate()?;
        Ok(json!({
            "source_id": "demo-src-new",
            "title": input.source_input,
            "source_type": input.source_type.as_str(),
        }))
    }

    async fn delete_source(&self, _notebook_id: &str, _source_id: &str) -> Result<bool, NlmError> {
        Ok(true)
    }

    async fn rename_source(&self, _source_id: &str, _new_name: &str) -> Result<bool, NlmError> {
        Ok(true)
    }

    async fn generate(&self, notebook_id: &str, kind: GenerateKind) -> Result<String, NlmError> {
        Ok(format!(
            "Demo {} for notebook {}.\nConfigure NLM_AUTH_TOKEN and NLM_COOKIES to generate real content.\n",
            kind, notebook_id
        ))
    }

    async fn create_audio(
        &self,
        _notebook_id: &str,
        input: &CreateAudioInput,
    ) -> Result<AudioOverview, NlmError> {
        input.validate()?;
        Ok(json!({ "audio_id": "demo-audio", "status": "pending" }))
    }

    async fn get_audio(&self, _notebook_id: &str) -> Result<AudioOverview, NlmError> {
        Ok(json!({ "audio_id": "demo-audio", "status": "pending" }))
    }

    async fn list_audio(&self, _notebook_id: &str) -> Result<Vec<AudioOverview>, NlmError> {
        Ok(Vec::new())
    }

    async fn delete_audio(&self, _notebook_id: &str) -> Result<bool, NlmError> {
        Ok(true)
    }

    async fn list_notes(&self, _notebook_id: &str) -> Result<Vec<Note>, NlmError> {
        Ok(Vec::new())
    }

    async fn create_note(&self, _notebook_id: &str, input: &CreateNoteInput) -> Result<Note, NlmError> {
        input.validate()?;
        Ok(json!({ "note_id": "demo-note-new", "title": input.title }))
    }

    async fn update_note(
        &self,
        _notebook_id: &str,
        _note_id: &str,
        input: &UpdateNoteInput,
    ) -> Result<bool, NlmError> {
        input.validate()?;
        Ok(true)
    }

    async fn delete_note(&self, _note_id: &str) -> Result<bool, NlmError> {
        Ok(true)
    }
}
