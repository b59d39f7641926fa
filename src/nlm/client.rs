use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::classify::classify;
use super::error::NlmError;
use super::extract::{extract, Extracted};
use super::invocation::{Invocation, AUTH_TOKEN_ENV, COOKIES_ENV};
use super::runner::{ProcessRunner, Runner};
use super::service::{NotebookService, ServiceMode};
use crate::models::{self, *};

/// Default binary name, resolved through `PATH`.
pub const DEFAULT_BINARY: &str = "nlm";

/// Drives the nlm binary on behalf of one set of credentials.
///
/// Holds nothing but read-only configuration, so a single client can serve
/// any number of concurrent calls.
#[derive(Clone)]
pub struct NlmClient {
    auth_token: String,
    cookies: String,
    binary: String,
    runner: Arc<dyn Runner>,
}

impl NlmClient {
    /// Create a client running `nlm` from `PATH` with the default timeout.
    ///
    /// Both credentials are required; an empty one fails immediately.
    pub fn new(auth_token: impl Into<String>, cookies: impl Into<String>) -> Result<Self, NlmError> {
        let auth_token = auth_token.into();
        let cookies = cookies.into();
        if auth_token.is_empty() || cookies.is_empty() {
            return Err(NlmError::Validation(
                "auth_token and cookies are required".to_string(),
            ));
        }

        Ok(Self {
            auth_token,
            cookies,
            binary: DEFAULT_BINARY.to_string(),
            runner: Arc::new(ProcessRunner::default()),
        })
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_runner(mut self, runner: impl Runner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Build the invocation for `args`, carrying both credentials.
    fn invocation(&self, args: &[&str], stdin: Option<&str>) -> Invocation {
        let invocation = Invocation::new(&self.binary, args.iter().copied())
            .with_env(AUTH_TOKEN_ENV, &self.auth_token)
            .with_env(COOKIES_ENV, &self.cookies);
        match stdin {
            Some(payload) => invocation.with_stdin(payload),
            None => invocation,
        }
    }

    /// Run nlm with `args`, returning `(stdout, stderr)` on a zero exit.
    ///
    /// A non-zero exit is classified into a typed error.
    pub async fn run(&self, args: &[&str], stdin: Option<&str>) -> Result<(String, String), NlmError> {
        let invocation = self.invocation(args, stdin);
        tracing::debug!(
            binary = %self.binary,
            subcommand = invocation.subcommand(),
            "Running nlm"
        );

        let output = self.runner.run(&invocation).await?;
        if !output.is_success() {
            let err = classify(&output);
            tracing::debug!(
                subcommand = invocation.subcommand(),
                status = output.status,
                "nlm failed: {}",
                err
            );
            return Err(err);
        }

        Ok((output.stdout, output.stderr))
    }

    async fn run_extract(&self, args: &[&str], stdin: Option<&str>) -> Result<Extracted, NlmError> {
        let (stdout, _) = self.run(args, stdin).await?;
        let extracted = extract(&stdout);
        if !extracted.is_json() {
            tracing::debug!(subcommand = args[0], "No JSON found in nlm output");
        }
        Ok(extracted)
    }

    async fn run_list(&self, args: &[&str]) -> Result<Vec<serde_json::Value>, NlmError> {
        Ok(self.run_extract(args, None).await?.into_list())
    }

    async fn run_value(&self, args: &[&str], stdin: Option<&str>) -> Result<serde_json::Value, NlmError> {
        Ok(self.run_extract(args, stdin).await?.into_value())
    }

    async fn run_ok(&self, args: &[&str]) -> Result<bool, NlmError> {
        self.run(args, None).await?;
        Ok(true)
    }
}

impl fmt::Debug for NlmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NlmClient")
            .field("auth_token", &"<redacted>")
            .field("cookies", &"<redacted>")
            .field("binary", &self.binary)
            .finish()
    }
}

#[async_trait]
impl NotebookService for NlmClient {
    fn mode(&self) -> ServiceMode {
        ServiceMode::Live
    }

    async fn list_notebooks(&self) -> Result<Vec<Notebook>, NlmError> {
        self.run_list(&["list", "--json"]).await
    }

    async fn create_notebook(&self, input: &CreateNotebookInput) -> Result<Notebook, NlmError> {
        input.validate()?;
        let mut args = vec!["create", input.title.as_str()];
        if let Some(emoji) = input.emoji() {
            args.extend(["--emoji", emoji]);
        }
        self.run_value(&args, None).await
    }

    async fn delete_notebook(&self, notebook_id: &str) -> Result<bool, NlmError> {
        self.run_ok(&["rm", notebook_id]).await
    }

    // nlm has no "get" subcommand: list everything and scan.
    async fn get_notebook(&self, notebook_id: &str) -> Result<Notebook, NlmError> {
        self.list_notebooks()
            .await?
            .into_iter()
            .find(|nb| models::notebook_id(nb) == Some(notebook_id))
            .ok_or_else(|| NlmError::NotebookNotFound(format!("Notebook {} not found", notebook_id)))
    }

    async fn list_sources(&self, notebook_id: &str) -> Result<Vec<Source>, NlmError> {
        self.run_list(&["sources", notebook_id, "--json"]).await
    }

    async fn add_source(
        &self,
        notebook_id: &str,
        input: &AddSourceInput,
    ) -> Result<Source, NlmError> {
        input.validate()?;
        match input.source_type {
            SourceType::Text => {
                self.run_value(&["add", notebook_id, "-"], Some(input.source_input.as_str()))
                    .await
            }
            SourceType::Url | SourceType::File => {
                let mut args = vec!["add", notebook_id, input.source_input.as_str()];
                if let Some(mime) = input.mime_type.as_deref() {
                    args.extend(["--mime", mime]);
                }
                self.run_value(&args, None).await
            }
        }
    }

    async fn delete_source(&self, notebook_id: &str, source_id: &str) -> Result<bool, NlmError> {
        self.run_ok(&["rm-source", notebook_id, source_id]).await
    }

    async fn rename_source(&self, source_id: &str, new_name: &str) -> Result<bool, NlmError> {
        self.run_ok(&["rename-source", source_id, new_name]).await
    }

    async fn generate(&self, notebook_id: &str, kind: GenerateKind) -> Result<String, NlmError> {
        let (stdout, _) = self.run(&[kind.subcommand(), notebook_id], None).await?;
        Ok(stdout)
    }

    async fn create_audio(
        &self,
        notebook_id: &str,
        input: &CreateAudioInput,
    ) -> Result<AudioOverview, NlmError> {
        input.validate()?;
        self.run_value(&["audio-create", notebook_id, input.instructions.as_str()], None)
            .await
    }

    async fn get_audio(&self, notebook_id: &str) -> Result<AudioOverview, NlmError> {
        self.run_value(&["audio-get", notebook_id], None).await
    }

    async fn list_audio(&self, notebook_id: &str) -> Result<Vec<AudioOverview>, NlmError> {
        self.run_list(&["audio-list", notebook_id, "--json"]).await
    }

    async fn delete_audio(&self, notebook_id: &str) -> Result<bool, NlmError> {
        self.run_ok(&["audio-rm", notebook_id]).await
    }

    async fn list_notes(&self, notebook_id: &str) -> Result<Vec<Note>, NlmError> {
        self.run_list(&["notes", notebook_id, "--json"]).await
    }

    async fn create_note(&self, notebook_id: &str, input: &CreateNoteInput) -> Result<Note, NlmError> {
        input.validate()?;
        self.run_value(&["new-note", notebook_id, input.title.as_str()], None)
            .await
    }

    async fn update_note(
        &self,
        notebook_id: &str,
        note_id: &str,
        input: &UpdateNoteInput,
    ) -> Result<bool, NlmError> {
        input.validate()?;
        self.run_ok(&["update-note", notebook_id, note_id, input.content.as_str(), input.title.as_str()])
            .await
    }

    async fn delete_note(&self, note_id: &str) -> Result<bool, NlmError> {
        self.run_ok(&["rm-note", note_id]).await
    }
}
