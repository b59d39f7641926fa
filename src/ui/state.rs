use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::models::{self, CreateNotebookInput, Notebook, Source};
use crate::nlm::NotebookService;

/// What one browser session is looking at.
///
/// Operations return `true` on success. On failure they record a message in
/// `error` and leave the lists exactly as they were.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub notebooks: Vec<Notebook>,
    pub current_notebook_id: Option<String>,
    pub sources: Vec<Source>,
    pub error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, action: &str, err: impl std::fmt::Display) -> bool {
        tracing::warn!("Failed to {}: {}", action, err);
        self.error = Some(format!("Failed to {}: {}", action, err));
        false
    }

    pub async fn load_notebooks(&mut self, service: &dyn NotebookService) -> bool {
        self.error = None;
        match service.list_notebooks().await {
            Ok(notebooks) => {
                self.notebooks = notebooks;
                true
            }
            Err(e) => self.fail("load notebooks", e),
        }
    }

    /// Create a notebook and put it at the front of the list.
    pub async fn create_notebook(
        &mut self,
        service: &dyn NotebookService,
        title: &str,
        emoji: Option<&str>,
    ) -> bool {
        self.error = None;
        let mut input = CreateNotebookInput::new(title);
        input.emoji = emoji.map(str::to_string);

        match service.create_notebook(&input).await {
            Ok(notebook) => {
                self.notebooks.insert(0, notebook);
                true
            }
            Err(e) => self.fail("create notebook", e),
        }
    }

    pub async fn delete_notebook(&mut self, service: &dyn NotebookService, notebook_id: &str) -> bool {
        self.error = None;
        match service.delete_notebook(notebook_id).await {
            Ok(_) => {
                self.notebooks
                    .retain(|nb| models::notebook_id(nb) != Some(notebook_id));
                if self.current_notebook_id.as_deref() == Some(notebook_id) {
                    self.current_notebook_id = None;
                    self.sources.clear();
                }
                true
            }
            Err(e) => self.fail("delete notebook", e),
        }
    }

    /// Load the sources of `notebook_id` and make it the current notebook.
    pub async fn load_sources(&mut self, service: &dyn NotebookService, notebook_id: &str) -> bool {
        self.error = None;
        match service.list_sources(notebook_id).await {
            Ok(sources) => {
                self.current_notebook_id = Some(notebook_id.to_string());
                self.sources = sources;
                true
            }
            Err(e) => self.fail("load sources", e),
        }
    }

    pub fn notebook(&self, notebook_id: &str) -> Option<&Notebook> {
        self.notebooks
            .iter()
            .find(|nb| models::notebook_id(nb) == Some(notebook_id))
    }
}

/// How long an idle session is kept.
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(3600);

struct SessionEntry {
    state: Arc<Mutex<SessionState>>,
    last_seen: Instant,
}

/// Per-session state, keyed by session ids this store issued.
///
/// Sessions idle for longer than `max_age` are dropped on the next access.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
    max_age: Duration,
}

impl SessionStore {
    pub fn new(max_age: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            max_age,
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    fn prune(&self, sessions: &mut HashMap<String, SessionEntry>) {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() <= self.max_age);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Expired idle sessions");
        }
    }

    /// Start a new, empty session and return its id.
    pub async fn issue(&self) -> (String, Arc<Mutex<SessionState>>) {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);

        let id = uuid::Uuid::new_v4().to_string();
        let state = Arc::new(Mutex::new(SessionState::new()));
        sessions.insert(
            id.clone(),
            SessionEntry {
                state: state.clone(),
                last_seen: Instant::now(),
            },
        );
        (id, state)
    }

    /// The live session `id`, if this store issued it and it has not
    /// expired. Marks the session as seen.
    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<SessionState>>> {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);

        let entry = sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.state.clone())
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_MAX_AGE)
    }
}
