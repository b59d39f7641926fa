//! Server-rendered web interface.
//!
//! Every browser session gets its own [`SessionState`], keyed by the
//! `nlm_session` cookie; nothing is shared between sessions.

mod pages;
mod state;

pub use pages::{render_index, render_notebook};
pub use state::{SessionState, SessionStore, DEFAULT_SESSION_MAX_AGE};

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Form, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::api::AppState;
use crate::nlm::NotebookService;

pub const SESSION_COOKIE: &str = "nlm_session";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/notebooks", post(create_notebook))
        .route("/notebooks/{id}", get(notebook_page))
        .route("/notebooks/{id}/delete", post(delete_notebook))
}

#[derive(Debug, Deserialize)]
pub struct CreateNotebookForm {
    pub title: String,
    #[serde(default)]
    pub emoji: String,
}

/// The `nlm_session` cookie value sent with the request, if any.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value)
}

/// A session resolved for one request.
struct Session {
    id: String,
    /// Set when the id was issued by this request and still needs a cookie.
    is_new: bool,
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// The session named by the request cookie, or a freshly issued one
    /// when the cookie is missing, unknown or expired.
    async fn resolve(store: &SessionStore, headers: &HeaderMap) -> Self {
        if let Some(id) = session_cookie(headers) {
            if let Some(state) = store.get(id).await {
                return Self {
                    id: id.to_string(),
                    is_new: false,
                    state,
                };
            }
        }

        let (id, state) = store.issue().await;
        Self {
            id,
            is_new: true,
            state,
        }
    }

    /// Attach a `Set-Cookie` header when the session is new.
    fn respond(&self, mut response: Response, max_age: Duration) -> Response {
        if self.is_new {
            let cookie = format!(
                "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
                SESSION_COOKIE,
                self.id,
                max_age.as_secs()
            );
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
        }
        response
    }
}

/// Turn a rendered page into a response.
fn html(page: Result<String, minijinja::Error>) -> Response {
    match page {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

async fn index(State(app): State<AppState>, headers: HeaderMap) -> Response {
    let session = Session::resolve(&app.sessions, &headers).await;
    let mut state = session.state.lock().await;

    // A failed reload keeps the last good list on screen with the error.
    state.load_notebooks(app.service.as_ref()).await;
    let page = html(render_index(&state, app.service.mode()));
    session.respond(page, app.sessions.max_age())
}

async fn notebook_page(
    State(app): State<AppState>,
    Path(notebook_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let session = Session::resolve(&app.sessions, &headers).await;
    let mut state = session.state.lock().await;

    state.load_sources(app.service.as_ref(), &notebook_id).await;
    let page = html(render_notebook(&state, &notebook_id));
    session.respond(page, app.sessions.max_age())
}

async fn create_notebook(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CreateNotebookForm>,
) -> Response {
    let session = Session::resolve(&app.sessions, &headers).await;
    let mut state = session.state.lock().await;

    let emoji = Some(form.emoji.as_str()).filter(|e| !e.trim().is_empty());
    let response = if state
        .create_notebook(app.service.as_ref(), form.title.trim(), emoji)
        .await
    {
        Redirect::to("/").into_response()
    } else {
        // Re-render without reloading so the error stays visible.
        html(render_index(&state, app.service.mode()))
    };
    session.respond(response, app.sessions.max_age())
}

async fn delete_notebook(
    State(app): State<AppState>,
    Path(notebook_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let session = Session::resolve(&app.sessions, &headers).await;
    let mut state = session.state.lock().await;

    let response = if state
        .delete_notebook(app.service.as_ref(), &notebook_id)
        .await
    {
        Redirect::to("/").into_response()
    } else {
        html(render_index(&state, app.service.mode()))
    };
    session.respond(response, app.sessions.max_age())
}
