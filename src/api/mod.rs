mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::nlm::NotebookService;
use crate::ui::{self, SessionStore};
pub use middleware::SecurityConfig;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn NotebookService>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(service: Arc<dyn NotebookService>, sessions: SessionStore) -> Self {
        Self { service, sessions }
    }
}

/// Router with no authentication and permissive CORS.
pub fn create_router(service: Arc<dyn NotebookService>) -> Router {
    create_router_with_config(service, SecurityConfig::disabled())
}

pub fn create_router_with_config(
    service: Arc<dyn NotebookService>,
    security: SecurityConfig,
) -> Router {
    let state = AppState::new(service, SessionStore::new(security.session_max_age));

    let api = Router::new()
        // Notebooks
        .route("/notebooks", get(handlers::list_notebooks))
        .route("/notebooks", post(handlers::create_notebook))
        .route("/notebooks/{id}", get(handlers::get_notebook))
        .route("/notebooks/{id}", delete(handlers::delete_notebook))
        // Sources
        .route("/notebooks/{id}/sources", get(handlers::list_sources))
        .route("/notebooks/{id}/sources", post(handlers::add_source))
        .route(
            "/notebooks/{id}/sources/{source_id}",
            delete(handlers::delete_source),
        )
        .route("/sources/{source_id}", put(handlers::rename_source))
        // Generated content
        .route(
            "/notebooks/{id}/generate/{kind}",
            post(handlers::generate_content),
        )
        // Audio overviews
        .route("/notebooks/{id}/audio", get(handlers::get_audio))
        .route("/notebooks/{id}/audio", post(handlers::create_audio))
        .route("/notebooks/{id}/audio", delete(handlers::delete_audio))
        .route("/notebooks/{id}/audio/list", get(handlers::list_audio))
        // Notes
        .route("/notebooks/{id}/notes", get(handlers::list_notes))
        .route("/notebooks/{id}/notes", post(handlers::create_note))
        .route("/notebooks/{id}/notes/{note_id}", put(handlers::update_note))
        .route("/notes/{note_id}", delete(handlers::delete_note));

    // Everything but /health sits behind the API key, pages included.
    let protected = Router::new()
        .nest("/api", api)
        .merge(ui::routes())
        .route_layer(from_fn_with_state(
            security.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&security))
        .with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    match &security.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
        None => CorsLayer::permissive(),
    }
}
