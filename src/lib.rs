//! Web frontends for NotebookLM, built on the `nlm` command-line client.
//!
//! - [`nlm`]: process invocation, error classification and JSON extraction
//!   behind the [`nlm::NotebookService`] interface.
//! - [`api`]: REST routes over that interface.
//! - [`ui`]: server-rendered pages with per-session state.

pub mod api;
pub mod config;
pub mod models;
pub mod nlm;
pub mod ui;
