//! Everything that talks to the nlm command-line client.
//!
//! Each domain operation is "build an argument vector, invoke, then either
//! classify the failure or extract the result":
//!
//! - [`runner`]: spawns the binary with credentials and a timeout.
//! - [`classify`]: turns a non-zero exit into a typed [`NlmError`].
//! - [`extract`]: digs a JSON value out of possibly noisy stdout.
//! - [`NlmClient`]: the argument builders, behind [`NotebookService`].
//! - [`DemoClient`]: canned data for running without credentials.

pub mod classify;
mod client;
mod demo;
mod error;
pub mod extract;
mod invocation;
pub mod runner;
mod service;

pub use client::NlmClient;
pub use demo::DemoClient;
pub use error::{BinaryProblem, NlmError};
pub use extract::{extract, Extracted};
pub use invocation::{Invocation, InvocationOutput, AUTH_TOKEN_ENV, COOKIES_ENV};
pub use runner::{ProcessRunner, Runner, ScriptedRunner, DEFAULT_TIMEOUT};
pub use service::{NotebookService, ServiceMode};
