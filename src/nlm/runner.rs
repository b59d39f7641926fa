//! Process invocation for the nlm binary.
//!
//! [`Runner`] is the single seam through which the rest of the crate touches
//! processes. [`ProcessRunner`] spawns the real binary; [`ScriptedRunner`]
//! replays canned outputs so client behaviour can be exercised without one.

use std::collections::VecDeque;
use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::error::{BinaryProblem, NlmError};
use super::invocation::{Invocation, InvocationOutput};

/// Wall-clock limit for a single nlm invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Executes an [`Invocation`] and captures what it printed.
///
/// Implementations report a started-and-finished process as `Ok`, whatever
/// its exit status; interpreting the status is the caller's job.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, NlmError>;
}

/// Spawns one child process per invocation.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Runner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, NlmError> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out child is killed when its future is dropped.
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => NlmError::BinaryNotFound {
                path: invocation.program.clone(),
                problem: BinaryProblem::Missing,
            },
            ErrorKind::PermissionDenied => NlmError::BinaryNotFound {
                path: invocation.program.clone(),
                problem: BinaryProblem::NotExecutable,
            },
            _ => NlmError::Io(e),
        })?;

        let stdin = child.stdin.take();
        let payload = invocation.stdin.clone();
        let feed = async move {
            if let (Some(mut pipe), Some(payload)) = (stdin, payload) {
                match pipe.write_all(payload.as_bytes()).await {
                    // The child may exit without reading its input.
                    Err(e) if e.kind() != ErrorKind::BrokenPipe => return Err(e),
                    _ => {}
                }
            }
            Ok(())
        };

        let finished = tokio::time::timeout(self.timeout, async {
            tokio::try_join!(feed, child.wait_with_output())
        })
        .await;

        let output = match finished {
            Ok(result) => result?.1,
            Err(_) => {
                tracing::warn!(
                    subcommand = invocation.subcommand(),
                    timeout_secs = self.timeout.as_secs(),
                    "nlm invocation timed out"
                );
                return Err(NlmError::CommandTimeout {
                    secs: self.timeout.as_secs(),
                });
            }
        };

        Ok(InvocationOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code().unwrap_or(-1),
        })
    }
}

/// Test double: replays queued results in order and records every
/// invocation it sees. Never spawns a process.
///
/// Once the queue is drained, further calls succeed with empty output.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    responses: Arc<Mutex<VecDeque<Result<InvocationOutput, NlmError>>>>,
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful run printing `stdout`.
    pub fn respond(self, stdout: impl Into<String>) -> Self {
        self.push(Ok(InvocationOutput::success(stdout)))
    }

    /// Queue a run exiting with `status` and printing `stderr`.
    pub fn fail(self, status: i32, stderr: impl Into<String>) -> Self {
        self.push(Ok(InvocationOutput::failure(status, stderr)))
    }

    pub fn output(self, output: InvocationOutput) -> Self {
        self.push(Ok(output))
    }

    /// Queue an error raised before any output exists (e.g. a timeout).
    pub fn error(self, error: NlmError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<InvocationOutput, NlmError>) -> Self {
        lock(&self.responses).push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        lock(&self.calls).clone()
    }

    /// Argument vectors of every recorded call.
    pub fn call_args(&self) -> Vec<Vec<String>> {
        self.calls().into_iter().map(|c| c.args).collect()
    }
}

// A panicking test thread must not hide the recorded calls from the rest.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Runner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, NlmError> {
        lock(&self.calls).push(invocation.clone());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(InvocationOutput::default()))
    }
}
