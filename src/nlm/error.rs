use thiserror::Error;

/// Errors raised while driving the `nlm` binary.
///
/// Every variant is terminal for the call that produced it; nothing here is
/// retried internally. Messages never carry credentials or the process
/// environment, so they are safe to hand back to end users.
#[derive(Debug, Error)]
pub enum NlmError {
    /// Input rejected before any process was spawned.
    #[error("{0}")]
    Validation(String),

    /// The binary could not be located, or exists but cannot be executed.
    #[error("nlm binary {problem} at: {path}")]
    BinaryNotFound { path: String, problem: BinaryProblem },

    #[error("Command timed out after {secs}s")]
    CommandTimeout { secs: u64 },

    #[error("{0}")]
    NotebookNotFound(String),

    #[error("{0}")]
    SourceNotFound(String),

    /// Non-zero exit that matched no specific rule.
    #[error("{0}")]
    CommandFailed(String),

    /// I/O failure talking to a process that did start.
    #[error("nlm process I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Why the nlm binary could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryProblem {
    Missing,
    NotExecutable,
}

impl std::fmt::Display for BinaryProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BinaryProblem::Missing => "not found",
            BinaryProblem::NotExecutable => "not executable",
        })
    }
}

impl NlmError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotebookNotFound(_) | Self::SourceNotFound(_))
    }
}
