use std::fmt;

/// Environment variable carrying the auth token into the nlm process.
pub const AUTH_TOKEN_ENV: &str = "NLM_AUTH_TOKEN";
/// Environment variable carrying the cookie string into the nlm process.
pub const COOKIES_ENV: &str = "NLM_COOKIES";

/// One execution of the nlm binary: program, arguments, optional stdin
/// payload and the environment variables injected for it.
///
/// Built fresh for every call and consumed by a [`Runner`](super::Runner).
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
            env: Vec::new(),
        }
    }

    pub fn with_stdin(mut self, payload: impl Into<String>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The nlm subcommand (first argument), used for logging.
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// Env values are credentials; only their names are printed.
impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_keys: Vec<&str> = self.env.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Invocation")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("stdin", &self.stdin.as_ref().map(|s| s.len()))
            .field("env", &env_keys)
            .finish()
    }
}

/// Captured result of a finished invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit status; `-1` when the process was terminated by a signal.
    pub status: i32,
}

impl InvocationOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: 0,
        }
    }

    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}
