//! Runtime settings, read from environment variables.

use std::sync::Arc;
use std::time::Duration;

use crate::nlm::{DemoClient, NlmClient, NlmError, NotebookService, ProcessRunner, DEFAULT_TIMEOUT};
use crate::ui::DEFAULT_SESSION_MAX_AGE;

#[derive(Clone)]
pub struct Settings {
    /// NotebookLM auth token (`NLM_AUTH_TOKEN`).
    pub auth_token: String,
    /// NotebookLM cookie string (`NLM_COOKIES`).
    pub cookies: String,
    /// Path or name of the nlm binary (`NLM_PATH`).
    pub nlm_path: String,
    /// Per-invocation timeout (`NLM_TIMEOUT_SECS`).
    pub timeout: Duration,
    /// Bind address (`NLM_WEB_HOST`).
    pub host: String,
    /// Bind port (`NLM_WEB_PORT`).
    pub port: u16,
    /// Bearer token required on `/api` routes (`NLM_WEB_API_KEY`).
    pub api_key: Option<String>,
    /// Allowed CORS origins (`NLM_WEB_CORS_ORIGINS`, comma-separated).
    pub cors_origins: Option<Vec<String>>,
    /// Idle lifetime of a web UI session (`NLM_WEB_SESSION_MAX_AGE`, seconds).
    pub session_max_age: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout = non_empty("NLM_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let session_max_age = non_empty("NLM_WEB_SESSION_MAX_AGE")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SESSION_MAX_AGE);

        let port = non_empty("NLM_WEB_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8000);

        let cors_origins = non_empty("NLM_WEB_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect()
        });

        Self {
            auth_token: non_empty("NLM_AUTH_TOKEN").unwrap_or_default(),
            cookies: non_empty("NLM_COOKIES").unwrap_or_default(),
            nlm_path: non_empty("NLM_PATH").unwrap_or_else(|| "nlm".to_string()),
            timeout,
            host: non_empty("NLM_WEB_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            api_key: non_empty("NLM_WEB_API_KEY"),
            cors_origins,
            session_max_age,
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.auth_token.is_empty() && !self.cookies.is_empty()
    }

    /// The live nlm client when credentials are configured, the demo
    /// client otherwise.
    pub fn build_service(&self) -> Result<Arc<dyn NotebookService>, NlmError> {
        if !self.has_credentials() {
            tracing::warn!("NLM_AUTH_TOKEN or NLM_COOKIES not set; serving demo data");
            return Ok(Arc::new(DemoClient::new()));
        }

        let client = NlmClient::new(&self.auth_token, &self.cookies)?
            .with_binary(&self.nlm_path)
            .with_runner(ProcessRunner::new(self.timeout));
        Ok(Arc::new(client))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("has_credentials", &self.has_credentials())
            .field("nlm_path", &self.nlm_path)
            .field("timeout", &self.timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("cors_origins", &self.cors_origins)
            .field("session_max_age", &self.session_max_age)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlm::ServiceMode;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let s = settings(&[]);
        assert_eq!(s.nlm_path, "nlm");
        assert_eq!(s.timeout, Duration::from_secs(60));
        assert_eq!(s.port, 8000);
        assert!(!s.has_credentials());
        assert!(s.api_key.is_none());
        assert_eq!(s.session_max_age, Duration::from_secs(3600));
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("NLM_PATH", "/opt/nlm/bin/nlm"),
            ("NLM_TIMEOUT_SECS", "15"),
            ("NLM_WEB_PORT", "9001"),
            ("NLM_WEB_CORS_ORIGINS", "http://a.test, http://b.test"),
            ("NLM_WEB_SESSION_MAX_AGE", "900"),
        ]);
        assert_eq!(s.session_max_age, Duration::from_secs(900));
        assert_eq!(s.nlm_path, "/opt/nlm/bin/nlm");
        assert_eq!(s.timeout, Duration::from_secs(15));
        assert_eq!(s.port, 9001);
        assert_eq!(
            s.cors_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let s = settings(&[("NLM_TIMEOUT_SECS", "0"), ("NLM_WEB_PORT", "http")]);
        assert_eq!(s.timeout, DEFAULT_TIMEOUT);
        assert_eq!(s.port, 8000);
    }

    #[test]
    fn missing_credentials_select_demo() {
        let s = settings(&[("NLM_AUTH_TOKEN", "token")]);
        assert_eq!(s.build_service().unwrap().mode(), ServiceMode::Demo);
    }

    #[test]
    fn credentials_select_live() {
        let s = settings(&[("NLM_AUTH_TOKEN", "token"), ("NLM_COOKIES", "cookie")]);
        assert_eq!(s.build_service().unwrap().mode(), ServiceMode::Live);
    }

    #[test]
    fn debug_hides_credentials() {
        let s = settings(&[("NLM_AUTH_TOKEN", "tok-123"), ("NLM_COOKIES", "sid=456")]);
        let printed = format!("{:?}", s);
        assert!(!printed.contains("tok-123"));
        assert!(!printed.contains("sid=456"));
    }
}
