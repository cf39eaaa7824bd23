//! Connection settings for the tracker.

use std::fmt;
use std::time::Duration;

use crate::error::{Result, TrackerError};

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Script credentials and project scope for a tracker site.
#[derive(Clone)]
pub struct TrackerSettings {
    /// Site root, e.g. `https://studio.shotgunstudio.com`.
    pub site: String,
    /// Script (API user) name.
    pub script_name: String,
    /// Script API key.
    pub api_key: String,
    /// Project all queries are scoped to.
    pub project_id: u64,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl TrackerSettings {
    pub fn new(
        site: impl Into<String>,
        script_name: impl Into<String>,
        api_key: impl Into<String>,
        project_id: u64,
    ) -> Self {
        Self {
            site: site.into(),
            script_name: script_name.into(),
            api_key: api_key.into(),
            project_id,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks that every setting is present.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("site", self.site.trim().is_empty()),
            ("script name", self.script_name.trim().is_empty()),
            ("API key", self.api_key.trim().is_empty()),
            ("project id", self.project_id == 0),
        ]
        .into_iter()
        .filter_map(|(name, is_missing)| is_missing.then_some(name))
        .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TrackerError::Settings(format!(
                "missing {}",
                missing.join(", ")
            )))
        }
    }
}

// The API key stays out of logs.
impl fmt::Debug for TrackerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerSettings")
            .field("site", &self.site)
            .field("script_name", &self.script_name)
            .field("api_key", &"[REDACTED]")
            .field("project_id", &self.project_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}
