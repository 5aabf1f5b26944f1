use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "RIPE";

/// Runtime knobs, read from `RIPE_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Detail pages fetched at once; 1 keeps the scrape strictly sequential.
    pub concurrency: usize,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            concurrency: 1,
            timeout_secs: None,
            user_agent: concat!("ripe_scraper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn from_source(env: Environment) -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(env)
            .build()
            .and_then(Config::try_deserialize)
            .context("Failed to read RIPE_* settings")?;
        Ok(settings.normalized())
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, concurrency: Option<usize>, timeout_secs: Option<u64>) -> Self {
        if let Some(n) = concurrency {
            self.concurrency = n;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        self.concurrency = self.concurrency.max(1);
        self
    }
}

// ── Tests ──
