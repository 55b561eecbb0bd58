//! Client configuration.
//!
//! Configuration can be built in code, loaded from a YAML file, or both:
//!
//! ```yaml
//! language: german
//! country: Germany
//! max_results: 50
//! period: 7d
//! exclude_websites:
//!   - example.com
//! timeout_secs: 10
//! ```
//!
//! Every field is optional and falls back to [`GNewsConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

use crate::error::GNewsError;
use crate::locale::{resolve_country, resolve_language};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GNewsConfig {
    pub language: String,
    pub country: String,
    /// Advisory only; fetched results are not truncated to this size.
    pub max_results: usize,
    /// Time window such as `"1h"`, `"7d"` or `"1y"`.
    pub period: Option<String>,
    /// Publisher host names whose articles are dropped.
    pub exclude_websites: Vec<String>,
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub max_retries: usize,
    pub retry_base_delay_ms: u64,
}

impl Default for GNewsConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            country: "US".to_string(),
            max_results: 100,
            period: None,
            exclude_websites: Vec::new(),
            timeout_secs: 10,
            max_redirects: 10,
            max_retries: 2,
            retry_base_delay_ms: 500,
        }
    }
}

impl GNewsConfig {
    /// Copy with language and country mapped to canonical codes and the
    /// period trimmed (blank means none).
    pub fn normalized(mut self) -> Self {
        self.language = resolve_language(&self.language);
        self.country = resolve_country(&self.country);
        self.period = self
            .period
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

/// Load a [`GNewsConfig`] from a YAML file.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_config(path: impl AsRef<Path>) -> Result<GNewsConfig, GNewsError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let config = parse_config(&text)?;
    info!(language = %config.language, country = %config.country, "Loaded configuration");
    Ok(config)
}

/// Parse YAML configuration text. Language and country are normalized.
pub fn parse_config(text: &str) -> Result<GNewsConfig, GNewsError> {
    let config: GNewsConfig = serde_yaml::from_str(text)?;
    Ok(config.normalized())
}
