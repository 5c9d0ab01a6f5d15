//! Verifier configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use authsig_types::ChainEndpoint;

use crate::error::ConfigError;
use crate::registry::ChainRegistry;

/// Configuration for a verifier process.
///
/// ```toml
/// request_timeout_secs = 10
///
/// [chains.aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906]
/// host = "eos.greymass.com"
/// port = 443
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Known chains, keyed by chain id.
    #[serde(default)]
    pub chains: BTreeMap<String, ChainEndpoint>,

    /// Per-request deadline for node queries. Unset means the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Accepted `log_format` values, compared case-insensitively.
const LOG_FORMATS: [&str; 2] = ["human", "json"];

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl VerifierConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot: currently only `log_format`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_FORMATS
            .iter()
            .any(|f| f.eq_ignore_ascii_case(&self.log_format))
        {
            return Err(ConfigError::Parse(format!(
                "unknown log_format {:?}, expected \"human\" or \"json\"",
                self.log_format
            )));
        }
        Ok(())
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build the chain registry described by `chains`.
    pub fn registry(&self) -> ChainRegistry {
        self.chains
            .iter()
            .map(|(id, endpoint)| (id.as_str(), endpoint.clone()))
            .collect()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            chains: BTreeMap::new(),
            request_timeout_secs: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
