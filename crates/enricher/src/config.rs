//! Configuration loading and validation for the enrichment pipeline.
//!
//! Values are read from `FN_ENRICH_*` environment variables. The identity
//! signals (`WEBSITE_*`, `COMPUTERNAME`, `CONTAINER_NAME`) are not part of this
//! configuration; they are read per record through [`crate::env::Environment`].

use std::net::IpAddr;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Prefix of every configuration environment variable.
pub const ENV_PREFIX: &str = "FN_ENRICH";

/// Validated enrichment configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EnricherConfig {
    /// Host substituted into every HTTP request URL.
    #[serde(default = "default_placeholder_host")]
    pub placeholder_host: String,

    /// Suffix appended to the slot identity to form the node name.
    #[serde(default = "default_node_name_suffix")]
    pub node_name_suffix: String,

    /// Source IP applied to records that carry none.
    #[serde(default = "default_ip")]
    pub default_ip: String,

    /// Identity used when no site name is available. Empty disables role and
    /// node name enrichment in that case.
    #[serde(default)]
    pub fallback_identity: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_placeholder_host() -> String {
    "localhost".into()
}
fn default_node_name_suffix() -> String {
    ".azurewebsites.net".into()
}
fn default_ip() -> String {
    "0.0.0.0".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            placeholder_host: default_placeholder_host(),
            node_name_suffix: default_node_name_suffix(),
            default_ip: default_ip(),
            fallback_identity: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl EnricherConfig {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to build enricher configuration from environment")?;

        let c: EnricherConfig = cfg
            .try_deserialize()
            .context("failed to deserialise enricher configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    pub fn validate(&self) -> Result<()> {
        if self.placeholder_host.trim().is_empty() {
            anyhow::bail!("{ENV_PREFIX}_PLACEHOLDER_HOST must not be empty");
        }
        url::Host::parse(&self.placeholder_host).with_context(|| {
            format!(
                "{ENV_PREFIX}_PLACEHOLDER_HOST is not a valid host: {}",
                self.placeholder_host
            )
        })?;
        if !self.node_name_suffix.starts_with('.') {
            anyhow::bail!("{ENV_PREFIX}_NODE_NAME_SUFFIX must start with '.'");
        }
        self.default_ip.parse::<IpAddr>().with_context(|| {
            format!("{ENV_PREFIX}_DEFAULT_IP is not an IP address: {}", self.default_ip)
        })?;
        Ok(())
    }
}
