//! Environment configuration, loaded once at startup

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// LLM provider credential - required, a missing key is a startup
    /// error rather than a per-request one
    pub anthropic_api_key: String,
    /// Property data provider credential - optional, absence selects the
    /// synthetic gateway
    pub estated_api_key: Option<String>,
    /// When set, upstream property-data failures surface instead of
    /// degrading to the synthetic generator
    pub property_data_strict: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().context("PORT must be a number")?,
            None => DEFAULT_PORT,
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .context("ANTHROPIC_API_KEY must be set")?;

        let estated_api_key = lookup("ESTATED_API_KEY").filter(|k| !k.trim().is_empty());

        let property_data_strict = lookup("PROPERTY_DATA_STRICT")
            .map(|raw| raw == "true" || raw == "1")
            .unwrap_or(false);

        Ok(Self {
            port,
            anthropic_api_key,
            estated_api_key,
            property_data_strict,
        })
    }
}
