use std::env;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable `{0}`")]
    MissingVar(&'static str),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Table holding every post (required)
    pub table_name: String,
    /// Custom endpoint URL, e.g. a local DynamoDB (optional)
    pub endpoint_url: Option<String>,
    /// AWS region; the SDK default chain decides when unset
    pub region: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (required)
    /// - `AWS_ENDPOINT_URL` - Endpoint override (optional)
    /// - `AWS_REGION` - Region override (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            table_name: non_empty("DYNAMODB_TABLE_NAME")
                .ok_or(ConfigError::MissingVar("DYNAMODB_TABLE_NAME"))?,
            endpoint_url: non_empty("AWS_ENDPOINT_URL"),
            region: non_empty("AWS_REGION"),
        })
    }
}
