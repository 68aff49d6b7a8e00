use thiserror::Error;

/// Required backend settings that are absent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing API configuration: base URL is empty")]
    MissingBaseUrl,
    #[error("Missing API configuration: API key is empty")]
    MissingApiKey,
}
