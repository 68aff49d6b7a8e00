//! Client error types.

use crmagenda_core::config::ConfigError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Shown when the server gave no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong while talking to the server";

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    MissingConfig(#[from] ConfigError),

    /// Transport failure. Built through `From`, which strips the URL so
    /// the `api_key` query parameter never reaches logs or output.
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The envelope reported `success: false`.
    #[error("{message}")]
    Api { message: String },

    /// The body was not the expected JSON envelope.
    #[error("{0}")]
    MalformedResponse(String),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Request(err.without_url())
    }
}

impl ClientError {
    /// Text for a user-facing alert: the server's own message when there is
    /// one, a generic message otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message } | ClientError::MalformedResponse(message) => {
                message.clone()
            }
            ClientError::MissingConfig(err) => err.to_string(),
            ClientError::NotFound { .. } | ClientError::InvalidInput(_) => self.to_string(),
            ClientError::Request(_) | ClientError::Json(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let error = ClientError::Api {
            message: "Slot already taken".to_string(),
        };
        assert_eq!(error.user_message(), "Slot already taken");
    }

    #[test]
    fn test_user_message_for_config() {
        let error = ClientError::from(ConfigError::MissingBaseUrl);
        assert_eq!(
            error.user_message(),
            "Missing API configuration: base URL is empty"
        );
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let error = ClientError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(error.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
