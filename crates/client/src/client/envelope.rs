//! The mobile API's response envelope.
//!
//! Every endpoint answers `{ "success": bool, "data": ..., "error": { "code", "message" } }`,
//! sometimes with a top-level `message` instead of `error`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Error block of a failed envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<Value>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<Value>,
    error: Option<ApiErrorBody>,
    message: Option<String>,
}

/// Unwraps an envelope body.
///
/// `context` names the operation and doubles as the error message when the
/// server sends none. A `null` or absent `data` yields `Ok(None)`.
pub fn parse_envelope<T: DeserializeOwned>(body: &str, context: &str) -> Result<Option<T>> {
    let envelope: ApiEnvelope = serde_json::from_str(body).map_err(|_| malformed(context))?;

    if !envelope.success {
        let error = envelope.error.unwrap_or_default();
        tracing::debug!(code = ?error.code, "{context}: server reported failure");
        let message = error
            .message
            .or(envelope.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| context.to_string());
        return Err(ClientError::Api { message });
    }

    match envelope.data {
        None | Some(Value::Null) => Ok(None),
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .map_err(|_| malformed(context)),
    }
}

fn malformed(context: &str) -> ClientError {
    ClientError::MalformedResponse(format!("{context}: invalid response from server"))
}
