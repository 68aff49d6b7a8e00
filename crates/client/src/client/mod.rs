//! HTTP client for the CRM mobile API.

pub mod contacts;
pub mod envelope;
pub mod events;
pub mod owners;

use crmagenda_core::config::CrmConfig;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use envelope::parse_envelope;

/// HTTP client for one CRM backend.
#[derive(Debug, Clone)]
pub struct CrmClient {
    client: reqwest::Client,
    config: CrmConfig,
}

impl CrmClient {
    /// Create a client for `config`. Fails when the endpoint or key is missing.
    pub fn new(config: CrmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &CrmConfig {
        &self.config
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.config.normalized_base_url()
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Start a request carrying the API key.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "CRM request");
        self.client
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("api_key", self.config.api_key.as_str())])
    }

    /// Send a request and unwrap the response envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<Option<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let result = parse_envelope(&body, context);
        if let Err(err) = &result {
            tracing::warn!(status = status.as_u16(), error = %err, "{context}");
        }
        result
    }

    /// Like `send`, but a missing `data` is an error.
    async fn send_required<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
        resource: &str,
    ) -> Result<T> {
        self.send(request, context)
            .await?
            .ok_or_else(|| ClientError::NotFound {
                resource: resource.to_string(),
            })
    }
}

/// Rejects blank ids before any request is made.
fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ClientError::InvalidInput(format!("missing {what} id")));
    }
    Ok(id)
}
