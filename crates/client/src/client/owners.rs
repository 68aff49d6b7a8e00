//! Owner (assignee) API operations.

use crmagenda_core::records::{normalize_owners, Owner, RawOwner};
use reqwest::Method;

use super::CrmClient;
use crate::error::Result;

impl CrmClient {
    /// List the staff appointments can be assigned to, in server order.
    pub async fn list_owners(&self) -> Result<Vec<Owner>> {
        let request = self
            .request(Method::GET, "/mobile/events/")
            .query(&[("owners", "1")]);
        let raw: Option<Vec<RawOwner>> = self.send(request, "Failed to load owners").await?;
        let owners = normalize_owners(raw.unwrap_or_default());
        tracing::debug!(count = owners.len(), "Owners loaded");
        Ok(owners)
    }
}
