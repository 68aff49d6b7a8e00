//! Contact (patient) API operations.

use crmagenda_core::contact::ContactPayload;
use crmagenda_core::records::{Contact, RawContact};
use reqwest::Method;
use serde_json::Value;

use super::{require_id, CrmClient};
use crate::error::Result;

impl CrmClient {
    /// List contacts, optionally filtered by a search term.
    pub async fn list_contacts(&self, search: Option<&str>) -> Result<Vec<Contact>> {
        let mut request = self.request(Method::GET, "/mobile/contacts/");
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.query(&[("search", term)]);
        }
        let raw: Option<Vec<RawContact>> = self.send(request, "Failed to load contacts").await?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(Contact::from)
            .collect())
    }

    /// Get contact by ID.
    pub async fn get_contact(&self, id: &str) -> Result<Contact> {
        let id = require_id(id, "contact")?;
        let request = self.request(Method::GET, &format!("/mobile/contacts/{}", id));
        let raw: RawContact = self
            .send_required(request, "Failed to load contact", "contact")
            .await?;
        Ok(raw.into())
    }

    /// Create a new contact. Returns whatever the server echoes back.
    pub async fn create_contact(&self, payload: &ContactPayload) -> Result<Value> {
        let request = self.request(Method::POST, "/mobile/contacts/").json(payload);
        let created: Option<Value> = self.send(request, "Failed to create contact").await?;
        Ok(created.unwrap_or(Value::Null))
    }

    /// Update an existing contact.
    pub async fn update_contact(&self, id: &str, payload: &ContactPayload) -> Result<Value> {
        let id = require_id(id, "contact")?;
        let request = self
            .request(Method::PUT, &format!("/mobile/contacts/{}", id))
            .json(payload);
        let updated: Option<Value> = self.send(request, "Failed to update contact").await?;
        Ok(updated.unwrap_or(Value::Null))
    }

    /// Delete contact by ID.
    pub async fn delete_contact(&self, id: &str) -> Result<()> {
        let id = require_id(id, "contact")?;
        let request = self.request(Method::DELETE, &format!("/mobile/contacts/{}", id));
        let _: Option<Value> = self.send(request, "Failed to delete contact").await?;
        Ok(())
    }
}
