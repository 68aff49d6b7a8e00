//! Event (appointment) API operations.

use chrono::NaiveDate;
use crmagenda_core::draft::SubmissionPayload;
use crmagenda_core::records::{EventRecord, RawEvent};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{require_id, CrmClient};
use crate::error::Result;

/// Calendar span requested from the events endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventView {
    #[default]
    Day,
    Week,
}

/// Query parameters for listing events.
#[derive(Debug, Default, Serialize)]
pub struct ListEventsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<EventView>,
}

impl CrmClient {
    /// List events for a day (or the week around it).
    pub async fn list_events(&self, query: ListEventsQuery) -> Result<Vec<EventRecord>> {
        let request = self.request(Method::GET, "/mobile/events/").query(&query);
        let raw: Option<Vec<RawEvent>> = self.send(request, "Failed to load events").await?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(EventRecord::from)
            .collect())
    }

    /// Get event by ID.
    pub async fn get_event(&self, id: &str) -> Result<EventRecord> {
        let id = require_id(id, "event")?;
        let request = self.request(Method::GET, &format!("/mobile/events/{}", id));
        let raw: RawEvent = self
            .send_required(request, "Failed to load event", "event")
            .await?;
        Ok(raw.into())
    }

    /// Create a new event. Returns whatever the server echoes back.
    pub async fn create_event(&self, payload: &SubmissionPayload) -> Result<Value> {
        let request = self.request(Method::POST, "/mobile/events/").json(payload);
        let created: Option<Value> = self.send(request, "Failed to create event").await?;
        Ok(created.unwrap_or(Value::Null))
    }

    /// Update an existing event.
    pub async fn update_event(&self, id: &str, payload: &SubmissionPayload) -> Result<Value> {
        let id = require_id(id, "event")?;
        let request = self
            .request(Method::PUT, &format!("/mobile/events/{}", id))
            .json(payload);
        let updated: Option<Value> = self.send(request, "Failed to update event").await?;
        Ok(updated.unwrap_or(Value::Null))
    }

    /// Delete event by ID.
    pub async fn delete_event(&self, id: &str) -> Result<()> {
        let id = require_id(id, "event")?;
        let request = self.request(Method::DELETE, &format!("/mobile/events/{}", id));
        let _: Option<Value> = self.send(request, "Failed to delete event").await?;
        Ok(())
    }
}
