//! The backend operations an appointment editor needs.

use async_trait::async_trait;
use crmagenda_core::draft::SubmissionPayload;
use crmagenda_core::records::{EventRecord, Owner};

use crate::client::CrmClient;
use crate::error::Result;

/// Backend used by [`AppointmentEditor`](crate::editor::AppointmentEditor).
#[async_trait]
pub trait AppointmentGateway: Send + Sync {
    /// Loads the appointment being edited.
    async fn load_event(&self, id: &str) -> Result<EventRecord>;

    /// Loads the owner list assignees are picked from.
    async fn load_owners(&self) -> Result<Vec<Owner>>;

    /// Creates a new appointment.
    async fn submit_create(&self, payload: &SubmissionPayload) -> Result<()>;

    /// Updates the appointment `id`.
    async fn submit_update(&self, id: &str, payload: &SubmissionPayload) -> Result<()>;

    /// Deletes the appointment `id`.
    async fn remove_event(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl AppointmentGateway for CrmClient {
    async fn load_event(&self, id: &str) -> Result<EventRecord> {
        self.get_event(id).await
    }

    async fn load_owners(&self) -> Result<Vec<Owner>> {
        self.list_owners().await
    }

    async fn submit_create(&self, payload: &SubmissionPayload) -> Result<()> {
        let created = self.create_event(payload).await?;
        tracing::debug!(response = %created, "Event created");
        Ok(())
    }

    async fn submit_update(&self, id: &str, payload: &SubmissionPayload) -> Result<()> {
        let updated = self.update_event(id, payload).await?;
        tracing::debug!(id, response = %updated, "Event updated");
        Ok(())
    }

    async fn remove_event(&self, id: &str) -> Result<()> {
        self.delete_event(id).await
    }
}
