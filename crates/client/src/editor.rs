//! Async shell around a [`DraftSession`].
//!
//! The session decides what is allowed; the editor performs the network calls
//! and reports their outcome back. Session locks are never held across an
//! `.await` on the gateway, so a slow save does not block edits from being
//! rejected with `Busy`.

use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;
use crmagenda_core::draft::{AppointmentDraft, DraftPhase, DraftSession, SessionError};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::ClientError;
use crate::gateway::AppointmentGateway;

/// Errors surfaced by the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl EditorError {
    /// Text for a user-facing alert.
    pub fn user_message(&self) -> String {
        match self {
            EditorError::Session(err) => err.to_string(),
            EditorError::Client(err) => err.user_message(),
        }
    }
}

/// What a successful save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated { id: String },
}

/// Edits one appointment against a gateway.
pub struct AppointmentEditor<G> {
    gateway: Arc<G>,
    session: Arc<Mutex<DraftSession>>,
}

impl<G> Clone for AppointmentEditor<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            session: Arc::clone(&self.session),
        }
    }
}

impl<G: AppointmentGateway + 'static> AppointmentEditor<G> {
    /// Opens a fresh draft for `default_date` (or today).
    pub fn open_new(
        gateway: Arc<G>,
        assignee_marker: &str,
        default_date: Option<&str>,
        now: DateTime<Tz>,
    ) -> Self {
        let mut session = DraftSession::new(assignee_marker);
        session.open(AppointmentDraft::new(default_date, now), None);
        Self::with_session(gateway, session)
    }

    /// Loads appointment `id` and opens a draft seeded from it.
    pub async fn open_existing(
        gateway: Arc<G>,
        assignee_marker: &str,
        id: &str,
        now: DateTime<Tz>,
    ) -> Result<Self, EditorError> {
        let record = gateway.load_event(id).await?;
        let mut session = DraftSession::new(assignee_marker);
        session.open(
            AppointmentDraft::from_record(&record, now),
            record.assigned.clone(),
        );
        Ok(Self::with_session(gateway, session))
    }

    fn with_session(gateway: Arc<G>, session: DraftSession) -> Self {
        Self {
            gateway,
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Fetches the owner list and installs it.
    ///
    /// Returns false when the editor was closed before the list arrived.
    pub async fn load_owners(&self) -> Result<bool, EditorError> {
        let owners = self.gateway.load_owners().await?;
        let applied = self.session.lock().await.apply_owners(owners);
        if !applied {
            tracing::debug!("Owner list arrived after close, discarded");
        }
        Ok(applied)
    }

    /// Loads the owner list in the background while the caller keeps editing.
    /// Failures are logged; the draft then stays without an assignee.
    pub fn spawn_owner_load(&self) -> JoinHandle<bool> {
        let editor = self.clone();
        tokio::spawn(async move {
            match editor.load_owners().await {
                Ok(applied) => applied,
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to load owners");
                    false
                }
            }
        })
    }

    /// Applies one user edit.
    pub async fn edit<F>(&self, f: F) -> Result<(), EditorError>
    where
        F: FnOnce(&mut AppointmentDraft),
    {
        self.session.lock().await.edit(f)?;
        Ok(())
    }

    /// A copy of the current draft.
    pub async fn draft(&self) -> Option<AppointmentDraft> {
        self.session.lock().await.draft().cloned()
    }

    pub async fn phase(&self) -> DraftPhase {
        self.session.lock().await.phase()
    }

    pub async fn is_saving(&self) -> bool {
        self.session.lock().await.is_saving()
    }

    /// Message of the last failed save or delete.
    pub async fn last_error(&self) -> Option<String> {
        self.session.lock().await.last_error().map(str::to_string)
    }

    /// Validates and submits the draft: create when new, update otherwise.
    ///
    /// On failure the draft is kept and can be edited and saved again.
    pub async fn save(&self) -> Result<SaveOutcome, EditorError> {
        let submission = {
            let mut session = self.session.lock().await;
            if session.draft().is_some_and(|d| d.has_inverted_range()) {
                tracing::warn!("Saving appointment whose end precedes its start");
            }
            session.begin_submit()?
        };

        let result = match submission.editing_id.as_deref() {
            Some(id) => self.gateway.submit_update(id, &submission.payload).await,
            None => self.gateway.submit_create(&submission.payload).await,
        };

        let mut session = self.session.lock().await;
        match result {
            Ok(()) => {
                if !session.complete_submit(Ok(())) {
                    tracing::debug!("Save finished after close");
                }
                tracing::info!(subject = %submission.payload.subject, "Appointment saved");
                Ok(match submission.editing_id {
                    Some(id) => SaveOutcome::Updated { id },
                    None => SaveOutcome::Created,
                })
            }
            Err(err) => {
                session.complete_submit(Err(err.user_message()));
                Err(err.into())
            }
        }
    }

    /// Deletes the appointment being edited.
    pub async fn delete(&self) -> Result<(), EditorError> {
        let id = self.session.lock().await.begin_delete()?;

        let result = self.gateway.remove_event(&id).await;

        let mut session = self.session.lock().await;
        match result {
            Ok(()) => {
                session.complete_delete(Ok(()));
                tracing::info!(id = %id, "Appointment deleted");
                Ok(())
            }
            Err(err) => {
                session.complete_delete(Err(err.user_message()));
                Err(err.into())
            }
        }
    }

    /// Screen teardown. Results of calls still in flight are discarded.
    pub async fn close(&self) {
        self.session.lock().await.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{NaiveTime, TimeZone};
    use crmagenda_core::draft::{DraftError, SubmissionPayload};
    use crmagenda_core::records::{EventRecord, Owner, RawEvent};
    use tokio::sync::Notify;

    use crate::error::Result;

    const MARKER: &str = "TFM SAN SALVO";

    /// In-memory gateway recording what was sent.
    #[derive(Default)]
    struct MockGateway {
        events: HashMap<String, EventRecord>,
        owners: Vec<Owner>,
        fail_with: Option<String>,
        created: std::sync::Mutex<Vec<SubmissionPayload>>,
        updated: std::sync::Mutex<Vec<(String, SubmissionPayload)>>,
        deleted: std::sync::Mutex<Vec<String>>,
        owner_calls: AtomicUsize,
        owners_gate: Option<Arc<Notify>>,
        submit_gate: Option<Arc<Notify>>,
    }

    impl MockGateway {
        fn with_owners() -> Self {
            Self {
                owners: vec![Owner::new("7", "TFM SAN SALVO"), Owner::new("9", "Studio")],
                ..Self::default()
            }
        }

        fn with_event(mut self, json: &str) -> Self {
            let record: EventRecord = serde_json::from_str::<RawEvent>(json).unwrap().into();
            let id = record.id.clone().unwrap();
            self.events.insert(id, record);
            self
        }

        fn failing(mut self, message: &str) -> Self {
            self.fail_with = Some(message.to_string());
            self
        }

        fn check(&self) -> Result<()> {
            match &self.fail_with {
                Some(message) => Err(ClientError::Api {
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl AppointmentGateway for MockGateway {
        async fn load_event(&self, id: &str) -> Result<EventRecord> {
            self.events
                .get(id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound {
                    resource: "event".to_string(),
                })
        }

        async fn load_owners(&self) -> Result<Vec<Owner>> {
            self.owner_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.owners_gate {
                gate.notified().await;
            }
            Ok(self.owners.clone())
        }

        async fn submit_create(&self, payload: &SubmissionPayload) -> Result<()> {
            if let Some(gate) = &self.submit_gate {
                gate.notified().await;
            }
            self.check()?;
            self.created.lock().unwrap().push(payload.clone());
            Ok(())
        }

        async fn submit_update(&self, id: &str, payload: &SubmissionPayload) -> Result<()> {
            self.check()?;
            self.updated
                .lock()
                .unwrap()
                .push((id.to_string(), payload.clone()));
            Ok(())
        }

        async fn remove_event(&self, id: &str) -> Result<()> {
            self.check()?;
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }

    fn now() -> DateTime<Tz> {
        chrono_tz::UTC.with_ymd_and_hms(2025, 11, 20, 9, 5, 0).unwrap()
    }

    fn new_editor(gateway: MockGateway) -> (Arc<MockGateway>, AppointmentEditor<MockGateway>) {
        let gateway = Arc::new(gateway);
        let editor = AppointmentEditor::open_new(Arc::clone(&gateway), MARKER, Some("2025-11-24"), now());
        (gateway, editor)
    }

    #[tokio::test]
    async fn test_create_flow() {
        let (gateway, editor) = new_editor(MockGateway::with_owners());
        assert!(editor.load_owners().await.unwrap());

        editor
            .edit(|d| {
                d.set_subject("Controllo");
                d.set_start_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap());
            })
            .await
            .unwrap();

        assert_eq!(editor.save().await.unwrap(), SaveOutcome::Created);
        assert_eq!(editor.phase().await, DraftPhase::Saved);

        let created = gateway.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].date, "2025-11-24");
        assert_eq!(created[0].start_time, "10:00");
        assert_eq!(created[0].end_time, "10:30");
        assert_eq!(created[0].assigned_user_id.as_deref(), Some("7"));
        assert_eq!(created[0].owner_id.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_update_flow_resolves_composite_assignee() {
        let gateway = Arc::new(MockGateway::with_owners().with_event(
            r#"{"activityid": "55", "subject": "Controllo", "date_start": "2025-11-24", "time_start": "09:30:00", "due_date": "2025-11-24", "time_end": "10:00:00", "assigned_user_id": "19x9"}"#,
        ));
        let editor = AppointmentEditor::open_existing(Arc::clone(&gateway), MARKER, "55", now())
            .await
            .unwrap();
        editor.load_owners().await.unwrap();

        let outcome = editor.save().await.unwrap();
        assert_eq!(outcome, SaveOutcome::Updated { id: "55".to_string() });

        let updated = gateway.updated.lock().unwrap();
        assert_eq!(updated[0].0, "55");
        assert_eq!(updated[0].1.start_time, "09:30");
        assert_eq!(updated[0].1.end_time, "10:00");
        assert_eq!(updated[0].1.assigned_user_id.as_deref(), Some("9"));
    }

    #[tokio::test]
    async fn test_open_existing_unknown_id() {
        let gateway = Arc::new(MockGateway::with_owners());
        let result = AppointmentEditor::open_existing(gateway, MARKER, "404", now()).await;
        assert!(matches!(
            result,
            Err(EditorError::Client(ClientError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_validation_blocks_submission() {
        let (gateway, editor) = new_editor(MockGateway::with_owners());
        editor.load_owners().await.unwrap();

        let err = editor.save().await.unwrap_err();
        assert!(matches!(
            err,
            EditorError::Session(SessionError::Validation(DraftError::EmptySubject))
        ));
        assert_eq!(err.user_message(), "Subject cannot be empty");
        assert_eq!(editor.phase().await, DraftPhase::Editing);
        assert!(gateway.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_failure_keeps_draft() {
        let (_gateway, editor) = new_editor(MockGateway::with_owners().failing("Slot already taken"));
        editor.load_owners().await.unwrap();
        editor.edit(|d| d.set_subject("Controllo")).await.unwrap();

        let err = editor.save().await.unwrap_err();
        assert_eq!(err.user_message(), "Slot already taken");
        assert_eq!(editor.phase().await, DraftPhase::SubmitFailed);
        assert_eq!(editor.last_error().await.as_deref(), Some("Slot already taken"));
        assert_eq!(
            editor.draft().await.map(|d| d.subject().to_string()).as_deref(),
            Some("Controllo")
        );
    }

    #[tokio::test]
    async fn test_second_save_while_saving_is_busy() {
        let gate = Arc::new(Notify::new());
        let gateway = MockGateway {
            submit_gate: Some(Arc::clone(&gate)),
            ..MockGateway::with_owners()
        };
        let (gateway, editor) = new_editor(gateway);
        editor.load_owners().await.unwrap();
        editor.edit(|d| d.set_subject("Controllo")).await.unwrap();

        let first = tokio::spawn({
            let editor = editor.clone();
            async move { editor.save().await }
        });
        while !editor.is_saving().await {
            tokio::task::yield_now().await;
        }

        let second = editor.save().await.unwrap_err();
        assert!(matches!(second, EditorError::Session(SessionError::Busy)));

        gate.notify_one();
        assert_eq!(first.await.unwrap().unwrap(), SaveOutcome::Created);
        assert_eq!(gateway.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_owner_list_resolving_after_first_edit() {
        let gate = Arc::new(Notify::new());
        let gateway = MockGateway {
            owners_gate: Some(Arc::clone(&gate)),
            ..MockGateway::with_owners()
        };
        let (gateway, editor) = new_editor(gateway);

        let load = editor.spawn_owner_load();
        editor.edit(|d| d.set_subject("Controllo")).await.unwrap();
        assert_eq!(editor.draft().await.and_then(|d| d.assignee_id().map(str::to_string)), None);

        while gateway.owner_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        gate.notify_one();
        assert!(load.await.unwrap());
        assert_eq!(
            editor.draft().await.and_then(|d| d.assignee_id().map(str::to_string)),
            Some("7".to_string())
        );
    }

    #[tokio::test]
    async fn test_owner_list_after_close_is_discarded() {
        let gate = Arc::new(Notify::new());
        let gateway = MockGateway {
            owners_gate: Some(Arc::clone(&gate)),
            ..MockGateway::with_owners()
        };
        let (gateway, editor) = new_editor(gateway);

        let load = editor.spawn_owner_load();
        while gateway.owner_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        editor.close().await;
        gate.notify_one();

        assert!(!load.await.unwrap());
        assert!(editor.draft().await.is_none());
    }

    #[tokio::test]
    async fn test_delete_flow() {
        let gateway = Arc::new(MockGateway::with_owners().with_event(r#"{"id": 8}"#));
        let editor = AppointmentEditor::open_existing(Arc::clone(&gateway), MARKER, "8", now())
            .await
            .unwrap();

        editor.delete().await.unwrap();
        assert_eq!(editor.phase().await, DraftPhase::Deleted);
        assert_eq!(*gateway.deleted.lock().unwrap(), vec!["8".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_new_draft_is_rejected() {
        let (_gateway, editor) = new_editor(MockGateway::with_owners());
        assert!(matches!(
            editor.delete().await,
            Err(EditorError::Session(SessionError::NotPersisted))
        ));
    }
}
