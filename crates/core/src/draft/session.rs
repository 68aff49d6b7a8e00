//! Lifecycle of one appointment draft on an editing screen.
//!
//! ```text
//! Uninitialized -> Editing -> Validating -> Editing            (validation failed)
//!                                        -> Submitting -> Saved
//!                                                      -> SubmitFailed -> Editing
//! Editing -> Deleting -> Deleted | SubmitFailed
//! ```
//!
//! The session is pure: the shell performs the network calls and reports the
//! outcome back. Results that arrive after `close` are discarded.

use super::appointment::AppointmentDraft;
use super::assignee::resolve_assignee;
use super::error::SessionError;
use super::types::SubmissionPayload;
use crate::records::Owner;

/// Where a draft is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    Uninitialized,
    Editing,
    Validating,
    Submitting,
    Deleting,
    Saved,
    Deleted,
    SubmitFailed,
}

impl DraftPhase {
    /// True while a save or delete is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            DraftPhase::Validating | DraftPhase::Submitting | DraftPhase::Deleting
        )
    }

    /// True once the draft was saved or deleted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DraftPhase::Saved | DraftPhase::Deleted)
    }
}

/// A validated payload ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub payload: SubmissionPayload,
    /// Set when updating an existing appointment.
    pub editing_id: Option<String>,
}

impl Submission {
    pub fn is_update(&self) -> bool {
        self.editing_id.is_some()
    }
}

/// One draft plus the owner list it is assigned from.
#[derive(Debug, Clone)]
pub struct DraftSession {
    phase: DraftPhase,
    draft: Option<AppointmentDraft>,
    owners: Vec<Owner>,
    owners_loaded: bool,
    pending_assignee: Option<String>,
    assignee_picked: bool,
    assignee_marker: String,
    last_error: Option<String>,
    closed: bool,
}

impl DraftSession {
    /// Creates an empty session. `assignee_marker` selects the default owner.
    pub fn new(assignee_marker: impl Into<String>) -> Self {
        Self {
            phase: DraftPhase::Uninitialized,
            draft: None,
            owners: Vec::new(),
            owners_loaded: false,
            pending_assignee: None,
            assignee_picked: false,
            assignee_marker: assignee_marker.into(),
            last_error: None,
            closed: false,
        }
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn draft(&self) -> Option<&AppointmentDraft> {
        self.draft.as_ref()
    }

    pub fn owners(&self) -> &[Owner] {
        &self.owners
    }

    pub fn owners_loaded(&self) -> bool {
        self.owners_loaded
    }

    /// Message of the last failed save or delete.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The "saving" flag: submit controls stay disabled while this is set.
    pub fn is_saving(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Starts editing `draft`. `raw_assigned` is the assignee value from a
    /// seeded record, resolved once the owner list is available.
    pub fn open(&mut self, draft: AppointmentDraft, raw_assigned: Option<String>) {
        self.draft = Some(draft);
        self.pending_assignee = raw_assigned;
        self.assignee_picked = false;
        self.last_error = None;
        self.phase = DraftPhase::Editing;
        if self.owners_loaded {
            self.resolve_assignee();
        }
    }

    /// Installs the owner list. May arrive before or after `open`.
    ///
    /// Returns false when the session was closed and the list was discarded.
    pub fn apply_owners(&mut self, owners: Vec<Owner>) -> bool {
        if self.closed {
            return false;
        }
        self.owners = owners;
        self.owners_loaded = true;
        self.resolve_assignee();
        true
    }

    /// Applies one user edit to the draft.
    pub fn edit<F>(&mut self, f: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut AppointmentDraft),
    {
        self.ensure_editable()?;
        let draft = self.draft.as_mut().ok_or(SessionError::NotOpen)?;
        let assignee_before = draft.assignee_id().map(str::to_string);
        f(draft);
        if draft.assignee_id() != assignee_before.as_deref() {
            self.assignee_picked = true;
        }
        self.phase = DraftPhase::Editing;
        Ok(())
    }

    /// Validates the draft and, if valid, enters `Submitting`.
    ///
    /// Validation failures return to `Editing` with the draft untouched.
    pub fn begin_submit(&mut self) -> Result<Submission, SessionError> {
        self.ensure_editable()?;
        let draft = self.draft.as_ref().ok_or(SessionError::NotOpen)?;

        self.phase = DraftPhase::Validating;
        if let Err(err) = draft.validate() {
            self.phase = DraftPhase::Editing;
            return Err(err.into());
        }

        let submission = Submission {
            payload: draft.to_submission_payload(),
            editing_id: draft.editing_id().map(str::to_string),
        };
        self.last_error = None;
        self.phase = DraftPhase::Submitting;
        Ok(submission)
    }

    /// Records the outcome of a submission.
    ///
    /// Returns false when the outcome was discarded (closed session or no
    /// submission in flight).
    pub fn complete_submit(&mut self, outcome: Result<(), String>) -> bool {
        if self.closed || self.phase != DraftPhase::Submitting {
            return false;
        }
        self.finish(outcome, DraftPhase::Saved);
        true
    }

    /// Enters `Deleting` and returns the id to delete.
    pub fn begin_delete(&mut self) -> Result<String, SessionError> {
        self.ensure_editable()?;
        let draft = self.draft.as_ref().ok_or(SessionError::NotOpen)?;
        let id = draft
            .editing_id()
            .map(str::to_string)
            .ok_or(SessionError::NotPersisted)?;
        self.last_error = None;
        self.phase = DraftPhase::Deleting;
        Ok(id)
    }

    /// Records the outcome of a delete. Same discard rules as `complete_submit`.
    pub fn complete_delete(&mut self, outcome: Result<(), String>) -> bool {
        if self.closed || self.phase != DraftPhase::Deleting {
            return false;
        }
        self.finish(outcome, DraftPhase::Deleted);
        true
    }

    /// Screen teardown. The draft is dropped and late results are ignored.
    pub fn close(&mut self) {
        self.closed = true;
        self.draft = None;
    }

    fn finish(&mut self, outcome: Result<(), String>, success: DraftPhase) {
        match outcome {
            Ok(()) => self.phase = success,
            Err(message) => {
                self.last_error = Some(message);
                self.phase = DraftPhase::SubmitFailed;
            }
        }
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        match self.phase {
            DraftPhase::Uninitialized => Err(SessionError::NotOpen),
            phase if phase.is_busy() => Err(SessionError::Busy),
            phase if phase.is_terminal() => Err(SessionError::Finished(phase)),
            _ => Ok(()),
        }
    }

    fn resolve_assignee(&mut self) {
        if self.assignee_picked {
            return;
        }
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        let resolved = resolve_assignee(
            &self.owners,
            self.pending_assignee.as_deref(),
            &self.assignee_marker,
        );
        draft.set_assignee(resolved);
    }
}
