use thiserror::Error;

use super::session::DraftPhase;

/// Validation failures reported before a draft may be submitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Subject cannot be empty")]
    EmptySubject,
    #[error("No assignee selected")]
    MissingAssignee,
}

/// Errors raised by draft session transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Draft has not been opened")]
    NotOpen,
    #[error("A save or delete is already in progress")]
    Busy,
    #[error("Draft is finished ({0:?})")]
    Finished(DraftPhase),
    #[error("Draft session was closed")]
    Closed,
    #[error("Appointment has not been saved yet")]
    NotPersisted,
    #[error(transparent)]
    Validation(#[from] DraftError),
}
