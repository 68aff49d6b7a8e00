mod appointment;
mod assignee;
mod error;
mod session;
mod types;

pub use appointment::{AppointmentDraft, DEFAULT_DURATION_MINUTES};
pub use assignee::{parse_assignee_token, resolve_assignee, DEFAULT_ASSIGNEE_MARKER};
pub use error::{DraftError, SessionError};
pub use session::{DraftPhase, DraftSession, Submission};
pub use types::{ActivityType, SubmissionPayload, VisitType};
