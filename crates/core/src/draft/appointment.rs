use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::error::DraftError;
use super::types::{ActivityType, SubmissionPayload, VisitType};
use crate::records::{ContactRef, EventRecord};
use crate::time::{
    round_up_to_quarter, to_server_date_string, to_server_time_string, LocalInstant,
};

/// Length given to new appointments and to ends pushed past a moved start.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

fn default_duration() -> Duration {
    Duration::minutes(DEFAULT_DURATION_MINUTES)
}

/// An appointment being created or edited.
///
/// Fields are private so every change goes through the setters, which keep
/// `end >= start` whenever the start moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    subject: String,
    start: LocalInstant,
    end: LocalInstant,
    visit_type: VisitType,
    activity_type: ActivityType,
    assignee_id: Option<String>,
    contact: Option<ContactRef>,
    editing_id: Option<String>,
}

impl AppointmentDraft {
    /// Creates a fresh draft.
    ///
    /// The start is `default_date` (or today) at the current wall-clock time
    /// rounded up to the next quarter hour, in the zone of `now`. The end is
    /// thirty minutes later.
    pub fn new(default_date: Option<&str>, now: DateTime<Tz>) -> Self {
        let start = default_start(default_date, &now);
        Self {
            subject: String::new(),
            start,
            end: start.plus(default_duration()),
            visit_type: VisitType::default(),
            activity_type: ActivityType::default(),
            assignee_id: None,
            contact: None,
            editing_id: None,
        }
    }

    /// Seeds a draft from an existing appointment.
    ///
    /// Start and end try each candidate field pair in order, then fall back to
    /// the same defaults as a fresh draft. The assignee is left unset: it can
    /// only be resolved once the owner list is known.
    pub fn from_record(record: &EventRecord, now: DateTime<Tz>) -> Self {
        let zone = now.timezone();
        let start = record
            .start_in(zone)
            .unwrap_or_else(|| default_start(None, &now));
        let end = record
            .end_in(zone)
            .unwrap_or_else(|| start.plus(default_duration()));

        Self {
            subject: record.subject.clone(),
            start,
            end,
            visit_type: record
                .visit_type
                .as_deref()
                .and_then(VisitType::from_wire)
                .unwrap_or_default(),
            activity_type: record
                .activity_type
                .as_deref()
                .and_then(ActivityType::from_wire)
                .unwrap_or_default(),
            assignee_id: None,
            contact: record.contact.clone(),
            editing_id: record.id.clone(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn start(&self) -> &LocalInstant {
        &self.start
    }

    pub fn end(&self) -> &LocalInstant {
        &self.end
    }

    pub fn visit_type(&self) -> VisitType {
        self.visit_type
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn assignee_id(&self) -> Option<&str> {
        self.assignee_id.as_deref()
    }

    pub fn contact(&self) -> Option<&ContactRef> {
        self.contact.as_ref()
    }

    /// Id of the appointment being edited; None for a new one.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// True when the end lies before the start.
    ///
    /// Only reachable through `set_end_time`, which accepts the value as typed.
    pub fn has_inverted_range(&self) -> bool {
        self.end < self.start
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn set_visit_type(&mut self, visit_type: VisitType) {
        self.visit_type = visit_type;
    }

    pub fn set_activity_type(&mut self, activity_type: ActivityType) {
        self.activity_type = activity_type;
    }

    pub fn set_assignee(&mut self, assignee_id: Option<String>) {
        self.assignee_id = assignee_id;
    }

    /// Moves the start to `instant`, viewed in the draft's zone.
    pub fn set_start(&mut self, instant: LocalInstant) {
        let zone = self.start.zone();
        self.start = LocalInstant::new(instant.as_datetime().with_timezone(&zone));
        self.push_end_past_start();
    }

    /// Date picker: changes the start date, keeping its time.
    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start = self.start.with_local_date(date);
        self.push_end_past_start();
    }

    /// Time picker: changes the start time, keeping its date.
    pub fn set_start_time(&mut self, time: NaiveTime) {
        self.start = self.start.with_local_time(time);
        self.push_end_past_start();
    }

    /// Time picker for the end. Never touches the start.
    pub fn set_end_time(&mut self, time: NaiveTime) {
        self.end = self.end.with_local_time(time);
    }

    /// Links a contact. An empty subject is filled with the contact's name.
    pub fn attach_contact(&mut self, contact: ContactRef) {
        if self.subject.trim().is_empty() && !contact.name.trim().is_empty() {
            self.subject = contact.name.trim().to_string();
        }
        self.contact = Some(contact);
    }

    pub fn detach_contact(&mut self) {
        self.contact = None;
    }

    /// Checks the fields required before submission.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.subject.trim().is_empty() {
            return Err(DraftError::EmptySubject);
        }
        if self.assignee_id.is_none() {
            return Err(DraftError::MissingAssignee);
        }
        Ok(())
    }

    /// Builds the create/update body in the server's UTC convention.
    pub fn to_submission_payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            subject: self.subject.clone(),
            date: to_server_date_string(&self.start),
            start_time: to_server_time_string(&self.start),
            end_time: to_server_time_string(&self.end),
            activitytype: self.activity_type,
            eventstatus: self.visit_type,
            assigned_user_id: self.assignee_id.clone(),
            owner_id: self.assignee_id.clone(),
            contact_id: self.contact.as_ref().and_then(|c| c.id.clone()),
        }
    }

    fn push_end_past_start(&mut self) {
        if self.end < self.start {
            self.end = self.start.plus(default_duration());
        }
    }
}

fn default_start(default_date: Option<&str>, now: &DateTime<Tz>) -> LocalInstant {
    let date = default_date
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(|| now.date_naive());
    let local = round_up_to_quarter(date.and_time(now.time()));
    LocalInstant::from_local(local, now.timezone())
}
