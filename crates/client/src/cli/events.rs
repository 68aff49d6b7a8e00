//! Events (appointments) CLI commands.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crmagenda_core::draft::{
    ActivityType as CoreActivityType, AppointmentDraft, VisitType as CoreVisitType,
};

use crate::client::events::EventView as CoreEventView;

/// Events management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// CLI visit type (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VisitType {
    CheckUp,
    FirstVisit,
    FollowUp,
    Dexa,
    MealPlan,
}

impl From<VisitType> for CoreVisitType {
    fn from(t: VisitType) -> Self {
        match t {
            VisitType::CheckUp => CoreVisitType::CheckUp,
            VisitType::FirstVisit => CoreVisitType::FirstVisit,
            VisitType::FollowUp => CoreVisitType::FollowUp,
            VisitType::Dexa => CoreVisitType::Dexa,
            VisitType::MealPlan => CoreVisitType::MealPlan,
        }
    }
}

/// CLI activity type.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActivityType {
    Tfm,
    Studio,
    Online,
}

impl From<ActivityType> for CoreActivityType {
    fn from(t: ActivityType) -> Self {
        match t {
            ActivityType::Tfm => CoreActivityType::Tfm,
            ActivityType::Studio => CoreActivityType::Studio,
            ActivityType::Online => CoreActivityType::Online,
        }
    }
}

/// CLI calendar span.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventView {
    Day,
    Week,
}

impl From<EventView> for CoreEventView {
    fn from(v: EventView) -> Self {
        match v {
            EventView::Day => CoreEventView::Day,
            EventView::Week => CoreEventView::Week,
        }
    }
}

/// Draft edits shared by `create` and `update`.
///
/// Fields are applied in declaration order, the same order a user fills the
/// form: start date and time first, then the end time.
#[derive(Debug, Clone, Default, Args)]
pub struct DraftEdits {
    /// Appointment subject.
    #[arg(long)]
    pub subject: Option<String>,
    /// Start time (HH:MM, local).
    #[arg(long)]
    pub start: Option<NaiveTime>,
    /// End time (HH:MM, local).
    #[arg(long)]
    pub end: Option<NaiveTime>,
    /// Visit type.
    #[arg(long, value_enum)]
    pub visit_type: Option<VisitType>,
    /// Activity type.
    #[arg(long, value_enum)]
    pub activity_type: Option<ActivityType>,
    /// Assignee (owner) ID.
    #[arg(long)]
    pub assignee: Option<String>,
    /// Contact ID to link.
    #[arg(long, conflicts_with = "no_contact")]
    pub contact_id: Option<String>,
    /// Unlink the current contact.
    #[arg(long)]
    pub no_contact: bool,
}

impl DraftEdits {
    /// Applies the edits that need no server round trip.
    /// Contact linking is handled by the caller.
    pub fn apply(&self, draft: &mut AppointmentDraft, start_date: Option<NaiveDate>) {
        if let Some(date) = start_date {
            draft.set_start_date(date);
        }
        if let Some(start) = self.start {
            draft.set_start_time(start);
        }
        if let Some(end) = self.end {
            draft.set_end_time(end);
        }
        if let Some(subject) = &self.subject {
            draft.set_subject(subject.clone());
        }
        if let Some(visit_type) = self.visit_type {
            draft.set_visit_type(visit_type.into());
        }
        if let Some(activity_type) = self.activity_type {
            draft.set_activity_type(activity_type.into());
        }
        if let Some(assignee) = &self.assignee {
            draft.set_assignee(Some(assignee.clone()));
        }
        if self.no_contact {
            draft.detach_contact();
        }
    }
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List appointments for a day or week.
    List {
        /// Day to show (YYYY-MM-DD). Defaults to today on the server.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Calendar span.
        #[arg(long, value_enum)]
        view: Option<EventView>,
    },
    /// Get appointment by ID.
    Get {
        /// Event ID.
        id: String,
    },
    /// Create an appointment.
    Create {
        /// Appointment day (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        #[command(flatten)]
        edit: DraftEdits,
    },
    /// Update an appointment.
    Update {
        /// Event ID.
        id: String,
        /// Move to another day (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
        #[command(flatten)]
        edit: DraftEdits,
    },
    /// Delete appointment by ID.
    Delete {
        /// Event ID.
        id: String,
    },
}
