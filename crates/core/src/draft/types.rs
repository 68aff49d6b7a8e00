use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of visit, sent to the backend as `eventstatus`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitType {
    #[default]
    #[serde(rename = "Visita di controllo")]
    CheckUp,
    #[serde(rename = "Prima visita")]
    FirstVisit,
    #[serde(rename = "Follow up")]
    FollowUp,
    #[serde(rename = "DEXA")]
    Dexa,
    #[serde(rename = "Piano alimentare")]
    MealPlan,
}

impl VisitType {
    pub const ALL: [VisitType; 5] = [
        VisitType::CheckUp,
        VisitType::FirstVisit,
        VisitType::FollowUp,
        VisitType::Dexa,
        VisitType::MealPlan,
    ];

    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::CheckUp => "Visita di controllo",
            VisitType::FirstVisit => "Prima visita",
            VisitType::FollowUp => "Follow up",
            VisitType::Dexa => "DEXA",
            VisitType::MealPlan => "Piano alimentare",
        }
    }

    /// Parses an exact wire value.
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for VisitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the appointment takes place, sent as `activitytype`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    #[default]
    #[serde(rename = "TFM")]
    Tfm,
    #[serde(rename = "Studio")]
    Studio,
    #[serde(rename = "Online")]
    Online,
}

impl ActivityType {
    pub const ALL: [ActivityType; 3] = [ActivityType::Tfm, ActivityType::Studio, ActivityType::Online];

    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Tfm => "TFM",
            ActivityType::Studio => "Studio",
            ActivityType::Online => "Online",
        }
    }

    /// Parses an exact wire value.
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a create or update request.
///
/// `owner_id` repeats `assigned_user_id`; older backend code still reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub subject: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub activitytype: ActivityType,
    pub eventstatus: VisitType,
    pub assigned_user_id: Option<String>,
    pub owner_id: Option<String>,
    pub contact_id: Option<String>,
}
