//! Wire shapes as the mobile API sends them.
//!
//! Field names differ between CRM integrations, so every field is optional and
//! ids accept strings or numbers. Nothing outside `records` should read these
//! directly; convert them with `From` into the normalized types.

use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_loose_id, deserialize_optional_string};

/// An event (appointment) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub activityid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: Option<String>,
    #[serde(
        default,
        rename = "activityId",
        deserialize_with = "deserialize_loose_id"
    )]
    pub activity_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub time_start: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub time_end: Option<String>,
    /// Combined `"YYYY-MM-DD HH:MM:SS"` start.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub start: Option<String>,
    /// Combined `"YYYY-MM-DD HH:MM:SS"` end.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub end: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub eventstatus: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub tipologia_visita: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub activitytype: Option<String>,

    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub assigned_user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub contact: Option<RawEventContact>,
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub contact_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub contactname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub contactphone: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub location: Option<String>,
}

/// The contact embedded in an event record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventContact {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
}

/// A contact (patient) record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContact {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub firstname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
}

/// An entry of the owner (assignee) list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOwner {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub label: Option<String>,
}
