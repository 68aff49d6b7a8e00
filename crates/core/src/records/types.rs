use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::raw::{RawContact, RawEvent, RawOwner};
use crate::time::{format_time_for_display, LocalInstant, ServerCalendarPoint};

/// Display name used when an owner has neither `name` nor `label`.
pub const UNNAMED_OWNER: &str = "Unnamed";

/// The contact linked to an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRef {
    pub id: Option<String>,
    pub name: String,
    pub phone: Option<String>,
}

impl ContactRef {
    /// Creates a reference with an id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            phone: None,
        }
    }

    /// Sets the phone number shown next to the name.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A normalized event record.
///
/// Start and end are kept as ordered candidate lists so the draft can try each
/// field pair in turn before falling back to a computed default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: Option<String>,
    pub subject: String,
    pub start_candidates: Vec<ServerCalendarPoint>,
    pub end_candidates: Vec<ServerCalendarPoint>,
    pub visit_type: Option<String>,
    pub activity_type: Option<String>,
    /// Raw assignee as sent: a plain id or a composite `"<A>x<B>"` token.
    pub assigned: Option<String>,
    pub contact: Option<ContactRef>,
    pub location: Option<String>,
}

impl EventRecord {
    /// First start candidate that converts to an instant.
    pub fn start_in(&self, zone: Tz) -> Option<LocalInstant> {
        first_valid(&self.start_candidates, zone)
    }

    /// First end candidate that converts to an instant.
    pub fn end_in(&self, zone: Tz) -> Option<LocalInstant> {
        first_valid(&self.end_candidates, zone)
    }

    /// `HH:MM - HH:MM` in `zone`; unknown ends render as `--:--`.
    pub fn time_label(&self, zone: Tz) -> String {
        let render = |instant: Option<LocalInstant>| {
            instant
                .as_ref()
                .map(format_time_for_display)
                .unwrap_or_else(|| "--:--".to_string())
        };
        format!("{} - {}", render(self.start_in(zone)), render(self.end_in(zone)))
    }
}

fn first_valid(candidates: &[ServerCalendarPoint], zone: Tz) -> Option<LocalInstant> {
    candidates.iter().find_map(|point| point.to_local(zone))
}

impl From<RawEvent> for EventRecord {
    fn from(raw: RawEvent) -> Self {
        let mut start_candidates = Vec::new();
        if let (Some(date), Some(time)) = (&raw.date_start, &raw.time_start) {
            start_candidates.push(ServerCalendarPoint::new(date, time));
        }
        if let Some(start) = &raw.start {
            start_candidates.push(ServerCalendarPoint::from_combined(start));
        }

        let mut end_candidates = Vec::new();
        if let (Some(date), Some(time)) = (&raw.due_date, &raw.time_end) {
            end_candidates.push(ServerCalendarPoint::new(date, time));
        }
        if let Some(end) = &raw.end {
            end_candidates.push(ServerCalendarPoint::from_combined(end));
        }

        let contact = match raw.contact {
            Some(contact) if contact.id.is_some() || contact.name.is_some() => Some(ContactRef {
                id: contact.id,
                name: contact.name.unwrap_or_default(),
                phone: contact.phone,
            }),
            _ if raw.contact_id.is_some() || raw.contactname.is_some() => Some(ContactRef {
                id: raw.contact_id,
                name: raw.contactname.unwrap_or_default(),
                phone: raw.contactphone,
            }),
            _ => None,
        };

        Self {
            id: raw.activityid.or(raw.id).or(raw.activity_id),
            subject: raw.subject.or(raw.title).unwrap_or_default(),
            start_candidates,
            end_candidates,
            visit_type: raw.eventstatus.or(raw.tipologia_visita),
            activity_type: raw.activitytype,
            assigned: raw.assigned_user_id.or(raw.owner_id),
            contact,
            location: raw.location,
        }
    }
}

/// A normalized contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Option<String>,
    pub fullname: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
}

impl Contact {
    /// `fullname`, else `firstname lastname`, else None.
    pub fn display_name(&self) -> Option<String> {
        if let Some(fullname) = &self.fullname {
            return Some(fullname.clone());
        }
        let joined = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let joined = joined.trim();
        (!joined.is_empty()).then(|| joined.to_string())
    }

    /// The reference attached to an appointment. Prefers the mobile number.
    pub fn to_ref(&self) -> ContactRef {
        ContactRef {
            id: self.id.clone(),
            name: self.display_name().unwrap_or_default(),
            phone: self.mobile.clone().or_else(|| self.phone.clone()),
        }
    }
}

impl From<RawContact> for Contact {
    fn from(raw: RawContact) -> Self {
        Self {
            id: raw.id,
            fullname: raw.fullname,
            firstname: raw.firstname,
            lastname: raw.lastname,
            mobile: raw.mobile,
            phone: raw.phone,
            email: raw.email,
            description: raw.description,
        }
    }
}

/// A staff member appointments can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
}

impl Owner {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Normalizes a wire owner. Entries without an id are unusable.
    pub fn from_raw(raw: RawOwner) -> Option<Self> {
        let id = raw.id?;
        let name = raw
            .name
            .or(raw.label)
            .unwrap_or_else(|| UNNAMED_OWNER.to_string());
        Some(Self { id, name })
    }
}

/// Normalizes an owner list, dropping entries without an id and keeping order.
pub fn normalize_owners(raw: Vec<RawOwner>) -> Vec<Owner> {
    raw.into_iter().filter_map(Owner::from_raw).collect()
}
