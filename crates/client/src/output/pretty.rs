//! Pretty output formatting.

use chrono_tz::Tz;
use crmagenda_core::config::LabelSet;
use crmagenda_core::records::{Contact, EventRecord, Owner};
use crmagenda_core::time::format_for_display;

/// Format an event for display.
pub fn format_event(event: &EventRecord, zone: Tz, labels: &LabelSet) -> String {
    let subject = if event.subject.is_empty() {
        "(no subject)"
    } else {
        event.subject.as_str()
    };
    let mut output = format!("{} [{}]", subject, event.time_label(zone));
    if let Some(id) = &event.id {
        output.push_str(&format!("\n  ID: {}", id));
    }
    if let Some(start) = event.start_in(zone) {
        output.push_str(&format!("\n  Date: {}", format_for_display(&start)));
    }
    if let Some(visit) = &event.visit_type {
        output.push_str(&format!("\n  Visit: {}", visit));
    }
    if let Some(activity) = &event.activity_type {
        output.push_str(&format!("\n  Activity: {}", activity));
    }
    if let Some(contact) = &event.contact {
        output.push_str(&format!("\n  {}: {}", labels.contact_singular, contact.name));
        if let Some(phone) = &contact.phone {
            output.push_str(&format!(" ({})", phone));
        }
    }
    if let Some(assigned) = &event.assigned {
        output.push_str(&format!("\n  Assigned: {}", assigned));
    }
    if let Some(loc) = &event.location {
        output.push_str(&format!("\n  Location: {}", loc));
    }
    output
}

/// Format events for display.
pub fn format_events(events: &[EventRecord], zone: Tz, labels: &LabelSet) -> String {
    if events.is_empty() {
        return format!("No {} found.", labels.event_plural.to_lowercase());
    }
    let mut output = format!("{} ({})\n", labels.event_plural.to_uppercase(), events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_event(event, zone, labels)));
        output.push('\n');
    }
    output
}

/// Format a contact for display.
pub fn format_contact(contact: &Contact) -> String {
    let name = contact.display_name().unwrap_or_else(|| "(no name)".to_string());
    let mut output = name;
    if let Some(id) = &contact.id {
        output.push_str(&format!("\n  ID: {}", id));
    }
    if let Some(mobile) = &contact.mobile {
        output.push_str(&format!("\n  Mobile: {}", mobile));
    }
    if let Some(phone) = &contact.phone {
        output.push_str(&format!("\n  Phone: {}", phone));
    }
    if let Some(email) = &contact.email {
        output.push_str(&format!("\n  Email: {}", email));
    }
    if let Some(desc) = &contact.description {
        output.push_str(&format!("\n  Notes: {}", desc));
    }
    output
}

/// Format contacts for display.
pub fn format_contacts(contacts: &[Contact], labels: &LabelSet) -> String {
    if contacts.is_empty() {
        return format!("No {} found.", labels.contact_plural.to_lowercase());
    }
    let mut output = format!("{} ({})\n", labels.contact_plural.to_uppercase(), contacts.len());
    output.push_str(&"-".repeat(40));
    for contact in contacts {
        output.push_str(&format!("\n{}", format_contact(contact)));
        output.push('\n');
    }
    output
}

/// Format owners for display, one `id  name` line each.
pub fn format_owners(owners: &[Owner]) -> String {
    if owners.is_empty() {
        return "No owners found.".to_string();
    }
    let mut output = format!("OWNERS ({})\n", owners.len());
    output.push_str(&"-".repeat(40));
    for owner in owners {
        output.push_str(&format!("\n{:>6}  {}", owner.id, owner.name));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crmagenda_core::records::RawEvent;

    fn event(json: &str) -> EventRecord {
        serde_json::from_str::<RawEvent>(json).unwrap().into()
    }

    #[test]
    fn test_format_event_in_zone() {
        let event = event(
            r#"{"activityid": "55", "subject": "Controllo", "date_start": "2025-11-24", "time_start": "09:30:00", "due_date": "2025-11-24", "time_end": "10:00:00", "contact": {"id": "3", "name": "Mario Rossi", "phone": "333"}}"#,
        );
        let output = format_event(&event, chrono_tz::Europe::Rome, &LabelSet::default());

        assert!(output.starts_with("Controllo [10:30 - 11:00]"));
        assert!(output.contains("Date: 24/11/2025"));
        assert!(output.contains("Paziente: Mario Rossi (333)"));
    }

    #[test]
    fn test_format_event_unknown_end() {
        let event = event(r#"{"id": 1, "subject": "X", "date_start": "2025-11-24", "time_start": "09:30:00"}"#);
        let output = format_event(&event, chrono_tz::UTC, &LabelSet::default());
        assert!(output.starts_with("X [09:30 - --:--]"));
    }

    #[test]
    fn test_empty_lists_use_labels() {
        let labels = LabelSet::default();
        assert_eq!(format_events(&[], chrono_tz::UTC, &labels), "No appuntamenti found.");
        assert_eq!(format_contacts(&[], &labels), "No pazienti found.");
        assert_eq!(format_owners(&[]), "No owners found.");
    }

    #[test]
    fn test_format_owners() {
        let output = format_owners(&[Owner::new("7", "TFM SAN SALVO")]);
        assert!(output.starts_with("OWNERS (1)"));
        assert!(output.ends_with("     7  TFM SAN SALVO"));
    }
}
