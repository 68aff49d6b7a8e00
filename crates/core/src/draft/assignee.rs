use crate::records::Owner;

/// Owner name fragment preferred when no valid assignee is known.
pub const DEFAULT_ASSIGNEE_MARKER: &str = "TFM SAN SALVO";

/// Extracts the owner id from a raw assignee value.
///
/// Legacy records encode the assignee as `"<A>x<B>"`; the id is `<B>`.
pub fn parse_assignee_token(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains('x') {
        return raw
            .split('x')
            .nth(1)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
    }
    Some(raw.to_string())
}

/// Picks the assignee for a draft.
///
/// The raw value wins when it names an owner in the list. Otherwise the first
/// owner whose name contains `marker` (case-insensitive), else the first owner.
pub fn resolve_assignee(owners: &[Owner], raw: Option<&str>, marker: &str) -> Option<String> {
    let requested = raw.and_then(parse_assignee_token);
    if let Some(id) = requested {
        if owners.iter().any(|owner| owner.id == id) {
            return Some(id);
        }
    }

    let marker = marker.to_uppercase();
    owners
        .iter()
        .find(|owner| owner.name.to_uppercase().contains(&marker))
        .or_else(|| owners.first())
        .map(|owner| owner.id.clone())
}
