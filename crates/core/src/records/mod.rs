mod raw;
mod types;

pub use raw::{RawContact, RawEvent, RawEventContact, RawOwner};
pub use types::{normalize_owners, Contact, ContactRef, EventRecord, Owner, UNNAMED_OWNER};
