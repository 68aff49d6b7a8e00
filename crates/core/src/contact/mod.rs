mod draft;
mod error;

pub use draft::{ContactDraft, ContactPayload};
pub use error::ContactError;
