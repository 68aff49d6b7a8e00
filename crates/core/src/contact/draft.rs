use serde::{Deserialize, Serialize};

use super::error::ContactError;
use crate::records::Contact;

/// A contact being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub firstname: String,
    pub lastname: String,
    pub mobile: String,
    pub phone: String,
    pub email: String,
    pub description: String,
}

/// Body of a contact create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub firstname: String,
    pub lastname: String,
    pub mobile: String,
    pub phone: String,
    pub email: String,
    pub description: String,
}

impl ContactDraft {
    /// Creates a draft with just a last name.
    pub fn new(lastname: impl Into<String>) -> Self {
        Self {
            lastname: lastname.into(),
            ..Self::default()
        }
    }

    /// Prefills a draft from an existing contact.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            firstname: contact.firstname.clone().unwrap_or_default(),
            lastname: contact.lastname.clone().unwrap_or_default(),
            mobile: contact.mobile.clone().unwrap_or_default(),
            phone: contact.phone.clone().unwrap_or_default(),
            email: contact.email.clone().unwrap_or_default(),
            description: contact.description.clone().unwrap_or_default(),
        }
    }

    pub fn with_firstname(mut self, firstname: impl Into<String>) -> Self {
        self.firstname = firstname.into();
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = mobile.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The last name is the only required field.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.lastname.trim().is_empty() {
            return Err(ContactError::MissingLastname);
        }
        Ok(())
    }

    /// Builds the request body with every field trimmed.
    pub fn to_payload(&self) -> ContactPayload {
        ContactPayload {
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}
