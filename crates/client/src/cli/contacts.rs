//! Contact CLI commands.

use clap::{Args, Parser, Subcommand};
use crmagenda_core::contact::ContactDraft;

/// Contact management commands.
#[derive(Debug, Parser)]
pub struct ContactsCommand {
    #[command(subcommand)]
    pub action: ContactsAction,
}

/// Optional contact fields shared by `create` and `update`.
#[derive(Debug, Clone, Default, Args)]
pub struct ContactFields {
    /// First name.
    #[arg(long)]
    pub firstname: Option<String>,
    /// Mobile number.
    #[arg(long)]
    pub mobile: Option<String>,
    /// Landline number.
    #[arg(long)]
    pub phone: Option<String>,
    /// Email address.
    #[arg(long)]
    pub email: Option<String>,
    /// Free-text notes.
    #[arg(long)]
    pub description: Option<String>,
}

impl ContactFields {
    /// Overlays the given fields on `draft`.
    pub fn apply(&self, mut draft: ContactDraft) -> ContactDraft {
        if let Some(firstname) = &self.firstname {
            draft = draft.with_firstname(firstname.as_str());
        }
        if let Some(mobile) = &self.mobile {
            draft = draft.with_mobile(mobile.as_str());
        }
        if let Some(phone) = &self.phone {
            draft = draft.with_phone(phone.as_str());
        }
        if let Some(email) = &self.email {
            draft = draft.with_email(email.as_str());
        }
        if let Some(description) = &self.description {
            draft = draft.with_description(description.as_str());
        }
        draft
    }
}

/// Available contact actions.
#[derive(Debug, Subcommand)]
pub enum ContactsAction {
    /// List contacts, optionally filtered.
    List {
        /// Name or phone fragment.
        #[arg(long)]
        search: Option<String>,
    },
    /// Get contact by ID.
    Get {
        /// Contact ID.
        id: String,
    },
    /// Create a contact.
    Create {
        /// Last name (required).
        #[arg(long)]
        lastname: String,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Update a contact.
    Update {
        /// Contact ID.
        id: String,
        /// New last name.
        #[arg(long)]
        lastname: Option<String>,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete contact by ID.
    Delete {
        /// Contact ID.
        id: String,
    },
}
