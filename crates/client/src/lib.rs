//! crmagenda_client - HTTP client, appointment editor and CLI for the CRM
//! mobile API.

pub mod cli;
pub mod client;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod output;

pub use client::CrmClient;
pub use editor::{AppointmentEditor, EditorError, SaveOutcome};
pub use error::{ClientError, Result};
pub use gateway::AppointmentGateway;
