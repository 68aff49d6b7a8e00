use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::draft::DEFAULT_ASSIGNEE_MARKER;

/// Zone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Rome;

/// User-facing names for the CRM's record types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    pub contact_singular: String,
    pub contact_plural: String,
    pub event_singular: String,
    pub event_plural: String,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            contact_singular: "Paziente".to_string(),
            contact_plural: "Pazienti".to_string(),
            event_singular: "Appuntamento".to_string(),
            event_plural: "Appuntamenti".to_string(),
        }
    }
}

/// Everything needed to talk to one CRM backend.
///
/// Built once and handed to the client; nothing reads backend settings from
/// globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmConfig {
    pub id: String,
    pub name: String,
    pub base_url: String,
    pub api_key: String,
    pub labels: LabelSet,
    /// Owner name fragment selected when an appointment has no valid assignee.
    pub assignee_marker: String,
    /// Zone appointments are displayed and edited in.
    pub timezone: Tz,
}

impl CrmConfig {
    /// Creates a config with default labels, marker and zone.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            id: "default".to_string(),
            name: "CRM".to_string(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            labels: LabelSet::default(),
            assignee_marker: DEFAULT_ASSIGNEE_MARKER.to_string(),
            timezone: DEFAULT_TIMEZONE,
        }
    }

    pub fn with_assignee_marker(mut self, marker: impl Into<String>) -> Self {
        self.assignee_marker = marker.into();
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Base URL without trailing slashes.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Checks that the backend endpoint and key are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.normalized_base_url().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}
