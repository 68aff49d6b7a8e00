//! CLI command definitions.

pub mod contacts;
pub mod events;
pub mod owners;

use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use crmagenda_core::config::DEFAULT_TIMEZONE;
use crmagenda_core::draft::DEFAULT_ASSIGNEE_MARKER;

/// CLI client for the CRM agenda API.
#[derive(Debug, Parser)]
#[command(name = "crmagenda-client")]
#[command(about = "CLI client for the CRM agenda API", long_about = None)]
pub struct Cli {
    /// CRM base URL.
    #[arg(long, env = "CRMAGENDA_URL")]
    pub base_url: String,

    /// API key sent with every request.
    #[arg(long, env = "CRMAGENDA_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Owner name picked as the default assignee.
    #[arg(long, env = "CRMAGENDA_ASSIGNEE_MARKER", default_value = DEFAULT_ASSIGNEE_MARKER)]
    pub assignee_marker: String,

    /// IANA time zone appointments are displayed and edited in.
    #[arg(
        long,
        env = "CRMAGENDA_TIMEZONE",
        default_value_t = DEFAULT_TIMEZONE,
        value_parser = parse_timezone
    )]
    pub timezone: Tz,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Appointment management.
    Events(events::EventsCommand),
    /// Contact (patient) management.
    Contacts(contacts::ContactsCommand),
    /// Assignable owners.
    Owners(owners::OwnersCommand),
}

/// Parses an IANA zone name such as `Europe/Rome`.
pub fn parse_timezone(value: &str) -> Result<Tz, String> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|_| format!("unknown time zone '{value}'"))
}
