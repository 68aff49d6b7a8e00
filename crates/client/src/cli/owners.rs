//! Owner CLI commands.

use clap::{Parser, Subcommand};

/// Owner commands.
#[derive(Debug, Parser)]
pub struct OwnersCommand {
    #[command(subcommand)]
    pub action: OwnersAction,
}

/// Available owner actions.
#[derive(Debug, Subcommand)]
pub enum OwnersAction {
    /// List owners appointments can be assigned to.
    List,
}
