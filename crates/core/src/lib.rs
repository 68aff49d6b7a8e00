//! crmagenda_core - pure types and functions for the CRM appointment front-end.
//!
//! Time normalization, record adapters, the appointment draft and its session
//! state machine. No I/O lives here.

pub mod config;
pub mod contact;
pub mod draft;
pub mod records;
pub mod serde;
pub mod time;
