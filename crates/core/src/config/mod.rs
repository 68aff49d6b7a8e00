mod error;
mod types;

pub use error::ConfigError;
pub use types::{CrmConfig, LabelSet, DEFAULT_TIMEZONE};
