use thiserror::Error;

/// Errors that can occur when validating a contact before submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Last name is required")]
    MissingLastname,
}
