use crate::rules::slots::SlotError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum VitrinError {
    #[error("Listing not found: {0}")]
    ListingNotFound(Uuid),

    #[error("No listing matches '{0}'")]
    UnknownReference(String),

    #[error("Media not found: {0}")]
    MediaNotFound(String),

    #[error("Invalid slot '{0}': expected one of 1, 2, 3")]
    InvalidSlot(String),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl VitrinError {
    /// Business-rule conflicts the caller should surface as a conflict response.
    pub fn is_conflict(&self) -> bool {
        matches!(self, VitrinError::Slot(_))
    }

    /// Request validation failures, rejected before any state change.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VitrinError::InvalidSlot(_)
                | VitrinError::Validation(_)
                | VitrinError::UnknownReference(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VitrinError>;
