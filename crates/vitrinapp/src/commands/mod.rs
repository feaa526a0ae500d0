//! # Command Layer
//!
//! The callers of the rules. Each command reads the current state from a
//! [`DataStore`](crate::store::DataStore), asks [`crate::rules`] for a decision,
//! and performs the resulting writes.
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal or HTTP I/O**: they return data, the client renders it
//! - **Raw input parsing**: ids and slot text are parsed by the API facade
//! - **Transactions**: exclusive assignments are clear-then-set, two saves
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`]:
//! - `affected`: listings written by the command, in write order
//! - `listed`: listings to display
//! - `media`: media to display (after categorization, the project's media)
//! - `predicate`: the query document used, for list commands
//! - `messages`: leveled messages for the client
//!
//! Business-rule refusals are errors ([`crate::error::VitrinError::Slot`]), not
//! messages, so clients can map them to a conflict response.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` fixtures and check both the returned
//! `CmdResult` and the store contents afterwards.
//!
//! ## Command Modules
//!
//! - [`hero`]: hero listing slots
//! - [`carousel`]: homepage project carousel slots
//! - [`placement`]: the shared clear-then-set slot write
//! - [`media`]: project media categorization and cover selection
//! - [`listings`]: admin lists, public room search, status changes
//! - [`import`]: merge a JSON catalog into the store
//! - [`helpers`]: reference resolution and slot holder lookup

use crate::model::{Listing, Media};
use serde::Serialize;
use serde_json::Value;

pub mod carousel;
pub mod helpers;
pub mod hero;
pub mod import;
pub mod listings;
pub mod media;
pub mod placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub affected: Vec<Listing>,
    pub listed: Vec<Listing>,
    pub media: Vec<Media>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Value>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, listings: Vec<Listing>) -> Self {
        self.listed = listings;
        self
    }

    pub fn with_predicate(mut self, predicate: Value) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
