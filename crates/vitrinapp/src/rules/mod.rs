//! # Curation Rules
//!
//! Pure decision functions. Nothing in this module reads or writes a store; each
//! function takes the current state as plain values and returns a decision or a
//! structured value for the caller to persist.
//!
//! - [`slots`]: slot parsing, selection/removal policy, first-free allocation
//! - [`media`]: media id normalization and category reconciliation
//! - [`rooms`]: room-configuration scope across flat listings and projects
//! - [`filter`]: admin list filters with default exclusions
//! - [`predicate`]: the predicate tree the builders return

pub mod filter;
pub mod media;
pub mod predicate;
pub mod rooms;
pub mod slots;

pub use filter::{build_listing_filter, build_project_filter, ListingFilter};
pub use media::{normalize_ids, reconcile, MediaCategoryInput, MediaPlan};
pub use predicate::{Condition, Predicate, Queryable};
pub use rooms::{build_room_scope, RoomFilter};
pub use slots::{
    can_select, first_free_slot, parse_slot, parse_slot_text, ParsedSlot, SelectionState,
    SlotError, SlotPolicy,
};
