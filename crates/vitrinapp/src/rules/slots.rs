//! Homepage slot rules: parsing, selection policy and allocation.
//!
//! Both homepage areas (hero listings and the project carousel) have three
//! exclusive slots. The rules here only decide; the command layer reads the
//! current occupancy from the store, asks these functions, and performs the
//! clear-then-set write.
//!
//! ## Per-record States
//!
//! ```text
//! Unselected ──select(n)──▶ SelectedAt(n) ──select(m)──▶ SelectedAt(m)
//!      ▲                          │
//!      └────────remove────────────┘   (hero: refused if it would leave 0)
//! ```
//!
//! Selecting into slot `n` clears whichever other record held `n` first. The two
//! writes are not atomic; concurrent admin edits can briefly leave two records
//! reporting the same slot until the next write.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{Slot, SlotKind};

/// Number of slots in each homepage area.
pub const SLOT_LIMIT: usize = 3;

/// Result of reading a raw slot value from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedSlot {
    /// Absent or blank: the caller wants no slot.
    Empty,
    Slot(Slot),
    /// Present but not one of 1, 2, 3. Reject the request.
    Invalid,
}

impl ParsedSlot {
    pub fn slot(self) -> Option<Slot> {
        match self {
            ParsedSlot::Slot(slot) => Some(slot),
            _ => None,
        }
    }
}

/// Parses a slot from a JSON request value (number, numeric string or null).
pub fn parse_slot(value: &Value) -> ParsedSlot {
    match value {
        Value::Null => ParsedSlot::Empty,
        Value::String(text) => parse_slot_text(Some(text.as_str())),
        Value::Number(number) => {
            let integral = number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            });
            integral
                .and_then(Slot::from_number)
                .map_or(ParsedSlot::Invalid, ParsedSlot::Slot)
        }
        _ => ParsedSlot::Invalid,
    }
}

/// Parses a slot from form or command-line text.
pub fn parse_slot_text(raw: Option<&str>) -> ParsedSlot {
    let Some(text) = raw.map(str::trim) else {
        return ParsedSlot::Empty;
    };
    if text.is_empty() {
        return ParsedSlot::Empty;
    }
    text.parse::<i64>()
        .ok()
        .and_then(Slot::from_number)
        .map_or(ParsedSlot::Invalid, ParsedSlot::Slot)
}

/// Whether a record may take a slot: re-selecting is always fine, otherwise
/// there must be room under [`SLOT_LIMIT`].
pub fn can_select(selected_count: usize, is_already_selected: bool) -> bool {
    is_already_selected || selected_count < SLOT_LIMIT
}

/// Lowest slot not in `taken`, or `None` when the area is full.
pub fn first_free_slot(taken: &[Slot]) -> Option<Slot> {
    Slot::ALL.into_iter().find(|slot| !taken.contains(slot))
}

/// Business-rule conflicts. Expected and recoverable; callers map them to a
/// conflict response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("only published records can be placed in the {kind}")]
    NotPublished { kind: SlotKind },

    #[error("{kind}: limited to {limit} selections, remove one first")]
    LimitReached { kind: SlotKind, limit: usize },

    #[error("at least {min} must remain selected in the {kind}")]
    MinimumRequired { kind: SlotKind, min: usize },

    #[error("{kind}: all {limit} slots are taken")]
    Full { kind: SlotKind, limit: usize },
}

/// Occupancy facts needed to validate one request, read fresh from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub selected_count: usize,
    pub is_already_selected: bool,
    pub is_published: bool,
}

/// Limits of one homepage area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPolicy {
    pub kind: SlotKind,
    pub limit: usize,
    /// Removals may not bring the count below this.
    pub min_selected: usize,
}

impl SlotPolicy {
    pub const HERO: SlotPolicy = SlotPolicy {
        kind: SlotKind::Hero,
        limit: SLOT_LIMIT,
        min_selected: 1,
    };

    pub const CAROUSEL: SlotPolicy = SlotPolicy {
        kind: SlotKind::Carousel,
        limit: SLOT_LIMIT,
        min_selected: 0,
    };

    pub fn for_kind(kind: SlotKind) -> SlotPolicy {
        match kind {
            SlotKind::Hero => Self::HERO,
            SlotKind::Carousel => Self::CAROUSEL,
        }
    }

    pub fn can_select(&self, selected_count: usize, is_already_selected: bool) -> bool {
        is_already_selected || selected_count < self.limit
    }

    pub fn selection_error(&self, should_select: bool, state: SelectionState) -> Option<SlotError> {
        if !should_select {
            return None;
        }
        let error = if !state.is_published {
            Some(SlotError::NotPublished { kind: self.kind })
        } else if !self.can_select(state.selected_count, state.is_already_selected) {
            Some(SlotError::LimitReached {
                kind: self.kind,
                limit: self.limit,
            })
        } else {
            None
        };
        debug!(kind = ?self.kind, ?state, ?error, "selection checked");
        error
    }

    pub fn removal_error(
        &self,
        requested_slot: Option<Slot>,
        selected_count: usize,
        is_currently_selected: bool,
    ) -> Option<SlotError> {
        if requested_slot.is_some() || !is_currently_selected {
            return None;
        }
        if selected_count.saturating_sub(1) < self.min_selected {
            return Some(SlotError::MinimumRequired {
                kind: self.kind,
                min: self.min_selected,
            });
        }
        None
    }
}

/// What a slot request does to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTransition {
    Assign(Slot),
    Move { from: Slot, to: Slot },
    Remove(Slot),
    /// Re-affirming the current slot, or removing from an unselected record.
    Unchanged,
}

pub fn transition(current: Option<Slot>, requested: Option<Slot>) -> SlotTransition {
    match (current, requested) {
        (None, Some(to)) => SlotTransition::Assign(to),
        (Some(from), Some(to)) if from != to => SlotTransition::Move { from, to },
        (Some(from), None) => SlotTransition::Remove(from),
        _ => SlotTransition::Unchanged,
    }
}
