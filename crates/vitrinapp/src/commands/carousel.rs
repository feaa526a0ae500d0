//! Homepage carousel: up to three published projects. Unlike hero listings the
//! carousel may be emptied.

use super::helpers::{slot_holders, taken_slots};
use super::placement;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Slot, SlotKind};
use crate::rules::slots::{first_free_slot, SlotError, SLOT_LIMIT};
use crate::store::DataStore;
use tracing::{debug, warn};
use uuid::Uuid;

/// Adds a project to the carousel.
///
/// With no explicit slot, a project already in the carousel keeps its slot and a
/// new one gets the lowest free slot.
pub fn add<S: DataStore>(store: &mut S, id: &Uuid, slot: Option<Slot>) -> Result<CmdResult> {
    let slot = match slot {
        Some(slot) => slot,
        None => allocate(store, id)?,
    };
    placement::apply(store, SlotKind::Carousel, id, Some(slot))
}

pub fn remove<S: DataStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    placement::apply(store, SlotKind::Carousel, id, None)
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let holders = slot_holders(store, SlotKind::Carousel)?;
    let mut result = CmdResult::default();
    if holders.is_empty() {
        result.add_message(CmdMessage::info("The homepage carousel is empty."));
    }
    Ok(result.with_listed(holders))
}

fn allocate<S: DataStore>(store: &S, id: &Uuid) -> Result<Slot> {
    if let Some(current) = store.get_listing(id)?.carousel_slot {
        return Ok(current);
    }
    let taken = taken_slots(store, SlotKind::Carousel, id)?;
    match first_free_slot(&taken) {
        Some(slot) => {
            debug!(?taken, %slot, "carousel slot allocated");
            Ok(slot)
        }
        None => {
            warn!(?taken, "carousel is full");
            Err(SlotError::Full {
                kind: SlotKind::Carousel,
                limit: SLOT_LIMIT,
            }
            .into())
        }
    }
}
