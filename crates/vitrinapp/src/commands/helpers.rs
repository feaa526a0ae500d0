use crate::error::{Result, VitrinError};
use crate::model::{Listing, Slot, SlotKind};
use crate::rules::predicate::Predicate;
use crate::store::DataStore;
use serde_json::Value;
use uuid::Uuid;

/// Resolves a user-facing reference: a UUID, or a SKU (case-insensitive).
pub fn resolve_listing<S: DataStore>(store: &S, reference: &str) -> Result<Listing> {
    let reference = reference.trim();
    if let Ok(id) = Uuid::parse_str(reference) {
        return store.get_listing(&id);
    }

    let mut matches: Vec<Listing> = store
        .list_listings()?
        .into_iter()
        .filter(|l| l.sku.eq_ignore_ascii_case(reference))
        .collect();

    match matches.len() {
        0 => Err(VitrinError::UnknownReference(reference.to_string())),
        1 => Ok(matches.remove(0)),
        n => Err(VitrinError::Validation(format!(
            "SKU '{}' is ambiguous: matched {} listings, use the id instead",
            reference, n
        ))),
    }
}

pub fn slot_field(kind: SlotKind) -> &'static str {
    match kind {
        SlotKind::Hero => "heroSlot",
        SlotKind::Carousel => "carouselSlot",
    }
}

/// Records currently holding a slot of `kind`, ordered by slot.
pub fn slot_holders<S: DataStore>(store: &S, kind: SlotKind) -> Result<Vec<Listing>> {
    let mut holders = store.query_listings(&Predicate::ne(slot_field(kind), Value::Null))?;
    holders.sort_by_key(|l| l.slot(kind));
    Ok(holders)
}

/// Slots held by records other than `except`.
pub fn taken_slots<S: DataStore>(store: &S, kind: SlotKind, except: &Uuid) -> Result<Vec<Slot>> {
    Ok(slot_holders(store, kind)?
        .iter()
        .filter(|l| l.id != *except)
        .filter_map(|l| l.slot(kind))
        .collect())
}
