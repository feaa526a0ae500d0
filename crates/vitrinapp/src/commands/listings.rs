use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ListingStatus, SlotKind};
use crate::rules::filter::{build_listing_filter, build_project_filter, ListingFilter};
use crate::rules::predicate::Predicate;
use crate::rules::rooms::{build_room_scope, RoomFilter};
use crate::store::DataStore;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Admin listing table: flat listings only, archived hidden unless asked for.
pub fn list<S: DataStore>(store: &S, filter: &ListingFilter) -> Result<CmdResult> {
    run_query(store, build_listing_filter(filter))
}

/// Admin project table, the source list for the carousel.
pub fn list_projects<S: DataStore>(store: &S, filter: &ListingFilter) -> Result<CmdResult> {
    run_query(store, build_project_filter(filter))
}

/// Public search: published records matching the room selection, either on the
/// record itself or on one of its units.
pub fn search<S: DataStore>(store: &S, rooms: &RoomFilter) -> Result<CmdResult> {
    let mut clauses = vec![Predicate::eq("status", ListingStatus::Published.as_str())];
    if let Some(scope) = build_room_scope(rooms) {
        clauses.push(scope);
    }
    run_query(store, Predicate::And(clauses))
}

fn run_query<S: DataStore>(store: &S, predicate: Predicate) -> Result<CmdResult> {
    let json = predicate.to_json();
    debug!(predicate = %json, "querying listings");
    let listed = store.query_listings(&predicate)?;
    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info("No listings found."));
    }
    Ok(result.with_listed(listed).with_predicate(json))
}

/// Changes a record's status. Leaving PUBLISHED also takes the record off the
/// homepage, since only published records may hold slots.
pub fn set_status<S: DataStore>(store: &mut S, id: &Uuid, status: ListingStatus) -> Result<CmdResult> {
    let mut listing = store.get_listing(id)?;
    let mut result = CmdResult::default();
    if listing.status == status {
        result.add_message(CmdMessage::info(format!(
            "{} is already {}",
            listing.sku, status
        )));
        return Ok(result);
    }

    listing.status = status;
    if status != ListingStatus::Published {
        for kind in [SlotKind::Hero, SlotKind::Carousel] {
            if let Some(slot) = listing.slot(kind) {
                listing.set_slot(kind, None);
                warn!(sku = %listing.sku, ?kind, %slot, "slot released on status change");
                result.add_message(CmdMessage::warning(format!(
                    "{} removed from {} slot {} because it is no longer published",
                    listing.sku, kind, slot
                )));
            }
        }
    }
    store.save_listing(&listing)?;
    info!(sku = %listing.sku, %status, "status changed");
    result.add_message(CmdMessage::success(format!(
        "{} is now {}",
        listing.sku, status
    )));
    result.affected.push(listing);
    Ok(result)
}

/// Deletes a record together with its media.
pub fn delete<S: DataStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let listing = store.get_listing(id)?;
    store.delete_listing(id)?;
    info!(sku = %listing.sku, "listing deleted");
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deleted {}", listing.sku)));
    result.affected.push(listing);
    Ok(result)
}
