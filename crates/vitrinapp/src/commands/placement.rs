use crate::commands::helpers::slot_holders;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VitrinError};
use crate::model::{Slot, SlotKind};
use crate::rules::slots::{transition, SelectionState, SlotPolicy, SlotTransition};
use crate::store::DataStore;
use tracing::{info, warn};
use uuid::Uuid;

/// Puts a record into `requested` (or takes it out with `None`).
///
/// Validates against the area's [`SlotPolicy`], then writes in two steps: any
/// other record holding the target slot is cleared and saved, then the record
/// itself is saved.
pub fn apply<S: DataStore>(
    store: &mut S,
    kind: SlotKind,
    id: &Uuid,
    requested: Option<Slot>,
) -> Result<CmdResult> {
    let policy = SlotPolicy::for_kind(kind);
    let mut listing = store.get_listing(id)?;
    if !listing.fits(kind) {
        let reason = match kind {
            SlotKind::Hero => "projects cannot be hero listings",
            SlotKind::Carousel => "only projects can be placed in the homepage carousel",
        };
        return Err(VitrinError::Validation(format!("{}: {}", listing.sku, reason)));
    }

    let holders = slot_holders(store, kind)?;
    let current = listing.slot(kind);
    let state = SelectionState {
        selected_count: holders.len(),
        is_already_selected: current.is_some(),
        is_published: listing.is_published(),
    };

    let refusal = policy
        .selection_error(requested.is_some(), state)
        .or_else(|| policy.removal_error(requested, state.selected_count, current.is_some()));
    if let Some(error) = refusal {
        warn!(sku = %listing.sku, ?kind, %error, "slot request refused");
        return Err(error.into());
    }

    let mut result = CmdResult::default();
    match transition(current, requested) {
        SlotTransition::Unchanged => {
            let content = match current {
                Some(slot) => format!("{} already holds {} slot {}", listing.sku, kind, slot),
                None => format!("{} is not in the {}", listing.sku, kind),
            };
            result.add_message(CmdMessage::info(content));
        }
        SlotTransition::Assign(to) | SlotTransition::Move { to, .. } => {
            let displaced = holders
                .into_iter()
                .filter(|h| h.id != listing.id && h.slot(kind) == Some(to));
            for mut holder in displaced {
                holder.set_slot(kind, None);
                store.save_listing(&holder)?;
                info!(sku = %holder.sku, ?kind, slot = %to, "slot cleared");
                result.add_message(CmdMessage::info(format!(
                    "{} removed from {} slot {}",
                    holder.sku, kind, to
                )));
                result.affected.push(holder);
            }

            listing.set_slot(kind, Some(to));
            store.save_listing(&listing)?;
            info!(sku = %listing.sku, ?kind, slot = %to, "slot assigned");
            result.add_message(CmdMessage::success(format!(
                "{} placed in {} slot {}",
                listing.sku, kind, to
            )));
            result.affected.push(listing);
        }
        SlotTransition::Remove(from) => {
            listing.set_slot(kind, None);
            store.save_listing(&listing)?;
            info!(sku = %listing.sku, ?kind, slot = %from, "slot removed");
            result.add_message(CmdMessage::success(format!(
                "{} removed from {} slot {}",
                listing.sku, kind, from
            )));
            result.affected.push(listing);
        }
    }

    Ok(result)
}
