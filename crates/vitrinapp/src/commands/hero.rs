//! Hero listings: up to three published, non-project listings featured at the
//! top of the homepage. At least one must stay selected once the area is used.

use super::helpers::slot_holders;
use super::placement;
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Slot, SlotKind};
use crate::store::DataStore;
use uuid::Uuid;

pub fn set_slot<S: DataStore>(store: &mut S, id: &Uuid, slot: Slot) -> Result<CmdResult> {
    placement::apply(store, SlotKind::Hero, id, Some(slot))
}

pub fn clear<S: DataStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    placement::apply(store, SlotKind::Hero, id, None)
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let holders = slot_holders(store, SlotKind::Hero)?;
    let mut result = CmdResult::default();
    if holders.is_empty() {
        result.add_message(CmdMessage::info("No hero listings selected."));
    }
    Ok(result.with_listed(holders))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VitrinError;
    use crate::rules::slots::SlotError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn set_then_list() {
        let mut fixture = StoreFixture::new()
            .with_published("B")
            .with_hero("A", Slot::Two);
        let id = fixture.id_of("B");

        set_slot(&mut fixture.store, &id, Slot::One).unwrap();

        let listed = list(&fixture.store).unwrap().listed;
        let skus: Vec<&str> = listed.iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(skus, vec!["B", "A"]);
    }

    #[test]
    fn clearing_the_last_hero_is_refused() {
        let mut fixture = StoreFixture::new().with_hero("A", Slot::One);
        let id = fixture.id_of("A");

        let err = clear(&mut fixture.store, &id).unwrap_err();

        assert!(matches!(
            err,
            VitrinError::Slot(SlotError::MinimumRequired { min: 1, .. })
        ));
        assert_eq!(
            err.to_string(),
            "at least 1 must remain selected in the hero listings"
        );
        assert_eq!(fixture.listing("A").hero_slot, Some(Slot::One));
    }

    #[test]
    fn clearing_with_others_left() {
        let mut fixture = StoreFixture::new()
            .with_hero("A", Slot::One)
            .with_hero("B", Slot::Two);
        let id = fixture.id_of("A");

        clear(&mut fixture.store, &id).unwrap();

        assert_eq!(fixture.listing("A").hero_slot, None);
        assert_eq!(list(&fixture.store).unwrap().listed.len(), 1);
    }

    #[test]
    fn clearing_an_unselected_listing_is_a_noop() {
        let mut fixture = StoreFixture::new().with_published("A");
        let id = fixture.id_of("A");

        let result = clear(&mut fixture.store, &id).unwrap();

        assert!(result.affected.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn limit_message_names_hero_listings() {
        let mut fixture = StoreFixture::new()
            .with_hero("A", Slot::One)
            .with_hero("B", Slot::Two)
            .with_hero("C", Slot::Three)
            .with_published("D");
        let id = fixture.id_of("D");

        let err = set_slot(&mut fixture.store, &id, Slot::Two).unwrap_err();
        assert_eq!(
            err.to_string(),
            "hero listings: limited to 3 selections, remove one first"
        );
    }

    #[test]
    fn empty_list_has_message() {
        let fixture = StoreFixture::new().with_published("A");
        let result = list(&fixture.store).unwrap();
        assert!(result.listed.is_empty());
        assert_eq!(result.messages[0].content, "No hero listings selected.");
    }
}
