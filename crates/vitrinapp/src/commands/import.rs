//! Merges a catalog document (listings and media, the same shape as the file
//! store's `catalog.json`) into the store.
//!
//! Records are matched by id; an imported record replaces the stored one. The
//! merged catalog is validated as a whole before anything is written, so a bad
//! file leaves the store untouched.

use super::{CmdMessage, CmdResult};
use crate::error::{Result, VitrinError};
use crate::model::{Catalog, Listing, Media, MediaCategory, Slot, SlotKind};
use crate::normalize::normalize_phone;
use crate::rules::slots::{SlotError, SlotPolicy};
use crate::store::DataStore;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};
use uuid::Uuid;

pub fn parse(content: &str) -> Result<Catalog> {
    Ok(serde_json::from_str(content)?)
}

pub fn run<S: DataStore>(
    store: &mut S,
    mut catalog: Catalog,
    country_code: u16,
) -> Result<CmdResult> {
    check_unique_ids(&catalog)?;
    for listing in &mut catalog.listings {
        normalize_contact(listing, country_code)?;
    }

    let stored = store.list_listings()?;
    let mut by_id: HashMap<Uuid, &Listing> = stored.iter().map(|l| (l.id, l)).collect();
    for listing in &catalog.listings {
        by_id.insert(listing.id, listing);
    }
    let mut merged: Vec<&Listing> = by_id.into_values().collect();
    merged.sort_by(|a, b| a.sku.cmp(&b.sku));

    for kind in [SlotKind::Hero, SlotKind::Carousel] {
        check_slots(&merged, kind)?;
        check_floor(&stored, &merged, kind)?;
    }
    for media in &catalog.media {
        if !merged.iter().any(|l| l.id == media.listing_id) {
            return Err(VitrinError::Validation(format!(
                "media '{}' belongs to unknown listing {}",
                media.id, media.listing_id
            )));
        }
    }
    check_covers(&*store, &merged, &catalog.media)?;

    for listing in &catalog.listings {
        store.save_listing(listing)?;
    }
    for media in &catalog.media {
        store.save_media(media)?;
    }
    info!(
        listings = catalog.listings.len(),
        media = catalog.media.len(),
        "catalog imported"
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} listing(s) and {} media item(s)",
        catalog.listings.len(),
        catalog.media.len()
    )));
    result.affected = catalog.listings;
    result.media = catalog.media;
    Ok(result)
}

fn normalize_contact(listing: &mut Listing, country_code: u16) -> Result<()> {
    let Some(raw) = listing.phone.take() else {
        return Ok(());
    };
    if raw.trim().is_empty() {
        return Ok(());
    }
    match normalize_phone(&raw, country_code) {
        Some(phone) => {
            listing.phone = Some(phone);
            Ok(())
        }
        None => Err(VitrinError::Validation(format!(
            "{}: '{}' is not a phone number",
            listing.sku, raw
        ))),
    }
}

/// An import may not take a kind below its floor once the floor is met.
fn check_floor(stored: &[Listing], merged: &[&Listing], kind: SlotKind) -> Result<()> {
    let min = SlotPolicy::for_kind(kind).min_selected;
    let before = stored.iter().filter(|l| l.slot(kind).is_some()).count();
    let after = merged.iter().filter(|l| l.slot(kind).is_some()).count();
    if before >= min && after < min {
        warn!(%kind, before, after, "import rejected: below minimum");
        return Err(SlotError::MinimumRequired { kind, min }.into());
    }
    Ok(())
}

/// At most one cover per listing, and only on an EXTERIOR item.
fn check_covers<S: DataStore>(store: &S, listings: &[&Listing], imported: &[Media]) -> Result<()> {
    for listing in listings {
        if !imported.iter().any(|m| m.listing_id == listing.id) {
            continue;
        }
        let mut media: HashMap<String, Media> = store
            .list_media(&listing.id)?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect();
        for item in imported.iter().filter(|m| m.listing_id == listing.id) {
            media.insert(item.id.clone(), item.clone());
        }

        let mut covers: Vec<&Media> = media.values().filter(|m| m.is_cover).collect();
        covers.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(bad) = covers
            .iter()
            .find(|m| m.category != Some(MediaCategory::Exterior))
        {
            return Err(VitrinError::Validation(format!(
                "{}: cover '{}' is not an EXTERIOR item",
                listing.sku, bad.id
            )));
        }
        if let [first, second, ..] = covers.as_slice() {
            return Err(VitrinError::Validation(format!(
                "{}: '{}' and '{}' are both marked as cover",
                listing.sku, first.id, second.id
            )));
        }
    }
    Ok(())
}

fn check_unique_ids(catalog: &Catalog) -> Result<()> {
    let mut listing_ids = HashSet::new();
    if let Some(dup) = catalog.listings.iter().find(|l| !listing_ids.insert(l.id)) {
        return Err(VitrinError::Validation(format!(
            "listing {} appears twice in the import",
            dup.id
        )));
    }
    let mut media_ids = HashSet::new();
    if let Some(dup) = catalog.media.iter().find(|m| !media_ids.insert(m.id.as_str())) {
        return Err(VitrinError::Validation(format!(
            "media '{}' appears twice in the import",
            dup.id
        )));
    }
    Ok(())
}

fn check_slots(listings: &[&Listing], kind: SlotKind) -> Result<()> {
    let mut holders: HashMap<Slot, &str> = HashMap::new();
    for listing in listings {
        let Some(slot) = listing.slot(kind) else {
            continue;
        };
        if !listing.fits(kind) {
            return Err(VitrinError::Validation(format!(
                "{} cannot hold a slot in the {}",
                listing.sku, kind
            )));
        }
        if !listing.is_published() {
            return Err(SlotError::NotPublished { kind }.into());
        }
        if let Some(other) = holders.insert(slot, listing.sku.as_str()) {
            return Err(VitrinError::Validation(format!(
                "{} slot {} is claimed by both {} and {}",
                kind, slot, other, listing.sku
            )));
        }
    }
    Ok(())
}
