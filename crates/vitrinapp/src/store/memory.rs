use super::{sort_by_position, DataStore};
use crate::error::{Result, VitrinError};
use crate::model::{Listing, Media};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    listings: HashMap<Uuid, Listing>,
    media: HashMap<String, Media>,
    writes: usize,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful save/delete calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(VitrinError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn save_listing(&mut self, listing: &Listing) -> Result<()> {
        self.check_writable()?;
        self.listings.insert(listing.id, listing.clone());
        self.writes += 1;
        Ok(())
    }

    fn get_listing(&self, id: &Uuid) -> Result<Listing> {
        self.listings
            .get(id)
            .cloned()
            .ok_or(VitrinError::ListingNotFound(*id))
    }

    fn list_listings(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.values().cloned().collect())
    }

    fn delete_listing(&mut self, id: &Uuid) -> Result<()> {
        self.check_writable()?;
        if self.listings.remove(id).is_none() {
            return Err(VitrinError::ListingNotFound(*id));
        }
        self.media.retain(|_, media| media.listing_id != *id);
        self.writes += 1;
        Ok(())
    }

    fn save_media(&mut self, media: &Media) -> Result<()> {
        self.check_writable()?;
        self.media.insert(media.id.clone(), media.clone());
        self.writes += 1;
        Ok(())
    }

    fn get_media(&self, id: &str) -> Result<Media> {
        self.media
            .get(id)
            .cloned()
            .ok_or_else(|| VitrinError::MediaNotFound(id.to_string()))
    }

    fn list_media(&self, listing_id: &Uuid) -> Result<Vec<Media>> {
        let mut media: Vec<Media> = self
            .media
            .values()
            .filter(|m| m.listing_id == *listing_id)
            .cloned()
            .collect();
        sort_by_position(&mut media);
        Ok(media)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{ListingStatus, MediaCategory, Slot};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_listing(mut self, listing: Listing) -> Self {
            self.store.save_listing(&listing).unwrap();
            self
        }

        pub fn with_published(self, sku: &str) -> Self {
            self.with_listing(Listing::new(sku, sku).with_status(ListingStatus::Published))
        }

        pub fn with_hero(self, sku: &str, slot: Slot) -> Self {
            let mut listing = Listing::new(sku, sku).with_status(ListingStatus::Published);
            listing.hero_slot = Some(slot);
            self.with_listing(listing)
        }

        pub fn with_project(self, sku: &str, units: &[&str]) -> Self {
            self.with_listing(
                Listing::project(sku, sku, units.iter().copied())
                    .with_status(ListingStatus::Published),
            )
        }

        pub fn with_carousel(self, sku: &str, slot: Slot) -> Self {
            let mut project =
                Listing::project(sku, sku, ["2+1"]).with_status(ListingStatus::Published);
            project.carousel_slot = Some(slot);
            self.with_listing(project)
        }

        /// Adds media to the listing with the given SKU.
        pub fn with_media(mut self, sku: &str, id: &str, category: Option<MediaCategory>) -> Self {
            let owner = self.id_of(sku);
            let position = self.store.list_media(&owner).unwrap().len() as u32;
            let mut media = Media::new(id, owner);
            media.category = category;
            media.position = position;
            self.store.save_media(&media).unwrap();
            self
        }

        pub fn id_of(&self, sku: &str) -> Uuid {
            self.store
                .list_listings()
                .unwrap()
                .into_iter()
                .find(|l| l.sku == sku)
                .map(|l| l.id)
                .unwrap()
        }

        pub fn listing(&self, sku: &str) -> Listing {
            self.store.get_listing(&self.id_of(sku)).unwrap()
        }
    }
}
