//! # Storage Layer
//!
//! The persistence boundary. The rules never touch a store; the command layer
//! reads current state through [`DataStore`], asks the rules, and writes the
//! result back.
//!
//! ## Write Semantics
//!
//! Exclusive assignments (homepage slots, the EXTERIOR cover) are written as
//! two independent saves: clear the previous holder, then set the new one.
//! Stores are not required to make the pair atomic. Whoever saves last wins.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O. Counts
//!   writes so tests can assert that no-op requests stay no-ops.
//! - [`fs::FileStore`]: a single `catalog.json` document, rewritten atomically
//!   (temp file + rename) on every save.
//!
//! ## Storage Layout
//!
//! ```text
//! .vitrin/
//! ├── vitrin.toml     # Optional configuration
//! └── catalog.json    # Listings and media
//! ```

use crate::error::Result;
use crate::model::{Listing, Media};
use crate::rules::predicate::Predicate;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Abstract interface for catalog storage.
pub trait DataStore {
    /// Save a listing (create or update)
    fn save_listing(&mut self, listing: &Listing) -> Result<()>;

    fn get_listing(&self, id: &Uuid) -> Result<Listing>;

    fn list_listings(&self) -> Result<Vec<Listing>>;

    /// Delete a listing and its media
    fn delete_listing(&mut self, id: &Uuid) -> Result<()>;

    /// Save a media item (create or update)
    fn save_media(&mut self, media: &Media) -> Result<()>;

    fn get_media(&self, id: &str) -> Result<Media>;

    /// Media belonging to one listing, ordered by position
    fn list_media(&self, listing_id: &Uuid) -> Result<Vec<Media>>;

    /// Listings matching `predicate`, newest first.
    ///
    /// The default evaluates the predicate in process; a database-backed store
    /// would translate [`Predicate::to_json`] instead.
    fn query_listings(&self, predicate: &Predicate) -> Result<Vec<Listing>> {
        let mut listings: Vec<Listing> = self
            .list_listings()?
            .into_iter()
            .filter(|listing| predicate.matches(listing))
            .collect();
        sort_newest_first(&mut listings);
        Ok(listings)
    }
}

pub(crate) fn sort_newest_first(listings: &mut [Listing]) {
    listings.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.sku.cmp(&b.sku))
    });
}

pub(crate) fn sort_by_position(media: &mut [Media]) {
    media.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
}
