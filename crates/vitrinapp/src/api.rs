//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every client (the CLI today, an HTTP handler tomorrow).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Normalizes inputs**: listing references (UUID or SKU) become ids, raw slot
//!   text becomes a [`Slot`]
//! - **Dispatches** to the matching command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs` and [`crate::rules`]
//! - **Presentation**: no stdout, no formatting
//!
//! ## Slot Input
//!
//! Slot values arrive as text from forms and command lines. Blank text means "no
//! slot" (removal for hero listings, automatic allocation for the carousel);
//! anything outside 1..=3 is rejected with [`VitrinError::InvalidSlot`] before
//! the store is touched.
//!
//! ## Generic Over DataStore
//!
//! `VitrinApi<S: DataStore>` runs on `FileStore` in production and on
//! `InMemoryStore` in tests.

use crate::commands::{self, helpers::resolve_listing, CmdResult};
use crate::config::VitrinConfig;
use crate::error::{Result, VitrinError};
use crate::model::{Catalog, ListingStatus, Slot};
use crate::rules::filter::ListingFilter;
use crate::rules::media::MediaCategoryInput;
use crate::rules::rooms::RoomFilter;
use crate::rules::slots::{parse_slot_text, ParsedSlot};
use crate::store::DataStore;
use uuid::Uuid;

pub struct VitrinApi<S: DataStore> {
    store: S,
    config: VitrinConfig,
}

impl<S: DataStore> VitrinApi<S> {
    pub fn new(store: S, config: VitrinConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &VitrinConfig {
        &self.config
    }

    // --- Hero listings ---

    /// Places a listing in a hero slot; blank `slot` takes it out.
    pub fn set_hero_slot(&mut self, reference: &str, slot: Option<&str>) -> Result<CmdResult> {
        let id = self.resolve(reference)?;
        match parse_slot_input(slot)? {
            Some(slot) => commands::hero::set_slot(&mut self.store, &id, slot),
            None => commands::hero::clear(&mut self.store, &id),
        }
    }

    pub fn clear_hero(&mut self, reference: &str) -> Result<CmdResult> {
        let id = self.resolve(reference)?;
        commands::hero::clear(&mut self.store, &id)
    }

    pub fn hero_listings(&self) -> Result<CmdResult> {
        commands::hero::list(&self.store)
    }

    // --- Carousel ---

    /// Adds a project to the carousel; blank `slot` picks the first free one.
    pub fn add_to_carousel(&mut self, reference: &str, slot: Option<&str>) -> Result<CmdResult> {
        let id = self.resolve(reference)?;
        let slot = parse_slot_input(slot)?;
        commands::carousel::add(&mut self.store, &id, slot)
    }

    pub fn remove_from_carousel(&mut self, reference: &str) -> Result<CmdResult> {
        let id = self.resolve(reference)?;
        commands::carousel::remove(&mut self.store, &id)
    }

    pub fn carousel(&self) -> Result<CmdResult> {
        commands::carousel::list(&self.store)
    }

    // --- Media ---

    pub fn categorize_media(
        &mut self,
        project: &str,
        input: &MediaCategoryInput,
    ) -> Result<CmdResult> {
        let id = self.resolve(project)?;
        commands::media::categorize(&mut self.store, &id, input)
    }

    pub fn project_media(&self, project: &str) -> Result<CmdResult> {
        let id = self.resolve(project)?;
        commands::media::list(&self.store, &id)
    }

    // --- Listings ---

    pub fn listings(&self, filter: &ListingFilter) -> Result<CmdResult> {
        commands::listings::list(&self.store, filter)
    }

    pub fn projects(&self, filter: &ListingFilter) -> Result<CmdResult> {
        commands::listings::list_projects(&self.store, filter)
    }

    /// Public search by room configuration, honouring the `room_filter` setting.
    pub fn search<R: AsRef<str>>(&self, rooms: &[R]) -> Result<CmdResult> {
        let filter = RoomFilter::new(self.config.room_filter, rooms);
        commands::listings::search(&self.store, &filter)
    }

    pub fn set_status(&mut self, reference: &str, status: &str) -> Result<CmdResult> {
        let id = self.resolve(reference)?;
        let status: ListingStatus = status.parse()?;
        commands::listings::set_status(&mut self.store, &id, status)
    }

    pub fn delete(&mut self, reference: &str) -> Result<CmdResult> {
        let id = self.resolve(reference)?;
        commands::listings::delete(&mut self.store, &id)
    }

    // --- Import ---

    pub fn import(&mut self, catalog: Catalog) -> Result<CmdResult> {
        let country_code = self.config.default_country_code;
        commands::import::run(&mut self.store, catalog, country_code)
    }

    pub fn import_json(&mut self, content: &str) -> Result<CmdResult> {
        let catalog = commands::import::parse(content)?;
        self.import(catalog)
    }

    fn resolve(&self, reference: &str) -> Result<Uuid> {
        Ok(resolve_listing(&self.store, reference)?.id)
    }
}

/// `None` for blank input, an error for anything that is not a slot number.
pub fn parse_slot_input(raw: Option<&str>) -> Result<Option<Slot>> {
    match parse_slot_text(raw) {
        ParsedSlot::Empty => Ok(None),
        ParsedSlot::Slot(slot) => Ok(Some(slot)),
        ParsedSlot::Invalid => Err(VitrinError::InvalidSlot(
            raw.unwrap_or_default().trim().to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Listing, Media, MediaCategory};
    use crate::rules::slots::SlotError;
    use crate::store::memory::InMemoryStore;

    fn setup() -> VitrinApi<InMemoryStore> {
        let mut api = VitrinApi::new(InMemoryStore::new(), VitrinConfig::default());
        let mut hero = Listing::new("IST-1", "Daire").with_status(ListingStatus::Published);
        hero.hero_slot = Some(Slot::One);
        let project = Listing::project("PRJ-1", "Proje", ["2+1"]).with_status(ListingStatus::Published);
        let media = vec![Media::new("m1", project.id), Media::new("m2", project.id)];
        api.import(Catalog {
            listings: vec![
                hero,
                Listing::new("IST-2", "Stüdyo").with_status(ListingStatus::Published),
                project,
            ],
            media,
        })
        .unwrap();
        api
    }

    #[test]
    fn parse_slot_input_cases() {
        assert_eq!(parse_slot_input(Some(" 2 ")).unwrap(), Some(Slot::Two));
        assert_eq!(parse_slot_input(Some("  ")).unwrap(), None);
        assert_eq!(parse_slot_input(None).unwrap(), None);
        let err = parse_slot_input(Some("4")).unwrap_err();
        assert!(matches!(err, VitrinError::InvalidSlot(ref raw) if raw == "4"));
        assert!(err.is_validation());
    }

    #[test]
    fn set_hero_slot_by_sku() {
        let mut api = setup();
        api.set_hero_slot("ist-2", Some("2")).unwrap();
        let listed = api.hero_listings().unwrap().listed;
        let skus: Vec<&str> = listed.iter().map(|l| l.sku.as_str()).collect();
        assert_eq!(skus, vec!["IST-1", "IST-2"]);
    }

    #[test]
    fn blank_hero_slot_means_removal() {
        let mut api = setup();
        api.set_hero_slot("IST-2", Some("3")).unwrap();
        api.set_hero_slot("IST-2", Some("")).unwrap();
        assert_eq!(api.hero_listings().unwrap().listed.len(), 1);

        let err = api.set_hero_slot("IST-1", None).unwrap_err();
        assert!(matches!(
            err,
            VitrinError::Slot(SlotError::MinimumRequired { .. })
        ));
    }

    #[test]
    fn invalid_slot_is_rejected_before_writes() {
        let mut api = setup();
        let writes = api.store().writes();
        let err = api.set_hero_slot("IST-2", Some("abc")).unwrap_err();
        assert!(matches!(err, VitrinError::InvalidSlot(_)));
        assert_eq!(api.store().writes(), writes);
    }

    #[test]
    fn carousel_add_allocates() {
        let mut api = setup();
        api.add_to_carousel("PRJ-1", None).unwrap();
        let listed = api.carousel().unwrap().listed;
        assert_eq!(listed[0].carousel_slot, Some(Slot::One));

        api.remove_from_carousel("PRJ-1").unwrap();
        assert!(api.carousel().unwrap().listed.is_empty());
    }

    #[test]
    fn categorize_by_project_reference() {
        let mut api = setup();
        let input = MediaCategoryInput::default().with(MediaCategory::Exterior, &["m2", "m1"]);
        let result = api.categorize_media("PRJ-1", &input).unwrap();
        let cover: Vec<&str> = result
            .media
            .iter()
            .filter(|m| m.is_cover)
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(cover, vec!["m2"]);
    }

    #[test]
    fn search_uses_room_filter_setting() {
        let config = VitrinConfig {
            room_filter: false,
            ..Default::default()
        };
        let api = VitrinApi::new(InMemoryStore::new(), config);
        let predicate = api.search(&["2+1"]).unwrap().predicate.unwrap();
        assert_eq!(predicate, serde_json::json!({"status": "PUBLISHED"}));

        let api = setup();
        let result = api.search(&["2+1"]).unwrap();
        assert_eq!(result.listed.len(), 1);
        assert_eq!(result.listed[0].sku, "PRJ-1");
    }

    #[test]
    fn set_status_parses_case_insensitively() {
        let mut api = setup();
        api.set_status("IST-2", "archived").unwrap();
        assert!(api.set_status("IST-2", "gone").unwrap_err().is_validation());
    }

    #[test]
    fn unknown_reference() {
        let mut api = setup();
        let err = api.delete("NOPE").unwrap_err();
        assert!(matches!(err, VitrinError::UnknownReference(_)));
    }
}
