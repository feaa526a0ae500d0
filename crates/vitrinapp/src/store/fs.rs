use super::{sort_by_position, DataStore};
use crate::error::{Result, VitrinError};
use crate::model::{Catalog, Listing, Media};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const CATALOG_FILE: &str = "catalog.json";

/// File-backed store: the whole catalog lives in one JSON document.
///
/// Every operation re-reads the document, so several processes can share a data
/// directory; the last save wins.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    pub fn load(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        if !path.exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(&path).map_err(VitrinError::Io)?;
        if content.trim().is_empty() {
            return Ok(Catalog::default());
        }
        let catalog = serde_json::from_str(&content).map_err(VitrinError::Serialization)?;
        Ok(catalog)
    }

    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(VitrinError::Io)?;
        }
        let content = serde_json::to_string_pretty(catalog).map_err(VitrinError::Serialization)?;
        let tmp_file = self.root.join(format!(".catalog-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(VitrinError::Io)?;
        if let Err(err) = fs::rename(&tmp_file, self.catalog_path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(VitrinError::Io(err));
        }
        debug!(
            path = %self.catalog_path().display(),
            listings = catalog.listings.len(),
            media = catalog.media.len(),
            "catalog saved"
        );
        Ok(())
    }
}

impl DataStore for FileStore {
    fn save_listing(&mut self, listing: &Listing) -> Result<()> {
        let mut catalog = self.load()?;
        match catalog.listings.iter_mut().find(|l| l.id == listing.id) {
            Some(existing) => *existing = listing.clone(),
            None => catalog.listings.push(listing.clone()),
        }
        self.save(&catalog)
    }

    fn get_listing(&self, id: &Uuid) -> Result<Listing> {
        self.load()?
            .listings
            .into_iter()
            .find(|l| l.id == *id)
            .ok_or(VitrinError::ListingNotFound(*id))
    }

    fn list_listings(&self) -> Result<Vec<Listing>> {
        Ok(self.load()?.listings)
    }

    fn delete_listing(&mut self, id: &Uuid) -> Result<()> {
        let mut catalog = self.load()?;
        let before = catalog.listings.len();
        catalog.listings.retain(|l| l.id != *id);
        if catalog.listings.len() == before {
            return Err(VitrinError::ListingNotFound(*id));
        }
        catalog.media.retain(|m| m.listing_id != *id);
        self.save(&catalog)
    }

    fn save_media(&mut self, media: &Media) -> Result<()> {
        let mut catalog = self.load()?;
        match catalog.media.iter_mut().find(|m| m.id == media.id) {
            Some(existing) => *existing = media.clone(),
            None => catalog.media.push(media.clone()),
        }
        self.save(&catalog)
    }

    fn get_media(&self, id: &str) -> Result<Media> {
        self.load()?
            .media
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| VitrinError::MediaNotFound(id.to_string()))
    }

    fn list_media(&self, listing_id: &Uuid) -> Result<Vec<Media>> {
        let mut media: Vec<Media> = self
            .load()?
            .media
            .into_iter()
            .filter(|m| m.listing_id == *listing_id)
            .collect();
        sort_by_position(&mut media);
        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MediaCategory, Slot};
    use tempfile::TempDir;

    #[test]
    fn missing_catalog_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join(".vitrin"));
        assert!(store.list_listings().unwrap().is_empty());
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join(".vitrin"));
        let mut listing = Listing::new("IST-1", "Daire");
        listing.hero_slot = Some(Slot::Two);
        store.save_listing(&listing).unwrap();

        assert!(store.catalog_path().exists());
        let reopened = FileStore::new(temp.path().join(".vitrin"));
        assert_eq!(reopened.get_listing(&listing.id).unwrap(), listing);
    }

    #[test]
    fn save_replaces_existing_records() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        let mut listing = Listing::new("IST-1", "Daire");
        store.save_listing(&listing).unwrap();
        listing.title_tr = "Bahçeli daire".into();
        store.save_listing(&listing).unwrap();

        let all = store.list_listings().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title_tr, "Bahçeli daire");
    }

    #[test]
    fn media_and_delete_cascade() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        let project = Listing::project("P-1", "Proje", ["2+1"]);
        store.save_listing(&project).unwrap();
        store
            .save_media(&Media::new("m1", project.id).with_category(MediaCategory::Map))
            .unwrap();

        assert_eq!(
            store.get_media("m1").unwrap().category,
            Some(MediaCategory::Map)
        );
        assert_eq!(store.list_media(&project.id).unwrap().len(), 1);

        store.delete_listing(&project.id).unwrap();
        assert!(matches!(
            store.get_media("m1"),
            Err(VitrinError::MediaNotFound(_))
        ));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        store.save_listing(&Listing::new("A", "A")).unwrap();
        let leftovers = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn corrupt_catalog_is_a_serialization_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CATALOG_FILE), "{not json").unwrap();
        let store = FileStore::new(temp.path());
        assert!(matches!(
            store.list_listings(),
            Err(VitrinError::Serialization(_))
        ));
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        fs::create_dir(store.catalog_path()).unwrap();

        assert!(store.save(&Catalog::default()).is_err());

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
