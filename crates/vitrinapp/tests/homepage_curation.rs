use serde_json::json;
use tempfile::TempDir;
use vitrinapp::api::VitrinApi;
use vitrinapp::config::VitrinConfig;
use vitrinapp::error::VitrinError;
use vitrinapp::model::{Catalog, Listing, ListingStatus, Media, MediaCategory, Slot};
use vitrinapp::rules::filter::ListingFilter;
use vitrinapp::rules::media::MediaCategoryInput;
use vitrinapp::rules::slots::SlotError;
use vitrinapp::store::fs::FileStore;
use vitrinapp::store::memory::InMemoryStore;
use vitrinapp::store::DataStore;

fn published(sku: &str) -> Listing {
    Listing::new(sku, format!("{sku} başlık")).with_status(ListingStatus::Published)
}

fn project(sku: &str, units: &[&str]) -> Listing {
    Listing::project(sku, format!("{sku} proje"), units.iter().copied())
        .with_status(ListingStatus::Published)
}

fn catalog() -> Catalog {
    let mut hero = published("IST-1").with_rooms("2+1");
    hero.hero_slot = Some(Slot::One);
    let mut carousel_a = project("PRJ-A", &["1+1", "2+1"]);
    carousel_a.carousel_slot = Some(Slot::One);
    let mut carousel_b = project("PRJ-B", &["3+1"]);
    carousel_b.carousel_slot = Some(Slot::Two);
    let mut carousel_c = project("PRJ-C", &["4+1"]);
    carousel_c.carousel_slot = Some(Slot::Three);
    let gallery = project("PRJ-D", &["2+1"]);
    let media = ["m1", "m2", "m3", "x"]
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let mut media = Media::new(*id, gallery.id);
            media.position = i as u32;
            media
        })
        .collect();

    Catalog {
        listings: vec![
            hero,
            published("IST-2").with_rooms("3+1"),
            Listing::new("IST-3", "Taslak"),
            published("IST-4").with_status(ListingStatus::Archived),
            carousel_a,
            carousel_b,
            carousel_c,
            gallery,
        ],
        media,
    }
}

fn setup() -> VitrinApi<InMemoryStore> {
    let mut api = VitrinApi::new(InMemoryStore::new(), VitrinConfig::default());
    api.import(catalog()).unwrap();
    api
}

#[test]
fn full_carousel_refuses_a_fourth_project() {
    let mut api = setup();

    let err = api.add_to_carousel("PRJ-D", Some("1")).unwrap_err();
    assert!(matches!(
        err,
        VitrinError::Slot(SlotError::LimitReached { limit: 3, .. })
    ));
    assert!(err.to_string().contains("homepage carousel"));

    let err = api.add_to_carousel("PRJ-D", None).unwrap_err();
    assert!(matches!(err, VitrinError::Slot(SlotError::Full { .. })));

    let carousel = api.carousel().unwrap().listed;
    let skus: Vec<&str> = carousel.iter().map(|l| l.sku.as_str()).collect();
    assert_eq!(skus, vec!["PRJ-A", "PRJ-B", "PRJ-C"]);
}

#[test]
fn freeing_a_carousel_slot_lets_the_next_project_in() {
    let mut api = setup();
    api.remove_from_carousel("PRJ-B").unwrap();

    api.add_to_carousel("PRJ-D", None).unwrap();

    let carousel = api.carousel().unwrap().listed;
    let slots: Vec<(&str, Option<Slot>)> = carousel
        .iter()
        .map(|l| (l.sku.as_str(), l.carousel_slot))
        .collect();
    assert_eq!(
        slots,
        vec![
            ("PRJ-A", Some(Slot::One)),
            ("PRJ-D", Some(Slot::Two)),
            ("PRJ-C", Some(Slot::Three)),
        ]
    );
}

#[test]
fn hero_floor_and_slot_moves() {
    let mut api = setup();

    let err = api.clear_hero("IST-1").unwrap_err();
    assert!(matches!(
        err,
        VitrinError::Slot(SlotError::MinimumRequired { min: 1, .. })
    ));

    api.set_hero_slot("IST-2", Some("1")).unwrap();
    let heroes = api.hero_listings().unwrap().listed;
    assert_eq!(heroes.len(), 1);
    assert_eq!(heroes[0].sku, "IST-2");

    let err = api.set_hero_slot("IST-3", Some("2")).unwrap_err();
    assert!(matches!(
        err,
        VitrinError::Slot(SlotError::NotPublished { .. })
    ));
}

#[test]
fn empty_exterior_clears_while_interior_assigns() {
    let mut api = setup();
    api.categorize_media(
        "PRJ-D",
        &MediaCategoryInput::default().with(MediaCategory::Exterior, &["m1"]),
    )
    .unwrap();

    let input = MediaCategoryInput::default()
        .with(MediaCategory::Exterior, &[])
        .with(MediaCategory::Interior, &["x"]);
    let result = api.categorize_media("PRJ-D", &input).unwrap();

    let state: Vec<(&str, Option<MediaCategory>, bool)> = result
        .media
        .iter()
        .map(|m| (m.id.as_str(), m.category, m.is_cover))
        .collect();
    assert_eq!(
        state,
        vec![
            ("m1", None, false),
            ("m2", None, false),
            ("m3", None, false),
            ("x", Some(MediaCategory::Interior), false),
        ]
    );
}

#[test]
fn noop_media_request_writes_nothing() {
    let mut api = setup();
    let writes = api.store().writes();

    api.categorize_media("PRJ-D", &MediaCategoryInput::default())
        .unwrap();

    assert_eq!(api.store().writes(), writes);
}

#[test]
fn admin_and_public_queries() {
    let api = setup();

    let listings = api.listings(&ListingFilter::default()).unwrap();
    let mut skus: Vec<&str> = listings.listed.iter().map(|l| l.sku.as_str()).collect();
    skus.sort();
    assert_eq!(skus, vec!["IST-1", "IST-2", "IST-3"]);

    let search = api.search(&["2+1"]).unwrap();
    let mut skus: Vec<&str> = search.listed.iter().map(|l| l.sku.as_str()).collect();
    skus.sort();
    assert_eq!(skus, vec!["IST-1", "PRJ-A", "PRJ-D"]);
    assert_eq!(
        search.predicate,
        Some(json!({
            "status": "PUBLISHED",
            "OR": [
                {"rooms": "2+1"},
                {"units": {"some": {"rooms": "2+1"}}}
            ]
        }))
    );
}

#[test]
fn file_store_keeps_curation_across_instances() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join(".vitrin");
    let mut api = VitrinApi::new(FileStore::new(data.clone()), VitrinConfig::default());
    api.import(catalog()).unwrap();
    api.set_hero_slot("IST-2", Some("2")).unwrap();

    let reopened = FileStore::new(data);
    let heroes: Vec<String> = reopened
        .list_listings()
        .unwrap()
        .into_iter()
        .filter(|l| l.hero_slot.is_some())
        .map(|l| l.sku)
        .collect();
    assert_eq!(heroes.len(), 2);
    assert!(heroes.contains(&"IST-2".to_string()));
}
