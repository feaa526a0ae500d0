//! # Domain Model
//!
//! The records this crate reasons about: [`Listing`] (flat listings and multi-unit
//! projects), [`Unit`] (a project's sub-unit) and [`Media`] (a project's images and
//! documents). They are owned by the persistence layer; the rules in
//! [`crate::rules`] only ever receive them as values.
//!
//! ## Closed Sets
//!
//! Everything that is a fixed enumeration in the back office is a Rust enum here,
//! so the rule tables get exhaustive matching:
//!
//! | Type | Values |
//! |------|--------|
//! | [`Slot`] | `1`, `2`, `3` |
//! | [`SlotKind`] | `hero`, `carousel` |
//! | [`MediaCategory`] | `EXTERIOR`, `INTERIOR`, `MAP`, `DOCUMENT` |
//! | [`ListingStatus`] | `DRAFT`, `PUBLISHED`, `SOLD`, `RENTED`, `ARCHIVED` |
//! | [`PropertyType`] | `APARTMENT`, `VILLA`, `LAND`, `COMMERCIAL`, `OFFICE` |
//! | [`SaleType`] | `SALE`, `RENT` |
//!
//! Text-valued enums serialize as their SCREAMING_CASE names; [`Slot`] serializes
//! as its number.
//!
//! ## Projects
//!
//! A project is a [`Listing`] with `is_project = true`. Its own `rooms` is usually
//! empty; room configurations live on its [`Unit`]s instead. Hero slots belong to
//! flat listings, carousel slots to projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::VitrinError;
use crate::rules::predicate::Queryable;

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            /// All values, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = VitrinError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        VitrinError::Validation(format!("unknown {} '{}'", $label, wanted))
                    })
            }
        }
    };
}

text_enum!(
    /// Publication state of a listing.
    ListingStatus, "status" {
        Draft => "DRAFT",
        Published => "PUBLISHED",
        Sold => "SOLD",
        Rented => "RENTED",
        Archived => "ARCHIVED",
    }
);

text_enum!(
    PropertyType, "property type" {
        Apartment => "APARTMENT",
        Villa => "VILLA",
        Land => "LAND",
        Commercial => "COMMERCIAL",
        Office => "OFFICE",
    }
);

text_enum!(
    SaleType, "sale type" {
        Sale => "SALE",
        Rent => "RENT",
    }
);

text_enum!(
    /// Role of a media item within a project.
    ///
    /// Declaration order is the reconciler's processing order: when an id is
    /// listed under several categories, the later one wins.
    MediaCategory, "media category" {
        Exterior => "EXTERIOR",
        Interior => "INTERIOR",
        Map => "MAP",
        Document => "DOCUMENT",
    }
);

impl Default for ListingStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// A numbered, exclusively occupied homepage position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    One,
    Two,
    Three,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::One, Slot::Two, Slot::Three];

    pub fn number(self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
            Slot::Three => 3,
        }
    }

    pub fn from_number(n: i64) -> Option<Slot> {
        match n {
            1 => Some(Slot::One),
            2 => Some(Slot::Two),
            3 => Some(Slot::Three),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = i64::deserialize(deserializer)?;
        Slot::from_number(n)
            .ok_or_else(|| serde::de::Error::custom(format!("slot out of range: {}", n)))
    }
}

/// Which homepage area a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Featured flat listings at the top of the homepage.
    Hero,
    /// The homepage project carousel.
    Carousel,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Hero => f.write_str("hero listings"),
            SlotKind::Carousel => f.write_str("homepage carousel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub rooms: String,
}

impl Unit {
    pub fn new(rooms: impl Into<String>) -> Self {
        Self {
            rooms: rooms.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub sku: String,
    pub title_tr: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub sale_type: Option<SaleType>,
    #[serde(default)]
    pub company: Option<String>,
    /// Listed on an external platform.
    #[serde(default)]
    pub platform: bool,
    /// Contact number, stored in E.164 once imported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub rooms: Option<String>,
    #[serde(default)]
    pub is_project: bool,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub hero_slot: Option<Slot>,
    #[serde(default)]
    pub carousel_slot: Option<Slot>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(sku: impl Into<String>, title_tr: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            sku: sku.into(),
            title_tr: title_tr.into(),
            title_en: String::new(),
            city: String::new(),
            district: String::new(),
            neighborhood: String::new(),
            status: ListingStatus::Draft,
            property_type: None,
            sale_type: None,
            company: None,
            platform: false,
            phone: None,
            rooms: None,
            is_project: false,
            units: Vec::new(),
            hero_slot: None,
            carousel_slot: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A multi-unit project with the given sub-unit room configurations.
    pub fn project<I, R>(sku: impl Into<String>, title_tr: impl Into<String>, unit_rooms: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let mut listing = Self::new(sku, title_tr);
        listing.is_project = true;
        listing.units = unit_rooms.into_iter().map(Unit::new).collect();
        listing
    }

    pub fn with_status(mut self, status: ListingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_rooms(mut self, rooms: impl Into<String>) -> Self {
        self.rooms = Some(rooms.into());
        self
    }

    pub fn with_location(
        mut self,
        city: impl Into<String>,
        district: impl Into<String>,
        neighborhood: impl Into<String>,
    ) -> Self {
        self.city = city.into();
        self.district = district.into();
        self.neighborhood = neighborhood.into();
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == ListingStatus::Published
    }

    pub fn slot(&self, kind: SlotKind) -> Option<Slot> {
        match kind {
            SlotKind::Hero => self.hero_slot,
            SlotKind::Carousel => self.carousel_slot,
        }
    }

    pub fn set_slot(&mut self, kind: SlotKind, slot: Option<Slot>) {
        match kind {
            SlotKind::Hero => self.hero_slot = slot,
            SlotKind::Carousel => self.carousel_slot = slot,
        }
        self.updated_at = Utc::now();
    }

    /// Whether this record may hold a slot of `kind` at all.
    pub fn fits(&self, kind: SlotKind) -> bool {
        match kind {
            SlotKind::Hero => !self.is_project,
            SlotKind::Carousel => self.is_project,
        }
    }
}

impl Queryable for Listing {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => Value::from(self.id.to_string()),
            "sku" => Value::from(self.sku.as_str()),
            "titleTr" => Value::from(self.title_tr.as_str()),
            "titleEn" => Value::from(self.title_en.as_str()),
            "city" => Value::from(self.city.as_str()),
            "district" => Value::from(self.district.as_str()),
            "neighborhood" => Value::from(self.neighborhood.as_str()),
            "status" => Value::from(self.status.as_str()),
            "propertyType" => self
                .property_type
                .map_or(Value::Null, |t| Value::from(t.as_str())),
            "saleType" => self
                .sale_type
                .map_or(Value::Null, |t| Value::from(t.as_str())),
            "company" => self
                .company
                .as_deref()
                .map_or(Value::Null, Value::from),
            "platform" => Value::from(self.platform),
            "rooms" => self.rooms.as_deref().map_or(Value::Null, Value::from),
            "isProject" => Value::from(self.is_project),
            "heroSlot" => self.hero_slot.map_or(Value::Null, |s| Value::from(s.number())),
            "carouselSlot" => self
                .carousel_slot
                .map_or(Value::Null, |s| Value::from(s.number())),
            _ => Value::Null,
        }
    }

    fn related(&self, relation: &str) -> Vec<&dyn Queryable> {
        match relation {
            "units" => self.units.iter().map(|u| u as &dyn Queryable).collect(),
            _ => Vec::new(),
        }
    }
}

impl Queryable for Unit {
    fn field(&self, name: &str) -> Value {
        match name {
            "rooms" => Value::from(self.rooms.as_str()),
            _ => Value::Null,
        }
    }
}

/// A project media item. Ids are opaque strings handed out by object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    pub listing_id: Uuid,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: Option<MediaCategory>,
    #[serde(default)]
    pub is_cover: bool,
    #[serde(default)]
    pub position: u32,
}

impl Media {
    pub fn new(id: impl Into<String>, listing_id: Uuid) -> Self {
        Self {
            id: id.into(),
            listing_id,
            url: String::new(),
            category: None,
            is_cover: false,
            position: 0,
        }
    }

    pub fn with_category(mut self, category: MediaCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// A whole catalog: the shape of the file store document and of import files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub media: Vec<Media>,
}
