//! Room-configuration search scope.
//!
//! Flat listings carry their room configuration (`"2+1"`) directly; projects
//! carry it on each sub-unit. A visitor filtering by rooms expects both, so the
//! scope is always a two-way OR:
//!
//! ```text
//! OR [ rooms == "2+1",  units.some(rooms == "2+1") ]               one value
//! OR [ rooms in [..],   units.some(rooms in [..]) ]                several values
//! ```

use serde::{Deserialize, Serialize};

use super::media::normalize_ids;
use super::predicate::Predicate;

pub const ROOMS_FIELD: &str = "rooms";
pub const UNITS_RELATION: &str = "units";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    /// Room filtering is switched on for this deployment.
    pub active: bool,
    #[serde(default)]
    pub rooms: Vec<String>,
}

impl RoomFilter {
    pub fn new<S: AsRef<str>>(active: bool, rooms: &[S]) -> Self {
        Self {
            active,
            rooms: rooms.iter().map(|r| r.as_ref().to_string()).collect(),
        }
    }
}

/// `None` means "no room constraint"; callers omit the clause entirely.
pub fn build_room_scope(filter: &RoomFilter) -> Option<Predicate> {
    if !filter.active {
        return None;
    }
    let rooms = normalize_ids(&filter.rooms);
    match rooms.as_slice() {
        [] => None,
        [single] => Some(Predicate::Or(vec![
            Predicate::eq(ROOMS_FIELD, single.as_str()),
            Predicate::some(UNITS_RELATION, Predicate::eq(ROOMS_FIELD, single.as_str())),
        ])),
        many => Some(Predicate::Or(vec![
            Predicate::one_of(ROOMS_FIELD, many.iter().map(String::as_str)),
            Predicate::some(
                UNITS_RELATION,
                Predicate::one_of(ROOMS_FIELD, many.iter().map(String::as_str)),
            ),
        ])),
    }
}
