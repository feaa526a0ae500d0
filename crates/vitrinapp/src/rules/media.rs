//! Media category reconciliation.
//!
//! The project media form submits up to four id lists, one per
//! [`MediaCategory`]. A list may be omitted (leave that category alone) or sent
//! empty (clear that category). [`reconcile`] turns the submission into a
//! [`MediaPlan`]:
//!
//! 1. Every provided list is normalized with [`normalize_ids`].
//! 2. Lists are processed in [`MediaCategory::ALL`] order and each id is mapped
//!    to the category of the *last* list it appears in. So DOCUMENT beats MAP,
//!    MAP beats INTERIOR, INTERIOR beats EXTERIOR.
//! 3. The cover image is the first id that ends up EXTERIOR.
//!
//! Applying the plan is the caller's job: clear each provided category from the
//! project's media, assign the grouped ids, then clear the old cover and set the
//! new one when EXTERIOR was provided.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::model::MediaCategory;

/// One form submission. `None` means the list was not sent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCategoryInput {
    #[serde(default)]
    pub exterior: Option<Vec<String>>,
    #[serde(default)]
    pub interior: Option<Vec<String>>,
    #[serde(default)]
    pub map: Option<Vec<String>>,
    #[serde(default)]
    pub document: Option<Vec<String>>,
}

impl MediaCategoryInput {
    pub fn get(&self, category: MediaCategory) -> Option<&[String]> {
        let list = match category {
            MediaCategory::Exterior => &self.exterior,
            MediaCategory::Interior => &self.interior,
            MediaCategory::Map => &self.map,
            MediaCategory::Document => &self.document,
        };
        list.as_deref()
    }

    pub fn set(&mut self, category: MediaCategory, ids: Vec<String>) {
        let slot = match category {
            MediaCategory::Exterior => &mut self.exterior,
            MediaCategory::Interior => &mut self.interior,
            MediaCategory::Map => &mut self.map,
            MediaCategory::Document => &mut self.document,
        };
        *slot = Some(ids);
    }

    pub fn with(mut self, category: MediaCategory, ids: &[&str]) -> Self {
        self.set(category, ids.iter().map(|id| id.to_string()).collect());
        self
    }
}

/// Trims, drops blanks and removes duplicates, keeping first-seen order.
pub fn normalize_ids<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|id| id.as_ref().trim())
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.to_string()))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaPlan {
    provided: Vec<MediaCategory>,
    // Insertion order is first-seen order; a later list only updates the category.
    assignments: Vec<(String, MediaCategory)>,
}

impl MediaPlan {
    /// Categories whose list was sent, in processing order.
    pub fn provided(&self) -> &[MediaCategory] {
        &self.provided
    }

    pub fn is_provided(&self, category: MediaCategory) -> bool {
        self.provided.contains(&category)
    }

    /// Nothing was sent; no store calls are needed.
    pub fn is_noop(&self) -> bool {
        self.provided.is_empty()
    }

    pub fn category_of(&self, id: &str) -> Option<MediaCategory> {
        self.assignments
            .iter()
            .find(|(assigned, _)| assigned == id)
            .map(|(_, category)| *category)
    }

    /// Resolved id -> category map.
    pub fn assignments(&self) -> HashMap<&str, MediaCategory> {
        self.assignments
            .iter()
            .map(|(id, category)| (id.as_str(), *category))
            .collect()
    }

    /// Ids grouped by their resolved category, first-seen order within a group.
    /// Categories without ids are absent.
    pub fn by_category(&self) -> Vec<(MediaCategory, Vec<&str>)> {
        MediaCategory::ALL
            .iter()
            .filter_map(|&category| {
                let ids: Vec<&str> = self
                    .assignments
                    .iter()
                    .filter(|(_, assigned)| *assigned == category)
                    .map(|(id, _)| id.as_str())
                    .collect();
                (!ids.is_empty()).then_some((category, ids))
            })
            .collect()
    }

    /// First id resolved to EXTERIOR.
    pub fn cover(&self) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(_, category)| *category == MediaCategory::Exterior)
            .map(|(id, _)| id.as_str())
    }
}

pub fn reconcile(input: &MediaCategoryInput) -> MediaPlan {
    let mut plan = MediaPlan::default();
    for &category in MediaCategory::ALL {
        let Some(ids) = input.get(category) else {
            continue;
        };
        plan.provided.push(category);
        for id in normalize_ids(ids) {
            match plan.assignments.iter_mut().find(|(seen, _)| *seen == id) {
                Some(entry) => entry.1 = category,
                None => plan.assignments.push((id, category)),
            }
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use MediaCategory::*;

    #[test]
    fn normalize_trims_dedupes_and_keeps_order() {
        assert_eq!(normalize_ids(&[" m1 ", "m1", "", "m2"]), vec!["m1", "m2"]);
        assert_eq!(normalize_ids(&["  ", "\t"]), Vec::<String>::new());
        assert_eq!(normalize_ids(&["b", "a", "b"]), vec!["b", "a"]);
    }

    #[test]
    fn last_category_wins() {
        let input = MediaCategoryInput::default()
            .with(Exterior, &["m1", "m2"])
            .with(Interior, &["m2", "m3"])
            .with(Document, &["m1"]);
        let plan = reconcile(&input);

        let map = plan.assignments();
        assert_eq!(map.len(), 3);
        assert_eq!(map["m1"], Document);
        assert_eq!(map["m2"], Interior);
        assert_eq!(map["m3"], Interior);
        assert_eq!(plan.provided(), &[Exterior, Interior, Document]);
    }

    #[test]
    fn map_beats_interior() {
        let input = MediaCategoryInput::default()
            .with(Interior, &["a"])
            .with(Map, &["a"]);
        assert_eq!(reconcile(&input).category_of("a"), Some(Map));
    }

    #[test]
    fn omitted_and_empty_are_different() {
        let input = MediaCategoryInput::default()
            .with(Exterior, &[])
            .with(Interior, &["x"]);
        let plan = reconcile(&input);
        assert_eq!(plan.provided(), &[Exterior, Interior]);
        assert!(!plan.is_provided(Map));
        assert_eq!(plan.by_category(), vec![(Interior, vec!["x"])]);
        assert_eq!(plan.cover(), None);
        assert!(!plan.is_noop());
    }

    #[test]
    fn nothing_provided_is_noop() {
        let plan = reconcile(&MediaCategoryInput::default());
        assert!(plan.is_noop());
        assert!(plan.assignments().is_empty());
    }

    #[test]
    fn grouping_keeps_first_seen_order() {
        let input = MediaCategoryInput::default()
            .with(Exterior, &["e1", "shared"])
            .with(Interior, &["i1", "shared"]);
        let plan = reconcile(&input);
        assert_eq!(
            plan.by_category(),
            vec![(Exterior, vec!["e1"]), (Interior, vec!["shared", "i1"])]
        );
    }

    #[test]
    fn cover_is_first_exterior_after_precedence() {
        let input = MediaCategoryInput::default()
            .with(Exterior, &[" m1", "m2", "m3"])
            .with(Document, &["m1"]);
        assert_eq!(reconcile(&input).cover(), Some("m2"));
    }

    #[test]
    fn input_deserializes_missing_vs_empty() {
        let input: MediaCategoryInput =
            serde_json::from_str(r#"{"exterior": [], "interior": ["x"]}"#).unwrap();
        assert_eq!(input.get(Exterior), Some(&[][..]));
        assert_eq!(input.get(Map), None);
    }
}
