//! Project media categorization.
//!
//! [`categorize`] applies a [`MediaPlan`] to one project's media: provided
//! categories are cleared, the resolved ids are assigned, and when EXTERIOR was
//! sent the cover moves to the first exterior image. The plan is applied to a
//! working copy and only items whose state changed are saved, so re-sending the
//! current categorization writes nothing.

use super::{CmdMessage, CmdResult};
use crate::error::{Result, VitrinError};
use crate::model::{Media, MediaCategory};
use crate::rules::media::{reconcile, MediaCategoryInput, MediaPlan};
use crate::store::DataStore;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub fn categorize<S: DataStore>(
    store: &mut S,
    project_id: &Uuid,
    input: &MediaCategoryInput,
) -> Result<CmdResult> {
    let plan = reconcile(input);
    let mut result = CmdResult::default();
    if plan.is_noop() {
        result.add_message(CmdMessage::info("No media categories provided, nothing to do."));
        return Ok(result);
    }

    let project = store.get_listing(project_id)?;
    if !project.is_project {
        return Err(VitrinError::Validation(format!(
            "{}: media categories apply to projects only",
            project.sku
        )));
    }

    let original = store.list_media(&project.id)?;
    let requested = plan.by_category().into_iter().flat_map(|(_, ids)| ids);
    for id in requested {
        if !original.iter().any(|m| m.id == id) {
            warn!(project = %project.sku, media = id, "unknown media id skipped");
            result.add_message(CmdMessage::warning(format!(
                "Media '{}' does not belong to {}, skipped",
                id, project.sku
            )));
        }
    }

    let mut working = original.clone();
    apply_plan(&plan, &mut working);

    let mut written = 0;
    for (before, after) in original.iter().zip(working.iter()) {
        if before != after {
            store.save_media(after)?;
            written += 1;
        }
    }
    info!(project = %project.sku, provided = ?plan.provided(), written, "media categorized");

    if written == 0 {
        result.add_message(CmdMessage::info("Media categories already up to date."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Updated {} media item(s) of {}",
            written, project.sku
        )));
    }
    result.media = working;
    Ok(result)
}

/// The project's media, in display order.
pub fn list<S: DataStore>(store: &S, project_id: &Uuid) -> Result<CmdResult> {
    let project = store.get_listing(project_id)?;
    let media = store.list_media(&project.id)?;
    let mut result = CmdResult::default();
    if media.is_empty() {
        result.add_message(CmdMessage::info(format!("{} has no media.", project.sku)));
    }
    result.media = media;
    Ok(result)
}

fn apply_plan(plan: &MediaPlan, media: &mut [Media]) {
    for item in media.iter_mut() {
        if let Some(category) = item.category {
            if plan.is_provided(category) {
                item.category = None;
            }
        }
    }

    for (category, ids) in plan.by_category() {
        for item in media.iter_mut().filter(|m| ids.contains(&m.id.as_str())) {
            item.category = Some(category);
        }
    }

    for item in media.iter_mut() {
        if item.is_cover && item.category != Some(MediaCategory::Exterior) {
            item.is_cover = false;
        }
    }

    if plan.is_provided(MediaCategory::Exterior) {
        for item in media.iter_mut() {
            item.is_cover = false;
        }
        let cover = plan
            .by_category()
            .into_iter()
            .find(|(category, _)| *category == MediaCategory::Exterior)
            .and_then(|(_, ids)| ids.into_iter().find(|id| media.iter().any(|m| m.id == *id)))
            .map(str::to_string);
        if let Some(cover) = &cover {
            if let Some(item) = media.iter_mut().find(|m| m.id == *cover) {
                item.is_cover = true;
            }
        }
        debug!(?cover, "cover selected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use MediaCategory::*;

    fn project_with_media() -> StoreFixture {
        StoreFixture::new()
            .with_project("P", &["2+1", "3+1"])
            .with_media("P", "m1", None)
            .with_media("P", "m2", None)
            .with_media("P", "m3", None)
    }

    fn category(fixture: &StoreFixture, id: &str) -> Option<MediaCategory> {
        fixture.store.get_media(id).unwrap().category
    }

    #[test]
    fn precedence_is_last_wins() {
        let mut fixture = project_with_media();
        let id = fixture.id_of("P");
        let input = MediaCategoryInput::default()
            .with(Exterior, &["m1", "m2"])
            .with(Interior, &["m2", "m3"])
            .with(Document, &["m1"]);

        categorize(&mut fixture.store, &id, &input).unwrap();

        assert_eq!(category(&fixture, "m1"), Some(Document));
        assert_eq!(category(&fixture, "m2"), Some(Interior));
        assert_eq!(category(&fixture, "m3"), Some(Interior));
    }

    #[test]
    fn empty_list_clears_category() {
        let mut fixture = StoreFixture::new()
            .with_project("P", &["2+1"])
            .with_media("P", "old", Some(Exterior))
            .with_media("P", "x", None);
        let id = fixture.id_of("P");
        let input = MediaCategoryInput::default()
            .with(Exterior, &[])
            .with(Interior, &["x"]);

        categorize(&mut fixture.store, &id, &input).unwrap();

        assert_eq!(category(&fixture, "old"), None);
        assert_eq!(category(&fixture, "x"), Some(Interior));
    }

    #[test]
    fn omitted_categories_are_untouched() {
        let mut fixture = StoreFixture::new()
            .with_project("P", &["2+1"])
            .with_media("P", "plan", Some(Map))
            .with_media("P", "a", None);
        let id = fixture.id_of("P");
        let input = MediaCategoryInput::default().with(Interior, &["a"]);

        categorize(&mut fixture.store, &id, &input).unwrap();

        assert_eq!(category(&fixture, "plan"), Some(Map));
        assert_eq!(category(&fixture, "a"), Some(Interior));
    }

    #[test]
    fn cover_moves_to_first_exterior() {
        let mut fixture = project_with_media();
        let id = fixture.id_of("P");
        let first = MediaCategoryInput::default().with(Exterior, &["m1", "m2"]);
        categorize(&mut fixture.store, &id, &first).unwrap();
        assert!(fixture.store.get_media("m1").unwrap().is_cover);

        let second = MediaCategoryInput::default().with(Exterior, &["m3", "m1"]);
        let result = categorize(&mut fixture.store, &id, &second).unwrap();

        assert!(fixture.store.get_media("m3").unwrap().is_cover);
        assert!(!fixture.store.get_media("m1").unwrap().is_cover);
        assert_eq!(result.media.iter().filter(|m| m.is_cover).count(), 1);
    }

    #[test]
    fn cover_skips_ids_overridden_by_later_lists() {
        let mut fixture = project_with_media();
        let id = fixture.id_of("P");
        let input = MediaCategoryInput::default()
            .with(Exterior, &["m1", "m2"])
            .with(Document, &["m1"]);

        categorize(&mut fixture.store, &id, &input).unwrap();

        assert!(fixture.store.get_media("m2").unwrap().is_cover);
        assert!(!fixture.store.get_media("m1").unwrap().is_cover);
    }

    #[test]
    fn noop_input_issues_no_writes() {
        let mut fixture = project_with_media();
        let id = fixture.id_of("P");
        let writes = fixture.store.writes();

        let result = categorize(&mut fixture.store, &id, &MediaCategoryInput::default()).unwrap();

        assert_eq!(fixture.store.writes(), writes);
        assert!(result.media.is_empty());
    }

    #[test]
    fn resending_same_input_writes_nothing() {
        let mut fixture = project_with_media();
        let id = fixture.id_of("P");
        let input = MediaCategoryInput::default().with(Interior, &["m1"]);
        categorize(&mut fixture.store, &id, &input).unwrap();
        let writes = fixture.store.writes();

        categorize(&mut fixture.store, &id, &input).unwrap();

        assert_eq!(fixture.store.writes(), writes);
    }

    #[test]
    fn unknown_ids_are_skipped_with_warning() {
        let mut fixture = project_with_media();
        let id = fixture.id_of("P");
        let input = MediaCategoryInput::default().with(Map, &["m2", "ghost"]);

        let result = categorize(&mut fixture.store, &id, &input).unwrap();

        assert!(result.has_warnings());
        assert_eq!(category(&fixture, "m2"), Some(Map));
    }

    #[test]
    fn non_project_is_rejected() {
        let mut fixture = StoreFixture::new().with_published("L");
        let id = fixture.id_of("L");
        let input = MediaCategoryInput::default().with(Map, &["m1"]);

        let err = categorize(&mut fixture.store, &id, &input).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn list_returns_media_in_order() {
        let fixture = project_with_media();
        let result = list(&fixture.store, &fixture.id_of("P")).unwrap();
        let ids: Vec<&str> = result.media.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }
}
