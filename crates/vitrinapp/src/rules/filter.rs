//! Admin list filters.
//!
//! Turns the optional query parameters of the admin listing views into one
//! [`Predicate`]. Two clauses are always present whatever the caller sends:
//!
//! - the record kind (`isProject == false` for listings, `true` for projects);
//! - a status clause: the requested status, or `status != ARCHIVED` when none
//!   was requested, so archived inventory stays out of default views.
//!
//! A free-text `query` fans out into a case-insensitive OR over
//! [`QUERY_FIELDS`].

use serde::{Deserialize, Serialize};

use super::predicate::Predicate;
use crate::model::{ListingStatus, PropertyType, SaleType};

/// Fields searched by the free-text query, in clause order.
pub const QUERY_FIELDS: [&str; 5] = ["sku", "titleTr", "city", "district", "neighborhood"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub sale_type: Option<SaleType>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub platform: Option<bool>,
}

pub fn build_listing_filter(filter: &ListingFilter) -> Predicate {
    build(filter, false)
}

/// Same rules as [`build_listing_filter`], restricted to projects.
pub fn build_project_filter(filter: &ListingFilter) -> Predicate {
    build(filter, true)
}

/// Free-text fan-out, `None` for a blank query.
pub fn query_clause(query: &str) -> Option<Predicate> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(Predicate::Or(
        QUERY_FIELDS
            .iter()
            .map(|field| Predicate::contains(*field, query))
            .collect(),
    ))
}

fn build(filter: &ListingFilter, projects: bool) -> Predicate {
    let mut clauses = vec![Predicate::eq("isProject", projects)];

    clauses.push(match filter.status {
        Some(status) => Predicate::eq("status", status.as_str()),
        None => Predicate::ne("status", ListingStatus::Archived.as_str()),
    });

    if let Some(or) = filter.query.as_deref().and_then(query_clause) {
        clauses.push(or);
    }
    if let Some(property_type) = filter.property_type {
        clauses.push(Predicate::eq("propertyType", property_type.as_str()));
    }
    if let Some(sale_type) = filter.sale_type {
        clauses.push(Predicate::eq("saleType", sale_type.as_str()));
    }
    if let Some(company) = filter.company.as_deref().map(str::trim) {
        if !company.is_empty() {
            clauses.push(Predicate::contains("company", company));
        }
    }
    if let Some(platform) = filter.platform {
        clauses.push(Predicate::eq("platform", platform));
    }

    Predicate::And(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Listing;
    use serde_json::json;

    #[test]
    fn defaults_hide_projects_and_archived() {
        let predicate = build_listing_filter(&ListingFilter::default());
        assert_eq!(
            predicate.to_json(),
            json!({"isProject": false, "status": {"not": "ARCHIVED"}})
        );
    }

    #[test]
    fn explicit_status_overrides_archived_default() {
        let filter = ListingFilter {
            status: Some(ListingStatus::Archived),
            ..Default::default()
        };
        assert_eq!(
            build_listing_filter(&filter).to_json(),
            json!({"isProject": false, "status": "ARCHIVED"})
        );
    }

    #[test]
    fn query_fans_out_to_five_fields() {
        let filter = ListingFilter {
            query: Some("  kadıköy ".into()),
            ..Default::default()
        };
        let json = build_listing_filter(&filter).to_json();
        let or = json["OR"].as_array().unwrap();
        assert_eq!(or.len(), 5);
        assert_eq!(
            or[1],
            json!({"titleTr": {"contains": "kadıköy", "mode": "insensitive"}})
        );
        let fields: Vec<&str> = or
            .iter()
            .map(|clause| clause.as_object().unwrap().keys().next().unwrap().as_str())
            .collect();
        assert_eq!(fields, QUERY_FIELDS);
    }

    #[test]
    fn blank_query_adds_nothing() {
        let filter = ListingFilter {
            query: Some("   ".into()),
            company: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(build_listing_filter(&filter).clauses().len(), 2);
    }

    #[test]
    fn all_parameters() {
        let filter = ListingFilter {
            status: Some(ListingStatus::Published),
            query: None,
            property_type: Some(PropertyType::Villa),
            sale_type: Some(SaleType::Rent),
            company: Some("Ege Emlak".into()),
            platform: Some(true),
        };
        assert_eq!(
            build_listing_filter(&filter).to_json(),
            json!({
                "isProject": false,
                "status": "PUBLISHED",
                "propertyType": "VILLA",
                "saleType": "RENT",
                "company": {"contains": "Ege Emlak", "mode": "insensitive"},
                "platform": true
            })
        );
    }

    #[test]
    fn project_filter_flips_kind() {
        let json = build_project_filter(&ListingFilter::default()).to_json();
        assert_eq!(json["isProject"], json!(true));
        assert_eq!(json["status"], json!({"not": "ARCHIVED"}));
    }

    #[test]
    fn predicate_evaluates_against_listings() {
        let predicate = build_listing_filter(&ListingFilter {
            query: Some("moda".into()),
            ..Default::default()
        });
        let hit = Listing::new("IST-1", "Daire").with_location("İstanbul", "Kadıköy", "Moda");
        let archived = hit.clone().with_status(ListingStatus::Archived);
        let project = Listing::project("P-1", "Moda Evleri", ["2+1"]);

        assert!(predicate.matches(&hit));
        assert!(!predicate.matches(&archived));
        assert!(!predicate.matches(&project));
    }
}
