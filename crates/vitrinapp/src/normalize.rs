//! Input normalization shared by the back office and the public site: locale
//! codes, phone numbers and localized titles.

use crate::model::Listing;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COUNTRY_CODE: u16 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }

    /// Recognizes `tr`, `tr-TR`, `tr_TR`, `EN`, `en-US`... by their language part.
    pub fn parse(input: &str) -> Option<Locale> {
        let language = input
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "tr" => Some(Locale::Tr),
            "en" => Some(Locale::En),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Like [`Locale::parse`], falling back to `default` for anything unknown.
pub fn normalize_locale(input: &str, default: Locale) -> Locale {
    Locale::parse(input).unwrap_or(default)
}

/// Normalizes a phone number to E.164 (`+905321234567`).
///
/// National numbers (leading `0`, or ten bare digits) get `default_country_code`.
/// Returns `None` for anything that is not 10 to 15 digits once separators are
/// removed.
pub fn normalize_phone(input: &str, default_country_code: u16) -> Option<String> {
    let compact: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    let digits = if let Some(rest) = compact.strip_prefix('+') {
        rest.to_string()
    } else if let Some(rest) = compact.strip_prefix("00") {
        rest.to_string()
    } else if let Some(rest) = compact.strip_prefix('0') {
        format!("{}{}", default_country_code, rest)
    } else if compact.len() == 10 {
        format!("{}{}", default_country_code, compact)
    } else {
        compact
    };

    let valid = (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    valid.then(|| format!("+{}", digits))
}

/// Title in `locale`; the Turkish title is the fallback for a missing English one.
pub fn localized_title(listing: &Listing, locale: Locale) -> &str {
    match locale {
        Locale::En if !listing.title_en.trim().is_empty() => &listing.title_en,
        _ => &listing.title_tr,
    }
}
