//! Plain-text rendering of command results. Every function returns a `String`;
//! printing happens in `commands.rs`.

use super::styles;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vitrinapp::commands::CmdMessage;
use vitrinapp::model::{Listing, Media, SlotKind};
use vitrinapp::normalize::{localized_title, Locale};

const TITLE_WIDTH: usize = 36;

/// What the listed records are being shown as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    Plain,
    Slots(SlotKind),
}

pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}\n", styles::message(m.level).apply_to(&m.content)))
        .collect()
}

pub fn render_listings(listings: &[Listing], view: ListView, locale: Locale) -> String {
    if listings.is_empty() {
        return String::new();
    }

    let mut headers = vec!["SKU", "TITLE", "STATUS", "CITY", "ROOMS"];
    if let ListView::Slots(_) = view {
        headers.insert(0, "SLOT");
    }

    let rows: Vec<Vec<String>> = listings
        .iter()
        .map(|listing| {
            let mut row = vec![
                listing.sku.clone(),
                truncate(localized_title(listing, locale), TITLE_WIDTH),
                listing.status.to_string(),
                listing.city.clone(),
                rooms(listing),
            ];
            if let ListView::Slots(kind) = view {
                let slot = listing
                    .slot(kind)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                row.insert(0, slot);
            }
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    out.push_str(&format!(
        "{}\n",
        styles::header().apply_to(header_line.join("  ").trim_end())
    ));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad(cell, *w);
                match (view, i) {
                    (ListView::Slots(_), 0) => styles::slot().apply_to(padded).to_string(),
                    _ => padded,
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

pub fn render_media(media: &[Media]) -> String {
    let mut out = String::new();
    for item in media {
        let category = item
            .category
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let cover = if item.is_cover { " (cover)" } else { "" };
        out.push_str(&format!(
            "{:>3}. {}  {}{}\n",
            item.position,
            item.id,
            styles::muted().apply_to(category),
            styles::slot().apply_to(cover)
        ));
    }
    out
}

fn rooms(listing: &Listing) -> String {
    if listing.is_project {
        let units: Vec<&str> = listing.units.iter().map(|u| u.rooms.as_str()).collect();
        units.join(", ")
    } else {
        listing.rooms.clone().unwrap_or_default()
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Cuts `text` to at most `max` display columns, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
