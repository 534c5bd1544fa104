/// Projection from the filtered view to display rows
///
/// Nothing here touches state; the UI turns rows into markup and sends
/// every interaction back through `PanelAction`s.
use crate::config::RELATIVE_TIME_LIMIT_SECS;
use crate::item::{ItemKind, ItemType, SavedItem};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Capture time relative to the render, localized by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    JustNow,
    Minutes(i64),
    Hours(i64),
    /// A day or more ago, or in the future
    Absolute(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePreview {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: String,
    pub selected: bool,
    pub item_type: ItemType,
    /// `None` when the stored time is missing or unparseable
    pub timestamp: Option<Timestamp>,
    pub content: String,
    pub preview: Option<ImagePreview>,
    /// Page title, else page URL
    pub source_title: String,
    /// Outbound link: the link, the image, else the page
    pub source_link: Option<String>,
}

/// Catalog key and fallback for a type badge
pub fn badge_label(item_type: ItemType) -> (&'static str, &'static str) {
    match item_type {
        ItemType::Text => ("badgeText", "TEXT"),
        ItemType::Link => ("badgeLink", "LINK"),
        ItemType::Image => ("badgeImage", "IMAGE"),
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

pub fn project_row(item: &SavedItem, selected: &HashSet<String>, now: DateTime<Utc>) -> ItemRow {
    let preview = match &item.kind {
        ItemKind::Image { image_url, image_alt } if !image_url.is_empty() => Some(ImagePreview {
            src: image_url.clone(),
            alt: non_empty(image_alt).unwrap_or_else(|| item.content.clone()),
        }),
        _ => None,
    };

    let source_link = match &item.kind {
        ItemKind::Link { link_url } => non_empty(link_url),
        ItemKind::Image { image_url, .. } => non_empty(image_url),
        ItemKind::Text => None,
    }
    .or_else(|| non_empty(&item.page_url));

    ItemRow {
        id: item.id.clone(),
        selected: selected.contains(&item.id),
        item_type: item.item_type(),
        timestamp: classify_timestamp(&item.created_at, now),
        content: item.content.clone(),
        preview,
        source_title: non_empty(&item.page_title).unwrap_or_else(|| item.page_url.clone()),
        source_link,
    }
}

pub fn project_rows(filtered: &[&SavedItem], selected: &HashSet<String>, now: DateTime<Utc>) -> Vec<ItemRow> {
    filtered
        .iter()
        .map(|item| project_row(item, selected, now))
        .collect()
}

/// Relative time for recent captures, an absolute time for older ones
pub fn classify_timestamp(created_at: &str, now: DateTime<Utc>) -> Option<Timestamp> {
    let created = DateTime::parse_from_rfc3339(created_at).ok()?.with_timezone(&Utc);
    let age = now.signed_duration_since(created).num_seconds();

    Some(match age {
        0..60 => Timestamp::JustNow,
        60..3600 => Timestamp::Minutes(age / 60),
        3600.. if age < RELATIVE_TIME_LIMIT_SECS => Timestamp::Hours(age / 3600),
        _ => Timestamp::Absolute(created),
    })
}
