/// Turning a context-menu click into a saved item
use crate::error::Result;
use crate::item::{ItemKind, SavedItem};
use crate::probe::PageContextData;
use crate::store::{ItemStore, StorageArea};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SaveText,
    SaveLink,
    SaveImage,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::SaveText, MenuAction::SaveLink, MenuAction::SaveImage];

    pub fn menu_id(self) -> &'static str {
        use crate::config::{MENU_IMAGE_ID, MENU_LINK_ID, MENU_TEXT_ID};
        match self {
            MenuAction::SaveText => MENU_TEXT_ID,
            MenuAction::SaveLink => MENU_LINK_ID,
            MenuAction::SaveImage => MENU_IMAGE_ID,
        }
    }

    pub fn from_menu_id(id: &str) -> Option<MenuAction> {
        MenuAction::ALL.into_iter().find(|action| action.menu_id() == id)
    }

    /// The browser context in which the entry is shown
    pub fn context(self) -> &'static str {
        match self {
            MenuAction::SaveText => "selection",
            MenuAction::SaveLink => "link",
            MenuAction::SaveImage => "image",
        }
    }

    pub fn label(self) -> (&'static str, &'static str) {
        match self {
            MenuAction::SaveText => ("menuSaveText", "Save text to side panel"),
            MenuAction::SaveLink => ("menuSaveLink", "Save link to side panel"),
            MenuAction::SaveImage => ("menuSaveImage", "Save image to side panel"),
        }
    }
}

/// The subset of the browser's click info the capture needs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuClick {
    pub menu_item_id: String,
    pub selection_text: String,
    pub link_url: String,
    pub src_url: String,
    pub page_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TabRef {
    pub id: Option<i32>,
    pub url: String,
}

fn prefer(primary: &str, secondary: &str) -> String {
    if primary.is_empty() {
        secondary.to_string()
    } else {
        primary.to_string()
    }
}

/// Display label for an image: its alt text, else the decoded file name, else the URL
pub fn image_label(image_url: &str, image_alt: &str) -> String {
    if !image_alt.is_empty() {
        return image_alt.to_string();
    }
    // `path()` rather than `path_segments()`: blob: and data: URLs have an opaque path
    Url::parse(image_url)
        .ok()
        .and_then(|url| {
            url.path()
                .split('/')
                .filter(|segment| !segment.is_empty())
                .last()
                .map(str::to_string)
        })
        .and_then(|segment| urlencoding::decode(&segment).ok().map(|s| s.into_owned()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| image_url.to_string())
}

/// Build the item for a click, or `None` when there is nothing worth saving
pub fn build_item(
    action: MenuAction,
    click: &MenuClick,
    tab: &TabRef,
    context: &PageContextData,
    id: String,
    created_at: String,
) -> Option<SavedItem> {
    let (content, kind) = match action {
        MenuAction::SaveText => {
            let text = click.selection_text.trim();
            if text.is_empty() {
                return None;
            }
            (text.to_string(), ItemKind::Text)
        }
        MenuAction::SaveLink => {
            let link_url = prefer(&click.link_url, &context.link_url);
            if link_url.is_empty() {
                return None;
            }
            let label = [context.link_text.trim(), click.selection_text.as_str()]
                .into_iter()
                .find(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| link_url.clone());
            (label, ItemKind::Link { link_url })
        }
        MenuAction::SaveImage => {
            let image_url = prefer(&click.src_url, &context.image_url);
            if image_url.is_empty() {
                return None;
            }
            let image_alt = context.image_alt.trim().to_string();
            let label = image_label(&image_url, &image_alt);
            (label, ItemKind::Image { image_url, image_alt })
        }
    };

    Some(SavedItem {
        id,
        content,
        kind,
        page_title: context.page_title.clone(),
        page_url: prefer(&click.page_url, &tab.url),
        created_at,
    })
}

/// Fresh random item id, with a timestamp-based fallback
pub fn generate_id() -> String {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes).into_uuid().to_string(),
        Err(e) => {
            log::warn!("Random source unavailable ({}), using fallback id", e);
            let entropy = (js_sys::Math::random() * u32::MAX as f64) as u32;
            fallback_id(Utc::now().timestamp_millis(), entropy)
        }
    }
}

pub fn fallback_id(millis: i64, entropy: u32) -> String {
    format!("item-{}-{:x}", millis, entropy)
}

/// Capture time in the same shape as JS `toISOString`
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds items from clicks and prepends them to the store
pub struct CaptureService<A: StorageArea> {
    store: ItemStore<A>,
}

impl<A: StorageArea> CaptureService<A> {
    pub fn new(store: ItemStore<A>) -> Self {
        CaptureService { store }
    }

    pub fn store(&self) -> &ItemStore<A> {
        &self.store
    }

    /// Save the click as a new item; empty captures are dropped silently
    pub async fn capture(
        &self,
        action: MenuAction,
        click: &MenuClick,
        tab: &TabRef,
        context: &PageContextData,
    ) -> Result<Option<SavedItem>> {
        let Some(item) = build_item(action, click, tab, context, generate_id(), now_iso()) else {
            log::debug!("Nothing to capture for {:?}", action);
            return Ok(None);
        };
        self.save(item).await
    }

    /// Prepend a built item; `None` when its id is already stored
    pub async fn save(&self, item: SavedItem) -> Result<Option<SavedItem>> {
        if !self.store.prepend(&item).await? {
            log::warn!("Item {} already stored, capture skipped", item.id);
            return Ok(None);
        }
        log::debug!("Captured {:?} item {}", item.item_type(), item.id);
        Ok(Some(item))
    }
}
