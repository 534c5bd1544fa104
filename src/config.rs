/// Fixed keys, identifiers and timings shared by every extension context

/// Key under which the item list lives in `chrome.storage.local`
pub const STORAGE_KEY: &str = "items";

/// Message type the background sends to a page to pull the last right-click context
pub const CONTEXT_MESSAGE_TYPE: &str = "side-stash-get-context";

pub const MENU_TEXT_ID: &str = "side-stash-save-text";
pub const MENU_LINK_ID: &str = "side-stash-save-link";
pub const MENU_IMAGE_ID: &str = "side-stash-save-image";

/// How long the background waits for a page to answer a context request
pub const CONTEXT_TIMEOUT_MS: u32 = 1000;

/// Transient status messages clear themselves after this long
pub const STATUS_CLEAR_MS: i32 = 2000;

/// Rows younger than this show a relative time ("5 min ago")
pub const RELATIVE_TIME_LIMIT_SECS: i64 = 86_400;
