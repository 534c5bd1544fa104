/// Typed wrappers over the `chrome.*` extension APIs
use crate::config::{CONTEXT_MESSAGE_TYPE, CONTEXT_TIMEOUT_MS};
use crate::error::{self, StashError};
use crate::store::StorageArea;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    fn onStorageChanged(key: &str, callback: &js_sys::Function);

    async fn requestPageContext(tab_id: i32, message_type: &str, timeout_ms: u32) -> JsValue;

    fn answerContextRequests(message_type: &str, callback: &js_sys::Function);

    #[wasm_bindgen(catch)]
    async fn recreateContextMenus(menus: JsValue) -> Result<(), JsValue>;

    fn onMenuClicked(callback: &js_sys::Function);

    fn onInstalledOrStartup(callback: &js_sys::Function);

    fn openPanelOnActionClick();

    fn getMessage(key: &str, substitutions: JsValue) -> String;
}

/// Convert to a plain JS value (objects, not `Map`s)
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> error::Result<JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

/// Convert a JS value into a JSON tree, `undefined` reading as `Null`
pub fn from_js(value: JsValue) -> error::Result<Value> {
    if value.is_null() || value.is_undefined() {
        return Ok(Value::Null);
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// `chrome.storage.local`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeLocalArea;

impl StorageArea for ChromeLocalArea {
    async fn get(&self, key: &str) -> error::Result<Value> {
        let value = getStorage(key)
            .await
            .map_err(|e| StashError::storage(format!("Failed to get {}: {:?}", key, e)))?;
        from_js(value)
    }

    async fn set(&self, key: &str, value: Value) -> error::Result<()> {
        let value = to_js(&value)?;
        setStorage(key, value)
            .await
            .map_err(|e| StashError::storage(format!("Failed to set {}: {:?}", key, e)))
    }
}

/// Call `callback` with the new value whenever `key` changes in the local area
pub fn watch_storage(key: &str, callback: &Closure<dyn Fn(JsValue)>) {
    onStorageChanged(key, callback.as_ref().unchecked_ref());
}

/// Ask a tab's probe for its last right-click context
///
/// A tab without a listener, or one that does not answer in time,
/// yields `Null`.
pub async fn request_page_context(tab_id: i32) -> error::Result<Value> {
    from_js(requestPageContext(tab_id, CONTEXT_MESSAGE_TYPE, CONTEXT_TIMEOUT_MS).await)
}

pub fn answer_context_requests(callback: &Closure<dyn Fn() -> JsValue>) {
    answerContextRequests(CONTEXT_MESSAGE_TYPE, callback.as_ref().unchecked_ref());
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub id: &'static str,
    pub title: String,
    pub contexts: Vec<&'static str>,
}

/// Remove every context menu entry, then create `menus`
pub async fn recreate_context_menus(menus: &[MenuEntry]) -> error::Result<()> {
    recreateContextMenus(to_js(menus)?)
        .await
        .map_err(StashError::bridge)
}

pub fn on_menu_clicked(callback: &Closure<dyn Fn(JsValue, JsValue)>) {
    onMenuClicked(callback.as_ref().unchecked_ref());
}

pub fn on_installed_or_startup(callback: &Closure<dyn Fn()>) {
    onInstalledOrStartup(callback.as_ref().unchecked_ref());
}

pub fn open_panel_on_action_click() {
    openPanelOnActionClick();
}

/// Raw catalog lookup; empty when the key is unknown
pub fn catalog_message(key: &str, substitutions: &[String]) -> String {
    let subs = to_js(substitutions).unwrap_or(JsValue::UNDEFINED);
    getMessage(key, subs)
}
