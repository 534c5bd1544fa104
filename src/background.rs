/// Background service worker: context menus and capture dispatch
use crate::capture::{CaptureService, MenuAction, MenuClick, TabRef};
use crate::chrome::{self, ChromeLocalArea, MenuEntry};
use crate::i18n::t;
use crate::probe::PageContextData;
use crate::store::ItemStore;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub fn menu_entries() -> Vec<MenuEntry> {
    MenuAction::ALL
        .iter()
        .map(|action| {
            let (key, fallback) = action.label();
            MenuEntry {
                id: action.menu_id(),
                title: t(key, fallback),
                contexts: vec![action.context()],
            }
        })
        .collect()
}

/// Wire the install/startup and menu click listeners
pub fn install() {
    let on_lifecycle = Closure::<dyn Fn()>::new(|| {
        spawn_local(register_menus());
        chrome::open_panel_on_action_click();
    });
    chrome::on_installed_or_startup(&on_lifecycle);
    on_lifecycle.forget();

    let on_click = Closure::<dyn Fn(JsValue, JsValue)>::new(|info: JsValue, tab: JsValue| {
        spawn_local(handle_click(info, tab));
    });
    chrome::on_menu_clicked(&on_click);
    on_click.forget();
}

async fn register_menus() {
    match chrome::recreate_context_menus(&menu_entries()).await {
        Ok(()) => log::info!("Context menus registered"),
        Err(e) => log::error!("Failed to register context menus: {}", e),
    }
}

async fn handle_click(info: JsValue, tab: JsValue) {
    let click: MenuClick = match serde_wasm_bindgen::from_value(info) {
        Ok(click) => click,
        Err(e) => {
            log::warn!("Unreadable menu click: {}", e);
            return;
        }
    };
    let Some(action) = MenuAction::from_menu_id(&click.menu_item_id) else {
        return;
    };
    let tab: TabRef = if tab.is_null() || tab.is_undefined() {
        TabRef::default()
    } else {
        serde_wasm_bindgen::from_value(tab).unwrap_or_default()
    };

    let context = page_context(&tab).await;
    let service = CaptureService::new(ItemStore::new(ChromeLocalArea));
    if let Err(e) = service.capture(action, &click, &tab, &context).await {
        log::error!("Capture failed: {}", e);
    }
}

/// Pull the probe's context; any failure degrades to empty fields
async fn page_context(tab: &TabRef) -> PageContextData {
    let Some(tab_id) = tab.id else {
        return PageContextData::default();
    };
    match chrome::request_page_context(tab_id).await {
        Ok(Value::Null) => {
            log::warn!("No page context from tab {}", tab_id);
            PageContextData::default()
        }
        Ok(value) => serde_json::from_value(value).unwrap_or_default(),
        Err(e) => {
            log::warn!("Page context request failed: {}", e);
            PageContextData::default()
        }
    }
}
