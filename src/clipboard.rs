/// Clipboard writes with a selection-based fallback
use crate::error::{Result, StashError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

/// Copy `text`, reporting whether either mechanism succeeded
pub async fn copy_text(text: &str) -> bool {
    match write_with_clipboard_api(text).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Clipboard API failed ({}), falling back to execCommand", e);
            match write_with_selection(text) {
                Ok(copied) => copied,
                Err(e) => {
                    log::warn!("Fallback copy failed: {}", e);
                    false
                }
            }
        }
    }
}

async fn write_with_clipboard_api(text: &str) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| StashError::clipboard(JsValue::from_str("no window")))?;
    let navigator = window.navigator();

    // Missing outside secure contexts
    let available = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false);
    if !available {
        return Err(StashError::clipboard(JsValue::from_str("navigator.clipboard missing")));
    }

    JsFuture::from(navigator.clipboard().write_text(text))
        .await
        .map_err(StashError::clipboard)?;
    Ok(())
}

/// Select the text in a hidden textarea and run the copy command
///
/// The textarea is removed again whatever the command reports.
pub fn write_with_selection(text: &str) -> Result<bool> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| StashError::clipboard(JsValue::from_str("no document")))?;
    let body = document
        .body()
        .ok_or_else(|| StashError::clipboard(JsValue::from_str("no body")))?;

    let textarea: HtmlTextAreaElement = document
        .create_element("textarea")
        .map_err(StashError::clipboard)?
        .dyn_into()
        .map_err(|_| StashError::clipboard(JsValue::from_str("not a textarea")))?;
    textarea.set_value(text);
    let style = textarea.style();
    style.set_property("position", "fixed").map_err(StashError::clipboard)?;
    style.set_property("opacity", "0").map_err(StashError::clipboard)?;

    body.append_child(&textarea).map_err(StashError::clipboard)?;
    let _ = textarea.focus();
    textarea.select();
    let copied = document
        .dyn_into::<HtmlDocument>()
        .map_err(|_| StashError::clipboard(JsValue::from_str("not an HTML document")))
        .and_then(|html| html.exec_command("copy").map_err(StashError::clipboard));
    let _ = body.remove_child(&textarea);

    copied
}
