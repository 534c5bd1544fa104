/// In-page probe tracking the last right-click target
///
/// Runs as the content script. Every `contextmenu` event (listened for in
/// the capture phase, before any page handler can swallow it) overwrites
/// the single stored context; the background pulls it on demand.
use crate::chrome;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Element, HtmlAnchorElement, HtmlImageElement, MouseEvent};

/// Context answered to a "get current page context" request
///
/// Fields are never absent: no anchor or image under the cursor leaves
/// the corresponding strings empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageContextData {
    pub page_title: String,
    pub link_text: String,
    pub link_url: String,
    pub image_alt: String,
    pub image_url: String,
}

/// What the probe reads off the nearest enclosing `<a>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorInfo {
    pub text: String,
    pub aria_label: String,
    pub title: String,
    pub href: String,
}

/// What the probe reads off the nearest enclosing `<img>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageInfo {
    pub alt: String,
    pub aria_label: String,
    pub title: String,
    pub current_src: String,
    pub src: String,
}

fn first_non_empty<'a>(candidates: impl IntoIterator<Item = &'a str>) -> String {
    candidates
        .into_iter()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Visible text, else aria-label, else title, else the resolved href
pub fn link_text(anchor: &AnchorInfo) -> String {
    first_non_empty([
        anchor.text.as_str(),
        anchor.aria_label.as_str(),
        anchor.title.as_str(),
        anchor.href.as_str(),
    ])
}

/// alt, else aria-label, else title, else empty
pub fn image_alt(image: &ImageInfo) -> String {
    first_non_empty([
        image.alt.as_str(),
        image.aria_label.as_str(),
        image.title.as_str(),
    ])
}

impl ImageInfo {
    pub fn url(&self) -> &str {
        if self.current_src.is_empty() {
            &self.src
        } else {
            &self.current_src
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageContextProbe {
    last: PageContextData,
}

impl PageContextProbe {
    pub fn new(page_title: &str) -> Self {
        PageContextProbe {
            last: PageContextData {
                page_title: page_title.to_string(),
                ..PageContextData::default()
            },
        }
    }

    /// Replace the stored context; there is no history
    pub fn record(&mut self, page_title: &str, anchor: Option<&AnchorInfo>, image: Option<&ImageInfo>) {
        self.last = PageContextData {
            page_title: page_title.to_string(),
            link_text: anchor.map(link_text).unwrap_or_default(),
            link_url: anchor.map(|a| a.href.clone()).unwrap_or_default(),
            image_alt: image.map(image_alt).unwrap_or_default(),
            image_url: image.map(|i| i.url().to_string()).unwrap_or_default(),
        };
    }

    /// The stored context with the page title refreshed
    pub fn snapshot(&self, current_title: &str) -> PageContextData {
        let page_title = if current_title.is_empty() {
            self.last.page_title.clone()
        } else {
            current_title.to_string()
        };
        PageContextData {
            page_title,
            ..self.last.clone()
        }
    }
}

// DOM glue

fn attr(element: &Element, name: &str) -> String {
    element.get_attribute(name).unwrap_or_default()
}

impl AnchorInfo {
    pub fn from_element(anchor: &HtmlAnchorElement) -> Self {
        AnchorInfo {
            text: anchor.text_content().unwrap_or_default(),
            aria_label: attr(anchor, "aria-label"),
            title: attr(anchor, "title"),
            href: anchor.href(),
        }
    }
}

impl ImageInfo {
    pub fn from_element(image: &HtmlImageElement) -> Self {
        ImageInfo {
            alt: attr(image, "alt"),
            aria_label: attr(image, "aria-label"),
            title: attr(image, "title"),
            current_src: image.current_src(),
            src: image.src(),
        }
    }
}

/// Resolve the nearest enclosing anchor and image of a click target
pub fn resolve_target(target: &Element) -> (Option<AnchorInfo>, Option<ImageInfo>) {
    let anchor = target
        .closest("a")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        .map(|a| AnchorInfo::from_element(&a));
    let image = target
        .closest("img")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        .map(|i| ImageInfo::from_element(&i));
    (anchor, image)
}

fn document_title() -> String {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.title())
        .unwrap_or_default()
}

/// Attach the `contextmenu` listener and answer context requests
pub fn install() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let probe = Rc::new(RefCell::new(PageContextProbe::new(&document.title())));

    let on_context_menu = {
        let probe = probe.clone();
        Closure::<dyn Fn(MouseEvent)>::new(move |event: MouseEvent| {
            let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            let (anchor, image) = match &target {
                Some(el) => resolve_target(el),
                None => (None, None),
            };
            probe
                .borrow_mut()
                .record(&document_title(), anchor.as_ref(), image.as_ref());
        })
    };

    let options = AddEventListenerOptions::new();
    options.set_capture(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "contextmenu",
        on_context_menu.as_ref().unchecked_ref(),
        &options,
    )?;
    on_context_menu.forget();

    let on_request = Closure::<dyn Fn() -> JsValue>::new(move || {
        let data = probe.borrow().snapshot(&document_title());
        chrome::to_js(&data).unwrap_or(JsValue::NULL)
    });
    chrome::answer_context_requests(&on_request);
    on_request.forget();

    log::debug!("Page context probe installed");
    Ok(())
}
