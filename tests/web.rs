//! Browser tests, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use chrono::{DateTime, Utc};
use side_stash::capture::{CaptureService, MenuAction, MenuClick, TabRef};
use side_stash::clipboard::{copy_text, write_with_selection};
use side_stash::item::ItemType;
use side_stash::probe::{PageContextData, PageContextProbe, resolve_target};
use side_stash::render::{ItemRow, Timestamp};
use side_stash::store::{ItemStore, MemoryArea};
use side_stash::ui::item_card::{ItemList, ItemListProps, localize_timestamp};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::Element;
use yew::Callback;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("div").unwrap();
    host.set_inner_html(html);
    document.body().unwrap().append_child(&host).unwrap();
    host
}

/// Let pending renders and timers run
async fn settle() {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 20)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn body_has_textarea() -> bool {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().query_selector("textarea").unwrap().is_some()
}

fn create_test_row(id: &str, content: &str) -> ItemRow {
    ItemRow {
        id: id.to_string(),
        selected: false,
        item_type: ItemType::Text,
        timestamp: Some(Timestamp::JustNow),
        content: content.to_string(),
        preview: None,
        source_title: "Example".to_string(),
        source_link: Some("https://a.test/".to_string()),
    }
}

#[wasm_bindgen_test]
fn test_resolve_target_inside_anchor_with_aria_label() {
    let host = mount(r#"<a href="https://docs.test/" aria-label="Docs"><span id="icon"></span></a>"#);
    let target = host.query_selector("#icon").unwrap().unwrap();

    let (anchor, image) = resolve_target(&target);
    let mut probe = PageContextProbe::new("Page");
    probe.record("Page", anchor.as_ref(), image.as_ref());
    let data = probe.snapshot("Page");

    assert_eq!(data.link_text, "Docs");
    assert_eq!(data.link_url, "https://docs.test/");
    assert_eq!(data.image_url, "");
}

#[wasm_bindgen_test]
fn test_resolve_target_image_without_anchor() {
    let host = mount(r#"<img id="pic" alt="" title="A cat" src="https://img.test/cat.png">"#);
    let target = host.query_selector("#pic").unwrap().unwrap();

    let (anchor, image) = resolve_target(&target);

    assert!(anchor.is_none());
    let image = image.unwrap();
    assert_eq!(side_stash::probe::image_alt(&image), "A cat");
    assert_eq!(image.src, "https://img.test/cat.png");
}

#[wasm_bindgen_test]
fn test_resolve_target_plain_text() {
    let host = mount(r#"<p id="para">just words</p>"#);
    let target = host.query_selector("#para").unwrap().unwrap();

    let (anchor, image) = resolve_target(&target);

    assert!(anchor.is_none());
    assert!(image.is_none());
}

#[wasm_bindgen_test]
async fn test_capture_text_on_empty_store() {
    let service = CaptureService::new(ItemStore::new(MemoryArea::new()));
    let click = MenuClick {
        selection_text: "hello".to_string(),
        page_url: "https://a.test/".to_string(),
        ..MenuClick::default()
    };
    let context = PageContextData {
        page_title: "Example".to_string(),
        ..PageContextData::default()
    };

    let item = service
        .capture(MenuAction::SaveText, &click, &TabRef::default(), &context)
        .await
        .unwrap()
        .unwrap();
    let list = service.store().load_all().await.unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list.items[0], item);
    assert_eq!(item.content, "hello");
    assert_eq!(item.page_title, "Example");
    assert_eq!(item.page_url, "https://a.test/");
}

#[wasm_bindgen_test]
fn test_selection_copy_removes_textarea() {
    let result = write_with_selection("copied words");

    assert!(result.is_ok());
    assert!(!body_has_textarea());
}

#[wasm_bindgen_test]
async fn test_copy_text_reports_without_throwing() {
    // Headless runs usually deny the clipboard API, exercising the fallback
    let _copied: bool = copy_text("copied words").await;

    assert!(!body_has_textarea());
}

#[wasm_bindgen_test]
fn test_localize_relative_timestamps() {
    assert_eq!(localize_timestamp(Timestamp::JustNow), "just now");
    assert_eq!(localize_timestamp(Timestamp::Minutes(5)), "5 min ago");
    assert_eq!(localize_timestamp(Timestamp::Hours(3)), "3 h ago");
}

#[wasm_bindgen_test]
fn test_localize_absolute_timestamp_uses_locale() {
    let at: DateTime<Utc> = "2024-06-01T12:00:00Z".parse().unwrap();

    let text = localize_timestamp(Timestamp::Absolute(at));

    assert!(text.contains("2024"));
    assert!(!text.contains("T12:00"));
}

#[wasm_bindgen_test]
async fn test_item_list_renders_one_card_per_row() {
    let host = mount("");
    let props = ItemListProps {
        rows: vec![create_test_row("a", "first"), create_test_row("b", "second")],
        on_toggle_select: Callback::noop(),
        on_copy: Callback::noop(),
        on_delete: Callback::noop(),
    };

    yew::Renderer::<ItemList>::with_root_and_props(host.clone(), props).render();
    settle().await;

    let list = host.query_selector("ul.list").unwrap().unwrap();
    assert_eq!(list.child_element_count(), 2);
    let content = host.query_selector(".content").unwrap().unwrap();
    assert_eq!(content.text_content().as_deref(), Some("first"));
    let time = host.query_selector(".time").unwrap().unwrap();
    assert_eq!(time.text_content().as_deref(), Some("just now"));
}
