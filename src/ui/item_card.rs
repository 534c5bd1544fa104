/// Rows of the stash list
use crate::i18n::{t, t_with};
use crate::render::{ItemRow, Timestamp, badge_label};
use chrono::{DateTime, Utc};
use patternfly_yew::prelude::*;
use wasm_bindgen::JsValue;
use yew::prelude::*;

/// Catalog text for relative times, the browser locale for absolute ones
pub fn localize_timestamp(timestamp: Timestamp) -> String {
    match timestamp {
        Timestamp::JustNow => t("timeJustNow", "just now"),
        Timestamp::Minutes(n) => t_with("timeMinutesAgo", "$1 min ago", &[n.to_string()]),
        Timestamp::Hours(n) => t_with("timeHoursAgo", "$1 h ago", &[n.to_string()]),
        Timestamp::Absolute(at) => locale_date_time(at),
    }
}

fn locale_date_time(at: DateTime<Utc>) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(at.timestamp_millis() as f64));
    let locale = web_sys::window()
        .and_then(|window| window.navigator().language())
        .filter(|language| !language.is_empty())
        .unwrap_or_else(|| "en-US".to_string());

    let options = js_sys::Object::new();
    for (key, value) in [
        ("year", "numeric"),
        ("month", "short"),
        ("day", "numeric"),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
    ] {
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value));
    }
    date.to_locale_string(&locale, &options).into()
}

#[derive(Properties, PartialEq)]
pub struct ItemCardProps {
    pub row: ItemRow,
    pub on_toggle_select: Callback<String>,
    pub on_copy: Callback<String>,
    pub on_delete: Callback<String>,
}

#[function_component(ItemCard)]
pub fn item_card(props: &ItemCardProps) -> Html {
    let row = &props.row;
    let (badge_key, badge_fallback) = badge_label(row.item_type);
    let timestamp = row.timestamp.map(localize_timestamp).unwrap_or_default();

    let id_callback = |callback: &Callback<String>| {
        let id = row.id.clone();
        callback.reform(move |_: MouseEvent| id.clone())
    };
    let on_toggle = {
        let id = row.id.clone();
        props.on_toggle_select.reform(move |_: Event| id.clone())
    };

    html! {
        <li class="item">
            <div class="item-header">
                <div class="item-meta">
                    <input
                        type="checkbox"
                        class="item-checkbox"
                        checked={row.selected}
                        onchange={on_toggle}
                    />
                    <span class="badge">{t(badge_key, badge_fallback)}</span>
                    <span class="time">{timestamp}</span>
                </div>
                <div class="item-actions">
                    <Button variant={ButtonVariant::Plain} onclick={id_callback(&props.on_copy)}>
                        {t("actionCopy", "Copy")}
                    </Button>
                    <Button variant={ButtonVariant::Plain} onclick={id_callback(&props.on_delete)}>
                        {t("actionDelete", "Delete")}
                    </Button>
                </div>
            </div>

            if let Some(preview) = &row.preview {
                <img class="preview" src={preview.src.clone()} alt={preview.alt.clone()} loading="lazy" />
            }

            <div class="content">{&row.content}</div>

            <div class="source">
                <span class="source-title">{&row.source_title}</span>
                if let Some(link) = &row.source_link {
                    <a href={link.clone()} target="_blank" rel="noreferrer">{link}</a>
                }
            </div>
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct ItemListProps {
    pub rows: Vec<ItemRow>,
    pub on_toggle_select: Callback<String>,
    pub on_copy: Callback<String>,
    pub on_delete: Callback<String>,
}

#[function_component(ItemList)]
pub fn item_list(props: &ItemListProps) -> Html {
    html! {
        <ul class="list">
            {for props.rows.iter().map(|row| {
                let key = row.id.clone();
                html! {
                    <ItemCard
                        key={key}
                        row={row.clone()}
                        on_toggle_select={props.on_toggle_select.clone()}
                        on_copy={props.on_copy.clone()}
                        on_delete={props.on_delete.clone()}
                    />
                }
            })}
        </ul>
    }
}
