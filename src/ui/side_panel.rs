/// Side panel UI for Side Stash
use crate::chrome::{self, ChromeLocalArea};
use crate::clipboard::copy_text;
use crate::config::{STATUS_CLEAR_MS, STORAGE_KEY};
use crate::i18n::{t, t_with};
use crate::item::TypeFilter;
use crate::panel::{PanelAction, PanelState};
use crate::render::project_rows;
use crate::store::{ItemStore, parse_stored};
use crate::ui::confirm_modal::ConfirmModal;
use crate::ui::item_card::ItemList;
use crate::ui::toolbar::Toolbar;
use patternfly_yew::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

type Dispatcher = UseReducerDispatcher<PanelState>;

#[function_component(SidePanel)]
pub fn side_panel() -> Html {
    let state = use_reducer(PanelState::default);

    // Initial load, then follow every write to the stored list
    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            let load = dispatcher.clone();
            spawn_local(async move {
                let store = ItemStore::new(ChromeLocalArea);
                let items = match store.load_all().await {
                    Ok(list) => list.items,
                    Err(e) => {
                        log::error!("Failed to load items: {}", e);
                        Vec::new()
                    }
                };
                load.dispatch(PanelAction::Snapshot(items));
            });

            let on_change = Closure::<dyn Fn(JsValue)>::new(move |value: JsValue| {
                let list = chrome::from_js(value).map(parse_stored).unwrap_or_default();
                dispatcher.dispatch(PanelAction::Snapshot(list.items));
            });
            chrome::watch_storage(STORAGE_KEY, &on_change);
            on_change.forget();
            || ()
        });
    }

    let dispatch = |make: fn() -> PanelAction| {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(make()))
    };

    let on_filter = {
        let dispatcher = state.dispatcher();
        Callback::from(move |filter: TypeFilter| dispatcher.dispatch(PanelAction::SetFilter(filter)))
    };
    let on_query = {
        let dispatcher = state.dispatcher();
        Callback::from(move |text: String| dispatcher.dispatch(PanelAction::SetQuery(text)))
    };
    let on_toggle_select = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: String| dispatcher.dispatch(PanelAction::ToggleSelect(id)))
    };
    let on_delete_item = {
        let dispatcher = state.dispatcher();
        Callback::from(move |id: String| dispatcher.dispatch(PanelAction::RequestDelete(id)))
    };

    let on_copy_item = {
        let state = state.clone();
        Callback::from(move |id: String| match state.item_copy_text(&id) {
            Some(text) => copy_and_report(state.dispatcher(), text, t("copySingleSuccess", "Copied.")),
            None => announce(&state.dispatcher(), t("copyFailed", "Copy failed.")),
        })
    };

    let on_copy_selected = {
        let state = state.clone();
        Callback::from(move |_: ()| copy_many(state.dispatcher(), state.selected_copy_text()))
    };
    let on_copy_filtered = {
        let state = state.clone();
        Callback::from(move |_: ()| copy_many(state.dispatcher(), state.filtered_copy_text()))
    };

    let on_confirm = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let dispatcher = state.dispatcher();
            let Some(targets) = state.delete_targets() else {
                dispatcher.dispatch(PanelAction::CancelDelete);
                return;
            };
            spawn_local(async move {
                let store = ItemStore::new(ChromeLocalArea);
                match store.remove_ids(&targets).await {
                    Ok(removed) => log::debug!("Deleted {} items", removed),
                    Err(e) => log::error!("Failed to delete items: {}", e),
                }
                dispatcher.dispatch(PanelAction::DeleteCommitted);
            });
        })
    };

    let filtered = state.filtered();
    let rows = project_rows(&filtered, &state.selected, chrono::Utc::now());

    html! {
        <div class="panel">
            <header class="panel-header">
                <div>
                    <h1 class="panel-title">{t("panelTitle", "Side Stash")}</h1>
                    <p class="panel-subtitle">{t("panelSubtitle", "Quickly stash text and links")}</p>
                </div>
                <span class="count">
                    {rows.len()}{" "}{t("countLabel", "items")}
                </span>
            </header>

            <Toolbar
                filter={state.filter}
                query={state.query_input.clone()}
                select_all={state.select_all_state()}
                selected_count={state.selected.len()}
                on_filter={on_filter}
                on_query={on_query}
                on_clear_query={dispatch(|| PanelAction::ClearQuery)}
                on_select_all={dispatch(|| PanelAction::SelectAllToggle)}
                on_copy_selected={on_copy_selected}
                on_copy_filtered={on_copy_filtered}
                on_delete_selected={dispatch(|| PanelAction::RequestBulkDelete)}
            />

            if let Some(status) = &state.status {
                <p class="copy-status" role="status">{status}</p>
            }

            if !state.loaded {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            } else if rows.is_empty() {
                <div class="empty">
                    <p class="empty-title">{t("emptyTitle", "Nothing saved yet")}</p>
                    <p class="empty-hint">{t("emptyHint", "Right-click on a page to save text or links.")}</p>
                </div>
            } else {
                <ItemList
                    rows={rows}
                    on_toggle_select={on_toggle_select}
                    on_copy={on_copy_item}
                    on_delete={on_delete_item}
                />
            }

            if let Some(pending) = &state.pending_delete {
                <ConfirmModal
                    pending={pending.clone()}
                    on_confirm={on_confirm}
                    on_cancel={dispatch(|| PanelAction::CancelDelete)}
                />
            }
        </div>
    }
}

// Helper functions

/// Show a status line that clears itself unless replaced meanwhile
fn announce(dispatcher: &Dispatcher, message: String) {
    dispatcher.dispatch(PanelAction::ShowStatus(message.clone()));

    let dispatcher = dispatcher.clone();
    let clear = Closure::once_into_js(move || dispatcher.dispatch(PanelAction::ClearStatus(message)));
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(clear.unchecked_ref(), STATUS_CLEAR_MS);
    }
}

fn copy_and_report(dispatcher: Dispatcher, text: String, success: String) {
    spawn_local(async move {
        let message = if copy_text(&text).await {
            success
        } else {
            t("copyFailed", "Copy failed.")
        };
        announce(&dispatcher, message);
    });
}

fn copy_many(dispatcher: Dispatcher, copy: Option<(String, usize)>) {
    match copy {
        Some((text, count)) => {
            let success = t_with("copySuccess", "Copied $1 items.", &[count.to_string()]);
            copy_and_report(dispatcher, text, success);
        }
        None => announce(&dispatcher, t("copyEmpty", "No items to copy.")),
    }
}
