/// Delete confirmation dialog
use crate::i18n::{t, t_with};
use crate::panel::PendingDelete;
use patternfly_yew::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub pending: PendingDelete,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    let confirm_ref = use_node_ref();

    // Focus the confirm button when the dialog opens
    {
        let confirm_ref = confirm_ref.clone();
        use_effect_with((), move |_| {
            if let Some(button) = confirm_ref.cast::<HtmlElement>() {
                let _ = button.focus();
            }
            || ()
        });
    }

    // Escape cancels while the dialog is mounted
    {
        let on_cancel = props.on_cancel.clone();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn Fn(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    on_cancel.emit(());
                }
            });
            let document = web_sys::window().and_then(|w| w.document());
            if let Some(document) = &document {
                let _ = document.add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }
            move || {
                if let Some(document) = document {
                    let _ = document
                        .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
                }
            }
        });
    }

    let (title, message, detail) = match &props.pending {
        PendingDelete::Single { content, .. } => (
            t("confirmTitle", "Delete item"),
            t("confirmDelete", "Delete this item?"),
            Some(content.clone()),
        ),
        PendingDelete::Bulk { ids } => (
            t("confirmBulkTitle", "Delete selected"),
            t_with("confirmBulkDelete", "Delete $1 selected items?", &[ids.len().to_string()]),
            None,
        ),
    };

    let on_backdrop = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <div class="modal">
            <div class="modal-backdrop" onclick={on_backdrop}></div>
            <div class="modal-card" role="dialog" aria-modal="true">
                <h2 class="modal-title">{title}</h2>
                <p class="modal-message">{message}</p>
                if let Some(detail) = detail {
                    <p class="modal-item">{detail}</p>
                }
                <div class="modal-actions">
                    <Button variant={ButtonVariant::Secondary} onclick={props.on_cancel.reform(|_: MouseEvent| ())}>
                        {t("confirmCancel", "Cancel")}
                    </Button>
                    <button
                        ref={confirm_ref}
                        type="button"
                        class="pf-v5-c-button pf-m-danger"
                        onclick={props.on_confirm.reform(|_: MouseEvent| ())}
                    >
                        {t("actionDelete", "Delete")}
                    </button>
                </div>
            </div>
        </div>
    }
}
