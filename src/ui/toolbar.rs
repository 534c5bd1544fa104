/// Filter controls and bulk actions above the list
use crate::i18n::t;
use crate::item::TypeFilter;
use crate::panel::SelectAllState;
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToolbarProps {
    pub filter: TypeFilter,
    pub query: String,
    pub select_all: SelectAllState,
    pub selected_count: usize,
    pub on_filter: Callback<TypeFilter>,
    pub on_query: Callback<String>,
    pub on_clear_query: Callback<()>,
    pub on_select_all: Callback<()>,
    pub on_copy_selected: Callback<()>,
    pub on_copy_filtered: Callback<()>,
    pub on_delete_selected: Callback<()>,
}

#[function_component(Toolbar)]
pub fn toolbar(props: &ToolbarProps) -> Html {
    let select_all_ref = use_node_ref();

    // `indeterminate` has no attribute form, set it on the element
    {
        let select_all_ref = select_all_ref.clone();
        use_effect_with(props.select_all, move |state| {
            if let Some(input) = select_all_ref.cast::<HtmlInputElement>() {
                input.set_indeterminate(*state == SelectAllState::Partial);
            }
            || ()
        });
    }

    let on_input = {
        let on_query = props.on_query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_query.emit(input.value());
            }
        })
    };

    let nothing_selected = props.selected_count == 0;
    let select_all_label = match props.select_all {
        SelectAllState::All => t("clearSelection", "Clear selection"),
        _ => t("selectAll", "Select all"),
    };

    html! {
        <div class="toolbar">
            <div class="filter-buttons">
                {for TypeFilter::ALL.iter().map(|filter| {
                    let (key, fallback) = filter.label();
                    let filter = *filter;
                    let variant = if filter == props.filter {
                        ButtonVariant::Primary
                    } else {
                        ButtonVariant::Secondary
                    };
                    html! {
                        <Button {variant} onclick={props.on_filter.reform(move |_: MouseEvent| filter)}>
                            {t(key, fallback)}
                        </Button>
                    }
                })}
            </div>

            <div class="filter-row">
                <input
                    type="text"
                    class="filter-input"
                    placeholder={t("filterPlaceholder", "Filter by URL or keyword")}
                    value={props.query.clone()}
                    oninput={on_input}
                />
                <Button
                    variant={ButtonVariant::Link}
                    disabled={props.query.is_empty()}
                    onclick={props.on_clear_query.reform(|_: MouseEvent| ())}
                >
                    {t("filterClear", "Clear")}
                </Button>
            </div>

            <div class="bulk-row">
                <label class="select-all">
                    <input
                        ref={select_all_ref}
                        type="checkbox"
                        checked={props.select_all == SelectAllState::All}
                        disabled={props.select_all == SelectAllState::Disabled}
                        onchange={props.on_select_all.reform(|_: Event| ())}
                    />
                    {select_all_label}
                </label>
                <Button
                    variant={ButtonVariant::Secondary}
                    disabled={nothing_selected}
                    onclick={props.on_copy_selected.reform(|_: MouseEvent| ())}
                >
                    {t("copySelected", "Copy selected")}
                </Button>
                <Button
                    variant={ButtonVariant::Danger}
                    disabled={nothing_selected}
                    onclick={props.on_delete_selected.reform(|_: MouseEvent| ())}
                >
                    {t("deleteSelected", "Delete selected")}
                </Button>
                <Button
                    variant={ButtonVariant::Secondary}
                    onclick={props.on_copy_filtered.reform(|_: MouseEvent| ())}
                >
                    {t("copyFiltered", "Copy filtered")}
                </Button>
            </div>
        </div>
    }
}
