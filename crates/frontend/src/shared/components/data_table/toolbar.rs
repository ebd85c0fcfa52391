//! Grid toolbar: global search, column visibility menu, export buttons

use crate::shared::data_grid::ExportFormat;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance};
use wasm_bindgen::JsCast;

/// Search input with debounce and a clear button
#[component]
pub fn GlobalFilterInput(
    /// Applied filter value
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    /// Delay before `on_change` fires
    debounce_ms: u32,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search all columns...".to_string()
    } else {
        placeholder
    };

    // local input state (before debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());
    let debounce_timeout = StoredValue::new(None::<i32>);

    // grid state was reset from outside
    Effect::new(move |_| {
        if value.get().is_empty() {
            set_input_value.set(String::new());
        }
    });

    let cancel_pending = move || {
        if let (Some(window), Some(timeout_id)) = (web_sys::window(), debounce_timeout.get_value()) {
            window.clear_timeout_with_handle(timeout_id);
        }
        debounce_timeout.set_value(None);
    };

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        cancel_pending();

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            on_change.run(new_value.clone());
        }) as Box<dyn Fn()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            debounce_ms as i32,
        ) {
            Ok(timeout_id) => {
                closure.forget();
                debounce_timeout.set_value(Some(timeout_id));
            }
            Err(e) => leptos::logging::log!("setTimeout failed: {:?}", e),
        }
    };

    let clear_filter = move |_| {
        cancel_pending();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="data-table__search">
            <input
                type="text"
                class="data-table__search-input"
                class:data-table__search-input--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="data-table__search-clear" on:click=clear_filter title="Clear">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Entry of the column visibility menu
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnToggle {
    pub id: String,
    pub header: String,
    pub visible: bool,
}

#[component]
pub fn ColumnVisibilityMenu(
    #[prop(into)]
    columns: Signal<Vec<ColumnToggle>>,
    /// (column id, visible)
    on_toggle: Callback<(String, bool)>,
) -> impl IntoView {
    let open = RwSignal::new(false);

    view! {
        <div class="data-table__column-menu">
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| open.update(|o| *o = !*o)
            >
                {icon("columns")}
                " Columns "
                {icon("chevron-down")}
            </Button>
            <Show when=move || open.get()>
                <div class="data-table__column-menu-list">
                    {move || {
                        columns
                            .get()
                            .into_iter()
                            .map(|column| {
                                let id = column.id.clone();
                                view! {
                                    <label class="data-table__column-menu-item">
                                        <input
                                            type="checkbox"
                                            prop:checked=column.visible
                                            on:change=move |ev| {
                                                on_toggle.run((id.clone(), event_target_checked(&ev)))
                                            }
                                        />
                                        {column.header}
                                    </label>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn ExportButtons(
    /// Export in progress, if any
    #[prop(into)]
    busy: Signal<Option<ExportFormat>>,
    on_export: Callback<ExportFormat>,
) -> impl IntoView {
    let button = move |format: ExportFormat| {
        view! {
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || busy.get().is_some())
                on_click=move |_| on_export.run(format)
            >
                {icon("download")}
                {move || {
                    if busy.get() == Some(format) {
                        " Exporting...".to_string()
                    } else {
                        format!(" {}", format.label())
                    }
                }}
            </Button>
        }
    };

    view! {
        <div class="data-table__export">
            {button(ExportFormat::Pdf)}
            {button(ExportFormat::Xlsx)}
        </div>
    }
}
