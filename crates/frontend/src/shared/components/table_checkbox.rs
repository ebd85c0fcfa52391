use crate::shared::data_grid::CheckState;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Row selection checkbox
///
/// Renders a `<td>`; the click does not bubble to the row.
///
/// # BEM классы
/// - `.table__cell--checkbox` - td обёртка
/// - `.table__checkbox` - input элемент
#[component]
pub fn TableCheckbox(
    /// Current state
    checked: bool,
    on_change: Callback<bool>,
    #[prop(optional)]
    disabled: bool,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </td>
    }
}

/// "Select page" checkbox of the header row.
///
/// Shows three states; the indeterminate one has no HTML attribute and is set
/// on the DOM node from an effect.
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)]
    state: Signal<CheckState>,
    /// `true` = select every row of the page, `false` = clear them
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        let indeterminate = matches!(state.get(), CheckState::Indeterminate);
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <th class="table__header-cell table__cell--checkbox">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(state.get(), CheckState::Checked)
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </th>
    }
}
