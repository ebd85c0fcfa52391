use crate::shared::icons::icon;
use leptos::prelude::*;

/// Page navigation of a grid
///
/// Bounds come from the grid model; the model also ignores out-of-range
/// moves.
#[component]
pub fn PaginationControls(
    /// "Page X of Y"
    #[prop(into)]
    page_label: Signal<String>,

    #[prop(into)]
    can_previous: Signal<bool>,

    #[prop(into)]
    can_next: Signal<bool>,

    /// Number of rows after filtering
    #[prop(into)]
    total_count: Signal<usize>,

    #[prop(into)]
    selected_count: Signal<usize>,

    #[prop(into)]
    page_size: Signal<usize>,

    on_first: Callback<()>,
    on_previous: Callback<()>,
    on_next: Callback<()>,
    on_last: Callback<()>,
    on_page_size_change: Callback<usize>,

    page_size_options: Vec<usize>,
) -> impl IntoView {
    let at_start = move || !can_previous.get();
    let at_end = move || !can_next.get();

    view! {
        <div class="pagination-controls">
            <span class="pagination-selection">
                {move || format!("{} of {} row(s) selected.", selected_count.get(), total_count.get())}
            </span>
            <label class="pagination-page-size">
                "Rows per page"
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                            on_page_size_change.run(size);
                        }
                    }
                    prop:value=move || page_size.get().to_string()
                >
                    {page_size_options
                        .iter()
                        .map(|&size| {
                            view! {
                                <option value=size.to_string() selected=move || page_size.get() == size>
                                    {size.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <span class="pagination-info">
                {move || page_label.get()}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_first.run(())
                disabled=at_start
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_previous.run(())
                disabled=at_start
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_next.run(())
                disabled=at_end
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_last.run(())
                disabled=at_end
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
        </div>
    }
}
