//! Header row cells: sortable titles and per-column filter inputs

use crate::shared::data_grid::HeaderView;
use contracts::shared::data_grid::SortDirection;
use leptos::ev::MouseEvent;
use leptos::prelude::*;

/// Sort indicator shown after the column title
pub fn sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => " ⇅",
    }
}

pub fn sort_class(direction: Option<SortDirection>) -> &'static str {
    if direction.is_some() {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Column title. Click cycles the sort, shift+click adds the column to the
/// existing sorts when multi-sort is enabled.
#[component]
pub fn GridHeaderCell(
    column: HeaderView,
    #[prop(into)]
    sort: Signal<Option<SortDirection>>,
    /// (column id, shift pressed)
    on_sort: Callback<(String, bool)>,
) -> impl IntoView {
    let class = format!("table__header-cell {}", column.align.css_class());

    if !column.sortable {
        return view! {
            <th class=class>{column.header}</th>
        }
        .into_any();
    }

    let column_id = column.id.clone();
    let handle_click = move |ev: MouseEvent| {
        on_sort.run((column_id.clone(), ev.shift_key()));
    };

    view! {
        <th class=class>
            <div class="table__sortable-header" on:click=handle_click>
                {column.header}
                <span class=move || sort_class(sort.get())>
                    {move || sort_indicator(sort.get())}
                </span>
            </div>
        </th>
    }
    .into_any()
}

/// Filter input under a column title
#[component]
pub fn ColumnFilterCell(
    column: HeaderView,
    #[prop(into)]
    value: Signal<String>,
    /// (column id, filter text)
    on_change: Callback<(String, String)>,
) -> impl IntoView {
    if !column.filterable {
        return view! { <th class="table__header-cell table__filter-cell"></th> }.into_any();
    }

    let column_id = column.id.clone();
    let placeholder = format!("Filter {}...", column.header.to_lowercase());

    view! {
        <th class="table__header-cell table__filter-cell">
            <input
                type="text"
                class="table__filter-input"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_change.run((column_id.clone(), event_target_value(&ev)))
            />
        </th>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(sort_indicator(Some(SortDirection::Asc)), " ▲");
        assert_eq!(sort_indicator(Some(SortDirection::Desc)), " ▼");
        assert_eq!(sort_indicator(None), " ⇅");
    }
}
