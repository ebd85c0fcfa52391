//! Data grid components.
//!
//! `DataTable` and `SummableDataTable` share one renderer over a
//! [`GridModel`] held in an `RwSignal`; every user action is a single
//! `grid.update(..)` and the page is re-derived through a `Memo`.
//!
//! # BEM классы
//! - `.data-table` - обёртка
//! - `.data-table__toolbar` - поиск, колонки, экспорт
//! - `.table__group-row` - заголовок группы
//! - `.data-table__row--drop-before` / `--drop-after` - цель перетаскивания

pub mod drag_handle;
pub mod header_cell;
pub mod toolbar;

use self::drag_handle::{DragHandleCell, DragState};
use self::header_cell::{ColumnFilterCell, GridHeaderCell};
use self::toolbar::{ColumnToggle, ColumnVisibilityMenu, ExportButtons, GlobalFilterInput};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table_checkbox::{TableCheckbox, TableHeaderCheckbox};
use crate::shared::components::table_totals_row::TableTotalsRow;
use crate::shared::data_grid::export::export_and_download;
use crate::shared::data_grid::{
    ColumnDef, DropPosition, ExportFormat, GridModel, GroupHeaderView, PageItem, RowView,
    SumAggregator,
};
use contracts::shared::data_grid::{GridOptions, Row, RowId};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

/// Grid without a footer
#[component]
pub fn DataTable(
    /// Row set; a new value replaces the grid's copy
    #[prop(into)]
    rows: Signal<Vec<Row>>,
    columns: Vec<ColumnDef>,
    #[prop(optional)]
    options: Option<GridOptions>,
    /// Initial grouping (column ids, outermost first)
    #[prop(optional)]
    group_by: Vec<String>,
    #[prop(optional)]
    on_selection_change: Option<Callback<Vec<RowId>>>,
    /// Export file name without extension; the configured names otherwise
    #[prop(optional, into)]
    file_name: Option<Signal<String>>,
) -> impl IntoView {
    let mut model = GridModel::new(rows.get_untracked(), columns, options.unwrap_or_default());
    model.set_grouping(group_by);
    grid_view(model, rows, on_selection_change, file_name)
}

/// Grid with a "Total" footer summing the summable columns over every
/// filtered row
#[component]
pub fn SummableDataTable(
    #[prop(into)]
    rows: Signal<Vec<Row>>,
    columns: Vec<ColumnDef>,
    #[prop(optional)]
    options: Option<GridOptions>,
    #[prop(optional)]
    group_by: Vec<String>,
    #[prop(optional)]
    on_selection_change: Option<Callback<Vec<RowId>>>,
    #[prop(optional, into)]
    file_name: Option<Signal<String>>,
) -> impl IntoView {
    let mut model = GridModel::new(rows.get_untracked(), columns, options.unwrap_or_default())
        .with_footer(Arc::new(SumAggregator));
    model.set_grouping(group_by);
    grid_view(model, rows, on_selection_change, file_name)
}

fn grid_view(
    model: GridModel,
    rows: Signal<Vec<Row>>,
    on_selection_change: Option<Callback<Vec<RowId>>>,
    file_name: Option<Signal<String>>,
) -> impl IntoView {
    let options = model.options().clone();
    let reorder = options.enable_row_reorder;
    let selectable = options.enable_row_selection;
    let leading = usize::from(reorder) + usize::from(selectable);

    let grid = RwSignal::new(model);
    let drag = RwSignal::new(DragState::default());
    let exporting = RwSignal::new(None::<ExportFormat>);

    // the first run only subscribes, the model already holds these rows
    Effect::new(move |subscribed: Option<bool>| {
        let next = rows.get();
        if subscribed.is_some() {
            log!("Data grid: {} new rows", next.len());
            grid.update(|g| g.set_rows(next));
        }
        true
    });

    if let Some(callback) = on_selection_change {
        let selection = Memo::new(move |_| grid.with(|g| g.selected_ids()));
        Effect::new(move |prev: Option<()>| {
            let ids = selection.get();
            if prev.is_some() {
                callback.run(ids);
            }
        });
    }

    let page = Memo::new(move |_| grid.with(|g| g.page_view()));

    let on_sort = Callback::new(move |(column_id, additive): (String, bool)| {
        grid.update(|g| {
            if additive {
                g.toggle_sort_multi(&column_id);
            } else {
                g.toggle_sort(&column_id);
            }
        });
    });
    let on_column_filter = Callback::new(move |(column_id, value): (String, String)| {
        grid.update(|g| {
            g.set_column_filter(&column_id, &value);
        });
    });
    let on_toggle_column = Callback::new(move |(column_id, visible): (String, bool)| {
        grid.update(|g| {
            g.toggle_column_visibility(&column_id, visible);
        });
    });

    let resolve_row = Callback::new(move |key: String| grid.with_untracked(|g| g.row_id_by_key(&key)));
    let on_drop = Callback::new(move |(from, to, position): (RowId, RowId, DropPosition)| {
        grid.update(|g| {
            g.reorder_row(&from, &to, position);
        });
    });
    let on_move_by = Callback::new(move |(id, delta): (RowId, isize)| {
        grid.update(|g| {
            g.move_row_by(&id, delta);
        });
    });
    let on_select = Callback::new(move |(id, selected): (RowId, bool)| {
        grid.update(|g| {
            g.toggle_row_selected(&id, selected);
        });
    });

    let on_export = Callback::new(move |format: ExportFormat| {
        if exporting.get_untracked().is_some() {
            return;
        }
        exporting.set(Some(format));
        let file_name = file_name
            .map(|stem| stem.get_untracked())
            .filter(|stem| !stem.trim().is_empty())
            .map(|stem| format!("{}.{}", stem, format.extension()));

        spawn_local(async move {
            // let the busy button render before serializing
            gloo_timers::future::TimeoutFuture::new(0).await;
            let result = grid.with_untracked(|g| {
                let table = g.export_table();
                log!("Exporting {} rows as {}", table.rows.len(), format.label());
                export_and_download(&table, format, &g.options().export, file_name.as_deref())
            });
            if let Err(e) = result {
                log!("Export failed: {}", e);
            }
            exporting.set(None);
        });
    });

    let column_toggles = Signal::derive(move || {
        grid.with(|g| {
            g.hideable_columns()
                .into_iter()
                .map(|(column, visible)| ColumnToggle {
                    id: column.id.clone(),
                    header: column.header.clone(),
                    visible,
                })
                .collect::<Vec<_>>()
        })
    });

    let render_row = move |row: RowView, aligns: &[&'static str]| {
        let class_id = row.id.clone();
        let selected = row.selected;
        let row_class = move || {
            let mut class = String::from("table__row");
            if selected {
                class.push_str(" table__row--selected");
            }
            let drag_class = drag.with(|d| d.row_class(&class_id));
            if !drag_class.is_empty() {
                class.push(' ');
                class.push_str(drag_class);
            }
            class
        };
        let id_for_select = row.id.clone();
        let cells = row
            .cells
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let align = aligns.get(i).copied().unwrap_or("");
                view! { <td class=format!("table__cell {}", align)>{text}</td> }
            })
            .collect_view();

        view! {
            <tr class=row_class data-row-id=row.key>
                {reorder.then(|| view! {
                    <DragHandleCell
                        row_id=row.id.clone()
                        drag=drag
                        resolve=resolve_row
                        on_drop=on_drop
                        on_move_by=on_move_by
                    />
                })}
                {selectable.then(|| view! {
                    <TableCheckbox
                        checked=selected
                        on_change=Callback::new(move |checked: bool| {
                            on_select.run((id_for_select.clone(), checked))
                        })
                    />
                })}
                {cells}
            </tr>
        }
        .into_any()
    };

    let render_group = move |group: GroupHeaderView, aligns: Vec<&'static str>| {
        view! {
            <TableTotalsRow
                cells=group.cells
                aligns=aligns
                leading=leading
                class="table__group-row"
            />
        }
        .into_any()
    };

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                <GlobalFilterInput
                    value=Signal::derive(move || grid.with(|g| g.global_filter().to_string()))
                    on_change=Callback::new(move |text: String| {
                        grid.update(|g| g.set_global_filter(&text))
                    })
                    debounce_ms=options.global_filter_debounce_ms
                />
                <div class="data-table__toolbar-actions">
                    <ColumnVisibilityMenu columns=column_toggles on_toggle=on_toggle_column />
                    <ExportButtons busy=exporting on_export=on_export />
                </div>
            </div>

            <div class="table-wrapper">
                <table class="table__data data-table__table">
                    <thead class="table__head">
                        <tr>
                            {reorder.then(|| view! {
                                <th class="table__header-cell data-table__drag-cell"></th>
                            })}
                            {selectable.then(|| view! {
                                <TableHeaderCheckbox
                                    state=Signal::derive(move || page.with(|p| p.page_selection))
                                    on_change=Callback::new(move |checked: bool| {
                                        grid.update(|g| g.toggle_page_rows_selected(checked))
                                    })
                                />
                            })}
                            <For
                                each=move || page.with(|p| p.columns.clone())
                                key=|column| column.id.clone()
                                children=move |column| {
                                    let column_id = column.id.clone();
                                    view! {
                                        <GridHeaderCell
                                            column=column
                                            sort=Signal::derive(move || {
                                                grid.with(|g| g.sort_direction(&column_id))
                                            })
                                            on_sort=on_sort
                                        />
                                    }
                                }
                            />
                        </tr>
                        <Show when=move || page.with(|p| p.columns.iter().any(|c| c.filterable))>
                            <tr class="table__filter-row">
                                {reorder.then(|| view! { <th class="table__header-cell"></th> })}
                                {selectable.then(|| view! { <th class="table__header-cell"></th> })}
                                <For
                                    each=move || page.with(|p| p.columns.clone())
                                    key=|column| column.id.clone()
                                    children=move |column| {
                                        let column_id = column.id.clone();
                                        view! {
                                            <ColumnFilterCell
                                                column=column
                                                value=Signal::derive(move || {
                                                    grid.with(|g| g.column_filter(&column_id).to_string())
                                                })
                                                on_change=on_column_filter
                                            />
                                        }
                                    }
                                />
                            </tr>
                        </Show>
                    </thead>

                    <tbody>
                        {move || {
                            let view = page.get();
                            if view.is_empty() {
                                let colspan = view.columns.len() + leading;
                                return view! {
                                    <tr class="table__row table__row--empty">
                                        <td class="table__cell table__cell--empty" colspan=colspan.to_string()>
                                            "No results."
                                        </td>
                                    </tr>
                                }
                                .into_any();
                            }
                            let aligns: Vec<&'static str> =
                                view.columns.iter().map(|c| c.align.css_class()).collect();
                            view.items
                                .into_iter()
                                .map(|item| match item {
                                    PageItem::Group(group) => render_group(group, aligns.clone()),
                                    PageItem::Row(row) => render_row(row, &aligns),
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>

                    {move || {
                        page.with(|p| {
                            p.footer.clone().map(|cells| {
                                let aligns: Vec<&'static str> =
                                    p.columns.iter().map(|c| c.align.css_class()).collect();
                                view! {
                                    <tfoot>
                                        <TableTotalsRow cells=cells aligns=aligns leading=leading />
                                    </tfoot>
                                }
                            })
                        })
                    }}
                </table>
            </div>

            <PaginationControls
                page_label=Signal::derive(move || page.with(|p| p.page_label()))
                can_previous=Signal::derive(move || page.with(|p| p.can_previous))
                can_next=Signal::derive(move || page.with(|p| p.can_next))
                total_count=Signal::derive(move || page.with(|p| p.filtered_count))
                selected_count=Signal::derive(move || page.with(|p| p.selected_count))
                page_size=Signal::derive(move || page.with(|p| p.page_size))
                on_first=Callback::new(move |_: ()| {
                    grid.update(|g| {
                        g.go_to_first_page();
                    })
                })
                on_previous=Callback::new(move |_: ()| {
                    grid.update(|g| {
                        g.previous_page();
                    })
                })
                on_next=Callback::new(move |_: ()| {
                    grid.update(|g| {
                        g.next_page();
                    })
                })
                on_last=Callback::new(move |_: ()| {
                    grid.update(|g| {
                        g.go_to_last_page();
                    })
                })
                on_page_size_change=Callback::new(move |size: usize| {
                    grid.update(|g| g.set_page_size(size))
                })
                page_size_options=options.page_size_options.clone()
            />
        </div>
    }
}
