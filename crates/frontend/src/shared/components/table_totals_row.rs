use crate::shared::data_grid::format::format_total_cell;
use crate::shared::data_grid::FooterCell;
use leptos::prelude::*;

/// Totals row of a grid footer
///
/// `leading` empty cells cover the UI-only columns (drag handle, selection)
/// in front of the data columns.
///
/// # BEM классы
/// - `.table__totals-row` - строка итогов
/// - `.table__totals-label` - ячейка с подписью
#[component]
pub fn TableTotalsRow(
    cells: Vec<FooterCell>,
    /// Alignment class per cell, same order as `cells`
    aligns: Vec<&'static str>,
    #[prop(optional)]
    leading: usize,
    /// Дополнительные CSS классы
    #[prop(optional)]
    class: &'static str,
) -> impl IntoView {
    let row_class = if class.is_empty() {
        "table__totals-row".to_string()
    } else {
        format!("table__totals-row {}", class)
    };

    view! {
        <tr class=row_class>
            {(0..leading).map(|_| view! { <td class="table__cell"></td> }).collect_view()}
            {cells
                .into_iter()
                .enumerate()
                .map(|(i, cell)| {
                    let align = aligns.get(i).copied().unwrap_or("");
                    match cell {
                        FooterCell::Label(text) => view! {
                            <td class="table__cell table__totals-label">
                                <strong>{text}</strong>
                            </td>
                        }
                        .into_any(),
                        FooterCell::Value(value) => view! {
                            <td class=format!("table__cell {}", align)>
                                <strong>{format_total_cell(&value)}</strong>
                            </td>
                        }
                        .into_any(),
                        FooterCell::Empty => view! { <td class="table__cell"></td> }.into_any(),
                    }
                })
                .collect_view()}
        </tr>
    }
}
