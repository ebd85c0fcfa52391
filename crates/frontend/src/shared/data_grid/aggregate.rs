//! Footer aggregation strategies.
//!
//! A grid without a strategy renders no footer. [`SumAggregator`] gives the
//! classic totals row: one sum per summable column over every filtered row.

use super::column::ColumnDef;
use contracts::shared::data_grid::{CellValue, Row};

pub trait FooterAggregator: Send + Sync {
    /// Text of the first footer cell
    fn label(&self) -> &str {
        "Total"
    }

    /// Footer value of `column` over `rows`, `None` leaves the cell empty
    fn aggregate(&self, column: &ColumnDef, rows: &[&Row]) -> Option<CellValue>;
}

/// Sums every column flagged `is_summable`
#[derive(Debug, Clone, Copy, Default)]
pub struct SumAggregator;

/// Numeric value of a cell for summing; anything unparseable counts as 0
pub fn parse_number(value: &CellValue) -> f64 {
    value.as_number().unwrap_or(0.0)
}

impl FooterAggregator for SumAggregator {
    fn aggregate(&self, column: &ColumnDef, rows: &[&Row]) -> Option<CellValue> {
        if !column.meta.is_summable {
            return None;
        }
        let total: f64 = rows
            .iter()
            .map(|row| parse_number(&column.raw_value(row)))
            .sum();
        Some(CellValue::Number(total))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FooterCell {
    Label(String),
    Value(CellValue),
    Empty,
}

/// Builds the footer over `columns` (in render order). The first cell always
/// carries the aggregator label.
pub fn footer_row(aggregator: &dyn FooterAggregator, columns: &[&ColumnDef], rows: &[&Row]) -> Vec<FooterCell> {
    summary_cells(aggregator, aggregator.label(), columns, rows)
}

/// Same layout as the footer with a custom leading label (group subtotals)
pub fn summary_cells(
    aggregator: &dyn FooterAggregator,
    label: &str,
    columns: &[&ColumnDef],
    rows: &[&Row],
) -> Vec<FooterCell> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            if i == 0 {
                return FooterCell::Label(label.to_string());
            }
            match aggregator.aggregate(column, rows) {
                Some(value) => FooterCell::Value(value),
                None => FooterCell::Empty,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_skips_unparseable_values() {
        let column = ColumnDef::accessor("qty", "Qty").summable();
        let data = vec![
            Row::new(1).with("qty", 10),
            Row::new(2).with("qty", "20"),
            Row::new(3).with("qty", "abc"),
            Row::new(4).with("qty", 5),
        ];
        let rows: Vec<&Row> = data.iter().collect();

        assert_eq!(
            SumAggregator.aggregate(&column, &rows),
            Some(CellValue::Number(35.0))
        );
    }

    #[test]
    fn test_non_summable_column_is_empty() {
        let column = ColumnDef::accessor("brand", "Brand");
        let data = vec![Row::new(1).with("brand", "Superdyne")];
        let rows: Vec<&Row> = data.iter().collect();
        assert_eq!(SumAggregator.aggregate(&column, &rows), None);
    }

    #[test]
    fn test_footer_row_layout() {
        let srno = ColumnDef::row_number();
        let brand = ColumnDef::accessor("brand", "Brand");
        let qty = ColumnDef::accessor("qty", "Qty").summable();
        let data = vec![
            Row::new(1).with("brand", "A").with("qty", 100),
            Row::new(2).with("brand", "B").with("qty", 200),
            Row::new(3).with("brand", "C").with("qty", 50),
        ];
        let rows: Vec<&Row> = data.iter().collect();

        let footer = footer_row(&SumAggregator, &[&srno, &brand, &qty], &rows);
        assert_eq!(
            footer,
            vec![
                FooterCell::Label("Total".to_string()),
                FooterCell::Empty,
                FooterCell::Value(CellValue::Number(350.0)),
            ]
        );
    }

    #[test]
    fn test_empty_rows_sum_to_zero() {
        let column = ColumnDef::accessor("qty", "Qty").summable();
        assert_eq!(
            SumAggregator.aggregate(&column, &[]),
            Some(CellValue::Number(0.0))
        );
    }
}
