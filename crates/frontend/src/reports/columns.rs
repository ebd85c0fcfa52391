//! Column sets of the RE report forms

use crate::shared::data_grid::format::date_renderer;
use crate::shared::data_grid::{Align, ArrayExport, ColumnDef};
use contracts::reports::ReportKind;
use contracts::shared::data_grid::{CellValue, Row};

fn date_column(key: &'static str, header: &str) -> ColumnDef {
    ColumnDef::accessor(key, header).with_cell(date_renderer(key))
}

/// L1 case barcodes; shown joined, exported as a count
fn barcodes_column() -> ColumnDef {
    ColumnDef::accessor("l1_barcodes", "L1 Barcodes")
        .sortable(false)
        .array_export(ArrayExport::Count)
}

/// Number of L1 cases derived from the barcode list
fn case_count_column() -> ColumnDef {
    ColumnDef::display("l1_count", "Cases", |row: &Row| match row.value("l1_barcodes") {
        CellValue::List(items) => CellValue::Integer(items.len() as i64),
        _ => CellValue::Integer(0),
    })
    .summable()
}

fn qty_column(key: &str, header: &str) -> ColumnDef {
    ColumnDef::accessor(key, header).summable()
}

fn text_column(key: &str, header: &str) -> ColumnDef {
    ColumnDef::accessor(key, header)
}

pub fn report_columns(kind: ReportKind) -> Vec<ColumnDef> {
    match kind {
        ReportKind::Re2 => vec![
            date_column("mfg_date", "Mfg Date"),
            text_column("plant_code", "Plant"),
            text_column("brand_name", "Brand"),
            text_column("product_size", "Size"),
            text_column("batch_code", "Batch"),
            barcodes_column(),
            case_count_column(),
            qty_column("net_qty_kg", "Net Qty (kg)"),
        ],
        ReportKind::Re3 => vec![
            date_column("dispatch_date", "Dispatch Date"),
            text_column("indent_no", "Indent No"),
            text_column("customer_name", "Customer"),
            text_column("license_no", "Licence No"),
            text_column("truck_no", "Truck No"),
            text_column("brand_name", "Brand"),
            text_column("product_size", "Size"),
            barcodes_column(),
            case_count_column(),
            qty_column("qty_kg", "Qty (kg)"),
        ],
        ReportKind::Re4 => vec![
            text_column("magazine_code", "Magazine"),
            text_column("brand_name", "Brand"),
            text_column("product_size", "Size"),
            qty_column("opening_kg", "Opening (kg)"),
            qty_column("received_kg", "Received (kg)"),
            qty_column("issued_kg", "Issued (kg)"),
            qty_column("closing_kg", "Closing (kg)"),
        ],
        ReportKind::Re7 => vec![
            date_column("transfer_date", "Transfer Date"),
            text_column("from_magazine", "From"),
            text_column("to_magazine", "To"),
            text_column("brand_name", "Brand"),
            text_column("product_size", "Size"),
            barcodes_column(),
            case_count_column(),
            qty_column("qty_kg", "Qty (kg)"),
        ],
        ReportKind::Re11 => vec![
            text_column("month", "Month").align(Align::Center),
            text_column("brand_name", "Brand"),
            text_column("product_size", "Size"),
            qty_column("produced_kg", "Produced (kg)"),
            qty_column("dispatched_kg", "Dispatched (kg)"),
            qty_column("closing_kg", "Closing (kg)"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_grid::aggregate::{footer_row, FooterCell, SumAggregator};

    #[test]
    fn test_every_report_has_summable_columns() {
        for kind in ReportKind::all() {
            let columns = report_columns(*kind);
            assert!(
                columns.iter().any(|c| c.meta.is_summable),
                "{} has no totals",
                kind.code()
            );
        }
    }

    #[test]
    fn test_case_count_and_barcode_export() {
        let columns = report_columns(ReportKind::Re3);
        let row = Row::new(1)
            .with("dispatch_date", "2024-04-02")
            .with("l1_barcodes", vec!["L1-01", "L1-02"])
            .with("qty_kg", 50);

        let date = columns.iter().find(|c| c.id == "dispatch_date").unwrap();
        assert_eq!(date.display_text(&row), "02.04.2024");

        let barcodes = columns.iter().find(|c| c.id == "l1_barcodes").unwrap();
        assert_eq!(barcodes.display_text(&row), "L1-01, L1-02");
        assert_eq!(barcodes.export_value(&row), CellValue::Integer(2));

        let count = columns.iter().find(|c| c.id == "l1_count").unwrap();
        let rows = vec![&row, &row];
        let footer = footer_row(&SumAggregator, &[date, count], &rows);
        assert_eq!(footer[0], FooterCell::Label("Total".to_string()));
        assert_eq!(footer[1], FooterCell::Value(CellValue::Number(4.0)));
    }
}
