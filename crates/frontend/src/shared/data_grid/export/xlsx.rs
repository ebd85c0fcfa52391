//! Styled single-sheet workbook

use super::ExportTable;
use contracts::shared::data_grid::CellValue;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};

const HEADER_FILL: u32 = 0x4472C4;
const HEADER_FONT: u32 = 0xFFFFFF;
const EVEN_ROW_FILL: u32 = 0xFFFFFF;
const ODD_ROW_FILL: u32 = 0xF2F2F2;
const MIN_COLUMN_WIDTH: usize = 12;

/// Column width in characters: header length plus padding, at least 12
pub fn column_width(header: &str) -> usize {
    (header.chars().count() + 2).max(MIN_COLUMN_WIDTH)
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(HEADER_FONT))
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin)
}

fn body_format(fill: u32) -> Format {
    Format::new()
        .set_background_color(Color::RGB(fill))
        .set_border(FormatBorder::Thin)
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: &Format,
) -> Result<(), XlsxError> {
    match value {
        CellValue::Null => {
            sheet.write_blank(row, col, format)?;
        }
        CellValue::Bool(b) => {
            sheet.write_boolean_with_format(row, col, *b, format)?;
        }
        CellValue::Integer(i) => {
            sheet.write_number_with_format(row, col, *i as f64, format)?;
        }
        CellValue::Number(n) if n.is_finite() => {
            sheet.write_number_with_format(row, col, *n, format)?;
        }
        other => {
            sheet.write_string_with_format(row, col, other.to_string(), format)?;
        }
    }
    Ok(())
}

/// Writes `table` into a workbook with one sheet named `sheet_name` and
/// returns the file bytes
pub fn write_xlsx(table: &ExportTable, sheet_name: &str) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = header_format();
    let even = body_format(EVEN_ROW_FILL);
    let odd = body_format(ODD_ROW_FILL);

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, title) in table.headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, title, &header)?;
        sheet.set_column_width(col, column_width(title) as f64)?;
    }

    for (index, values) in table.rows.iter().enumerate() {
        let row = index as u32 + 1;
        let format = if index % 2 == 0 { &even } else { &odd };
        for (col, value) in values.iter().enumerate() {
            write_cell(sheet, row, col as u16, value, format)?;
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use std::io::{Cursor, Read};

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut part).unwrap();
        part
    }

    fn read_back(bytes: Vec<u8>, sheet: &str) -> calamine::Range<Data> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        workbook.worksheet_range(sheet).unwrap()
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width("QTY"), 12);
        assert_eq!(column_width("MAGAZINE_LICENSE"), 18);
    }

    #[test]
    fn test_sheet_layout() {
        let table = ExportTable {
            headers: vec!["BATCH_NO".to_string(), "QTY".to_string(), "L1_BARCODES".to_string()],
            rows: vec![
                vec![CellValue::from("B-1"), CellValue::Number(12.5), CellValue::Integer(3)],
                vec![CellValue::from("B-2"), CellValue::Null, CellValue::Integer(0)],
            ],
        };

        let range = read_back(write_xlsx(&table, "Sheet1").unwrap(), "Sheet1");
        assert_eq!(range.height(), 3);
        assert_eq!(range.get((0, 0)), Some(&Data::String("BATCH_NO".to_string())));
        assert_eq!(range.get((1, 1)), Some(&Data::Float(12.5)));
        assert_eq!(range.get((1, 2)), Some(&Data::Float(3.0)));
        assert_eq!(range.get((2, 0)), Some(&Data::String("B-2".to_string())));
    }

    #[test]
    fn test_header_and_banding_styles() {
        let table = ExportTable {
            headers: vec!["QTY".to_string(), "L1_BARCODES".to_string()],
            rows: vec![
                vec![CellValue::Integer(1), CellValue::Integer(2)],
                vec![CellValue::Integer(3), CellValue::Integer(4)],
            ],
        };
        let bytes = write_xlsx(&table, "Sheet1").unwrap();

        let styles = read_part(&bytes, "xl/styles.xml");
        assert!(styles.contains(r#"rgb="FF4472C4""#));
        assert!(styles.contains(r#"rgb="FFF2F2F2""#));
        assert!(styles.contains(r#"rgb="FFFFFFFF""#));
        assert!(styles.contains("<b/>"));
        assert!(styles.contains(r#"style="thin""#));

        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        let col = |min: &str| {
            sheet
                .split("<col ")
                .skip(1)
                .find(|c| c.contains(&format!(r#"min="{}""#, min)))
                .map(|c| c.to_string())
                .unwrap()
        };
        // "QTY" gets the minimum, "L1_BARCODES" its length plus padding
        assert!(col("1").contains(r#"width="12"#));
        assert!(col("2").contains(r#"width="13"#));
        assert!(col("2").contains(r#"customWidth="1""#));
    }

    #[test]
    fn test_header_only_when_empty() {
        let table = ExportTable {
            headers: vec!["QTY".to_string()],
            rows: Vec::new(),
        };
        let range = read_back(write_xlsx(&table, "RE2").unwrap(), "RE2");
        assert_eq!(range.height(), 1);
        assert_eq!(range.get((0, 0)), Some(&Data::String("QTY".to_string())));
    }

    #[test]
    fn test_invalid_sheet_name_is_an_error() {
        let table = ExportTable::default();
        assert!(write_xlsx(&table, "bad[name]").is_err());
    }
}
