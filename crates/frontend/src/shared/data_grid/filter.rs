//! Text filters: case-insensitive substring match on rendered cell values

use super::column::ColumnDef;
use contracts::shared::data_grid::Row;
use std::collections::BTreeMap;

/// Prepared filter needle. Empty (after trimming) input means "no filter".
pub fn normalize_query(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Does the rendered value of `column` contain `needle` (already lowercased)?
pub fn cell_matches(column: &ColumnDef, row: &Row, needle: &str) -> bool {
    column.display_text(row).to_lowercase().contains(needle)
}

/// Global filter: any of the scanned columns matches
pub fn row_matches_global(columns: &[&ColumnDef], row: &Row, needle: &str) -> bool {
    columns.iter().any(|column| cell_matches(column, row, needle))
}

/// Applies the global filter, then the per-column filters (logical AND).
///
/// `scan_columns` are the columns the global filter looks at; per-column
/// filters are resolved against `all_columns` by id. Filters on unknown
/// columns are ignored.
pub fn filter_rows<'a>(
    rows: &'a [Row],
    scan_columns: &[&ColumnDef],
    all_columns: &[ColumnDef],
    global_filter: &str,
    column_filters: &BTreeMap<String, String>,
) -> Vec<&'a Row> {
    let global = normalize_query(global_filter);
    let per_column: Vec<(&ColumnDef, String)> = column_filters
        .iter()
        .filter_map(|(column_id, value)| {
            let column = all_columns.iter().find(|c| &c.id == column_id)?;
            Some((column, normalize_query(value)?))
        })
        .collect();

    rows.iter()
        .filter(|row| match &global {
            Some(needle) => row_matches_global(scan_columns, row, needle),
            None => true,
        })
        .filter(|row| {
            per_column
                .iter()
                .all(|(column, needle)| cell_matches(column, row, needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::data_grid::CellValue;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::accessor("brand", "Brand"),
            ColumnDef::accessor("qty", "Qty"),
            ColumnDef::accessor("mfg_date", "Date").with_cell(|row| {
                CellValue::Text(row.value("mfg_date").to_string().replace('-', "."))
            }),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new(1).with("brand", "Superdyne").with("qty", 100).with("mfg_date", "2024-01-05"),
            Row::new(2).with("brand", "Powergel").with("qty", 200).with("mfg_date", "2024-02-10"),
            Row::new(3).with("brand", "SUPERPRIME").with("qty", 50).with("mfg_date", "2024-03-15"),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_global_filter_case_insensitive() {
        let columns = columns();
        let scan: Vec<&ColumnDef> = columns.iter().collect();
        let data = rows();

        let result = filter_rows(&data, &scan, &columns, "super", &BTreeMap::new());
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn test_global_filter_matches_rendered_value() {
        let columns = columns();
        let scan: Vec<&ColumnDef> = columns.iter().collect();
        let data = rows();

        let rendered = filter_rows(&data, &scan, &columns, "2024.02", &BTreeMap::new());
        assert_eq!(ids(&rendered), vec!["2"]);

        let raw = filter_rows(&data, &scan, &columns, "2024-02", &BTreeMap::new());
        assert!(raw.is_empty());
    }

    #[test]
    fn test_column_filter_and_global_compose() {
        let columns = columns();
        let scan: Vec<&ColumnDef> = columns.iter().collect();
        let data = rows();
        let mut filters = BTreeMap::new();
        filters.insert("qty".to_string(), "0".to_string());

        let result = filter_rows(&data, &scan, &columns, "super", &filters);
        assert_eq!(ids(&result), vec!["1", "3"]);

        filters.insert("brand".to_string(), "prime".to_string());
        let result = filter_rows(&data, &scan, &columns, "super", &filters);
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_blank_filter_is_ignored() {
        let columns = columns();
        let scan: Vec<&ColumnDef> = columns.iter().collect();
        let data = rows();
        let mut filters = BTreeMap::new();
        filters.insert("unknown".to_string(), "x".to_string());

        let result = filter_rows(&data, &scan, &columns, "   ", &filters);
        assert_eq!(result.len(), 3);
    }
}
