use serde::{Deserialize, Serialize};

/// Which text ends up in the header row of exported files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportHeaderSource {
    /// Uppercased column id (`QTY_KG`)
    #[default]
    ColumnId,
    /// Column header label as shown in the grid
    Label,
}

/// Export settings of a grid instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub pdf_file_name: String,
    pub xlsx_file_name: String,
    pub sheet_name: String,
    pub header_source: ExportHeaderSource,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pdf_file_name: "table_data.pdf".to_string(),
            xlsx_file_name: "table_data.xlsx".to_string(),
            sheet_name: "Sheet1".to_string(),
            header_source: ExportHeaderSource::ColumnId,
        }
    }
}

/// Grid configuration supplied by the caller.
///
/// Every field has a default, so callers may pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Initial page size
    pub page_size: usize,
    /// Choices offered by the page size selector
    pub page_size_options: Vec<usize>,
    /// Reset selection, filters, sorting and pagination when the caller
    /// passes a new row set to a mounted grid
    pub reset_state_on_data_change: bool,
    /// Keep previous sorts when another column is toggled with shift
    pub multi_sort: bool,
    pub enable_row_reorder: bool,
    pub enable_row_selection: bool,
    /// Debounce of the global search input
    pub global_filter_debounce_ms: u32,
    pub export: ExportOptions,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![10, 20, 30, 40, 50],
            reset_state_on_data_change: true,
            multi_sort: false,
            enable_row_reorder: true,
            enable_row_selection: true,
            global_filter_debounce_ms: 300,
            export: ExportOptions::default(),
        }
    }
}
