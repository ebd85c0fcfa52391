//! Column definitions of the data grid.
//!
//! A column reads its value from a [`Row`] either through an accessor key or
//! through a `cell` renderer (formatted dates, values combined from several
//! fields). Synthetic columns use a reserved id and carry no accessor.

use contracts::shared::data_grid::{CellValue, Row};
use std::fmt;
use std::sync::Arc;

/// Row number column prepended to every grid
pub const ROW_NUMBER_COLUMN_ID: &str = "srno";
/// Selection checkbox column
pub const SELECT_COLUMN_ID: &str = "select";
/// Row actions column (buttons, links)
pub const ACTIONS_COLUMN_ID: &str = "actions";

const RESERVED_COLUMN_IDS: [&str; 3] = [ROW_NUMBER_COLUMN_ID, SELECT_COLUMN_ID, ACTIONS_COLUMN_ID];

/// Pure transform `row -> display value`
pub type CellRenderer = Arc<dyn Fn(&Row) -> CellValue + Send + Sync>;

/// How array values are written to exported files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayExport {
    /// Arrays export as their element count
    #[default]
    Count,
    /// Arrays export as `", "`-joined items
    Join,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    pub fn css_class(&self) -> &'static str {
        match self {
            Align::Left => "table__cell--left",
            Align::Right => "table__cell--right",
            Align::Center => "table__cell--center",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Column participates in the totals footer
    pub is_summable: bool,
    pub array_export: ArrayExport,
    pub exportable: bool,
}

impl Default for ColumnMeta {
    fn default() -> Self {
        Self {
            is_summable: false,
            array_export: ArrayExport::Count,
            exportable: true,
        }
    }
}

#[derive(Clone)]
pub struct ColumnDef {
    pub id: String,
    pub accessor_key: Option<String>,
    pub header: String,
    pub cell: Option<CellRenderer>,
    pub meta: ColumnMeta,
    pub enable_sorting: bool,
    pub enable_hiding: bool,
    pub enable_column_filter: bool,
    pub align: Align,
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("accessor_key", &self.accessor_key)
            .field("header", &self.header)
            .field("has_cell", &self.cell.is_some())
            .field("meta", &self.meta)
            .field("enable_sorting", &self.enable_sorting)
            .field("enable_hiding", &self.enable_hiding)
            .finish()
    }
}

impl ColumnDef {
    /// Column reading the field `key` of each row
    pub fn accessor(key: &str, header: &str) -> Self {
        Self {
            id: key.to_string(),
            accessor_key: Some(key.to_string()),
            header: header.to_string(),
            cell: None,
            meta: ColumnMeta::default(),
            enable_sorting: true,
            enable_hiding: true,
            enable_column_filter: true,
            align: Align::Left,
        }
    }

    /// Column without an accessor, rendered entirely by `cell`
    pub fn display<F>(id: &str, header: &str, cell: F) -> Self
    where
        F: Fn(&Row) -> CellValue + Send + Sync + 'static,
    {
        Self {
            accessor_key: None,
            cell: Some(Arc::new(cell)),
            ..Self::accessor(id, header)
        }
    }

    pub fn with_cell<F>(mut self, cell: F) -> Self
    where
        F: Fn(&Row) -> CellValue + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(cell));
        self
    }

    pub fn summable(mut self) -> Self {
        self.meta.is_summable = true;
        self.align = Align::Right;
        self
    }

    pub fn sortable(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    pub fn hideable(mut self, enabled: bool) -> Self {
        self.enable_hiding = enabled;
        self
    }

    pub fn filterable(mut self, enabled: bool) -> Self {
        self.enable_column_filter = enabled;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn array_export(mut self, policy: ArrayExport) -> Self {
        self.meta.array_export = policy;
        self
    }

    pub fn exportable(mut self, enabled: bool) -> Self {
        self.meta.exportable = enabled;
        self
    }

    /// The synthetic row number column. Its values are derived from the
    /// position on the current page, not from the row.
    pub fn row_number() -> Self {
        Self {
            id: ROW_NUMBER_COLUMN_ID.to_string(),
            accessor_key: None,
            header: "Sr. No.".to_string(),
            cell: None,
            meta: ColumnMeta {
                exportable: false,
                ..ColumnMeta::default()
            },
            enable_sorting: false,
            enable_hiding: false,
            enable_column_filter: false,
            align: Align::Center,
        }
    }

    pub fn is_reserved(&self) -> bool {
        RESERVED_COLUMN_IDS.contains(&self.id.as_str())
    }

    pub fn is_row_number(&self) -> bool {
        self.id == ROW_NUMBER_COLUMN_ID
    }

    /// Underlying value: the accessor field, or the rendered value for
    /// columns that only have a renderer. Used by sorting, grouping,
    /// aggregation and export.
    pub fn raw_value(&self, row: &Row) -> CellValue {
        match (&self.accessor_key, &self.cell) {
            (Some(key), _) => row.value(key),
            (None, Some(cell)) => cell(row),
            (None, None) => CellValue::Null,
        }
    }

    /// Value as displayed in the grid (after the `cell` transform)
    pub fn rendered_value(&self, row: &Row) -> CellValue {
        match &self.cell {
            Some(cell) => cell(row),
            None => self.raw_value(row),
        }
    }

    /// Rendered value as text; this is what filters match against
    pub fn display_text(&self, row: &Row) -> String {
        self.rendered_value(row).to_string()
    }

    /// Value written to exported files, with the array policy applied
    pub fn export_value(&self, row: &Row) -> CellValue {
        match self.raw_value(row) {
            CellValue::List(items) => match self.meta.array_export {
                ArrayExport::Count => CellValue::Integer(items.len() as i64),
                ArrayExport::Join => CellValue::Text(CellValue::List(items).to_string()),
            },
            other => other,
        }
    }
}
