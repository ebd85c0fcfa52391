//! Export of the filtered grid to downloadable files.
//!
//! [`GridModel::export_table`](super::GridModel::export_table) produces an
//! [`ExportTable`]; the writers below turn it into bytes.

pub mod download;
pub mod pdf;
pub mod xlsx;

use contracts::shared::data_grid::{CellValue, ExportOptions};
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Header row plus one row of cell values per exported record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("download failed: {0}")]
    Download(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Xlsx,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Configured file name of this format
    pub fn default_file_name<'a>(&self, options: &'a ExportOptions) -> &'a str {
        match self {
            ExportFormat::Pdf => &options.pdf_file_name,
            ExportFormat::Xlsx => &options.xlsx_file_name,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Xlsx => "Excel",
        }
    }
}

/// Serializes `table` into the bytes of `format`
pub fn export_bytes(
    table: &ExportTable,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Pdf => Ok(pdf::write_pdf(table)),
        ExportFormat::Xlsx => Ok(xlsx::write_xlsx(table, &options.sheet_name)?),
    }
}

/// Serializes `table` and hands it to the browser as a download. A missing
/// or blank `file_name` falls back to the configured name.
pub fn export_and_download(
    table: &ExportTable,
    format: ExportFormat,
    options: &ExportOptions,
    file_name: Option<&str>,
) -> Result<(), ExportError> {
    let bytes = export_bytes(table, format, options)?;
    let file_name = file_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format.default_file_name(options));
    download::download_bytes(&bytes, file_name, format.mime_type()).map_err(ExportError::Download)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names() {
        let options = ExportOptions::default();
        assert_eq!(ExportFormat::Pdf.default_file_name(&options), "table_data.pdf");
        assert_eq!(ExportFormat::Xlsx.default_file_name(&options), "table_data.xlsx");
    }

    #[test]
    fn test_export_bytes_dispatch() {
        let table = ExportTable {
            headers: vec!["QTY".to_string()],
            rows: vec![vec![CellValue::Integer(1)]],
        };
        let options = ExportOptions::default();

        let pdf = export_bytes(&table, ExportFormat::Pdf, &options).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let xlsx = export_bytes(&table, ExportFormat::Xlsx, &options).unwrap();
        // xlsx is a zip container
        assert!(xlsx.starts_with(b"PK"));
    }
}
