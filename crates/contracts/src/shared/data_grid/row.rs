use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::cell::CellValue;

/// Stable row identifier used as the selection and reorder key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(i) => write!(f, "{}", i),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId::Int(value)
    }
}

impl From<i32> for RowId {
    fn from(value: i32) -> Self {
        RowId::Int(value as i64)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Text(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        RowId::Text(value)
    }
}

/// One record of a grid dataset.
///
/// Serialized as a flat JSON object: `{"id": 1, "qty": 100, ...}`.
/// The `id` field is mandatory; everything else is opaque to the grid and
/// only read through column definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    #[serde(flatten)]
    pub values: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, key: &str, value: impl Into<CellValue>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Value of a field by name; `"id"` resolves to the row id and missing
    /// fields resolve to `Null`.
    pub fn value(&self, key: &str) -> CellValue {
        if key == "id" {
            return match &self.id {
                RowId::Int(i) => CellValue::Integer(*i),
                RowId::Text(s) => CellValue::Text(s.clone()),
            };
        }
        self.values.get(key).cloned().unwrap_or(CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_flat_json() {
        let row: Row = serde_json::from_str(
            r#"{"id": 7, "brand": "Superdyne", "qty": 12.5, "l1_barcodes": ["A", "B"]}"#,
        )
        .unwrap();

        assert_eq!(row.id, RowId::Int(7));
        assert_eq!(row.value("brand"), CellValue::from("Superdyne"));
        assert_eq!(row.value("qty"), CellValue::Number(12.5));
        assert_eq!(row.value("l1_barcodes").list_len(), Some(2));
        assert_eq!(row.value("id"), CellValue::Integer(7));
        assert_eq!(row.value("missing"), CellValue::Null);
    }

    #[test]
    fn test_text_id() {
        let row: Row = serde_json::from_str(r#"{"id": "B-2024-001"}"#).unwrap();
        assert_eq!(row.id, RowId::from("B-2024-001"));
        assert_eq!(row.id.to_string(), "B-2024-001");
    }

    #[test]
    fn test_row_without_id_is_rejected() {
        let result: Result<Row, _> = serde_json::from_str(r#"{"qty": 1}"#);
        assert!(result.is_err());
    }
}
