use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single grid cell.
///
/// Rows arrive from the API as plain JSON objects, so the variants are
/// deserialized untagged: `null`, booleans, integers, floats, strings and
/// arrays of any of those.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing or null value
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// Array value (e.g. list of L1 case barcodes)
    List(Vec<CellValue>),
}

impl CellValue {
    /// Strict numeric coercion.
    ///
    /// Numbers pass through, numeric text is parsed after trimming, anything
    /// else (including non-finite floats) yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Number of elements for list values, `None` for scalars.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            CellValue::List(items) => Some(items.len()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Text(s) => f.write_str(s),
            CellValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(value as i64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(items: Vec<T>) -> Self {
        CellValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Number(350.0).to_string(), "350");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Integer(-7).to_string(), "-7");
        assert_eq!(
            CellValue::from(vec!["L1-001", "L1-002"]).to_string(),
            "L1-001, L1-002"
        );
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Integer(10).as_number(), Some(10.0));
        assert_eq!(CellValue::from(" 20 ").as_number(), Some(20.0));
        assert_eq!(CellValue::from("abc").as_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_number(), None);
        assert_eq!(CellValue::Bool(true).as_number(), None);
        assert_eq!(CellValue::Null.as_number(), None);
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "x", ["a", 1]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Integer(3),
                CellValue::Number(2.5),
                CellValue::from("x"),
                CellValue::List(vec![CellValue::from("a"), CellValue::Integer(1)]),
            ]
        );
    }
}
