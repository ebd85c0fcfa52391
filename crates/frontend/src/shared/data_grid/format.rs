//! Display formatting for grid cells and totals

use contracts::shared::data_grid::{CellValue, Row};

/// Formats a number with a space as thousands separator
///
/// ```text
/// format_number_with_decimals(1234.567, 2) == "1 234.57"
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Footer total: integral sums without a fraction, others with two decimals
pub fn format_total(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number_with_decimals(value, 0)
    } else {
        format_number_with_decimals(value, 2)
    }
}

/// Footer cell text
pub fn format_total_cell(value: &CellValue) -> String {
    match value.as_number() {
        Some(n) => format_total(n),
        None => value.to_string(),
    }
}

/// ISO date (`2024-03-15` or `2024-03-15T14:02:26Z`) to `15.03.2024`.
/// Anything else is returned unchanged.
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// `cell` renderer showing the date field `key` as `DD.MM.YYYY`
pub fn date_renderer(key: &'static str) -> impl Fn(&Row) -> CellValue + Send + Sync + 'static {
    move |row| match row.value(key) {
        CellValue::Text(s) => CellValue::Text(format_date(&s)),
        other => other,
    }
}
