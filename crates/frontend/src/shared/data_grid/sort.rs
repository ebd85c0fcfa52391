//! Row sorting.
//!
//! Numeric values (numbers and numeric text alike) compare by value and
//! come before non-numeric text, which compares case-insensitively with
//! embedded digit runs compared by value ("Batch 9" < "Batch 10"). Blank
//! values always sort last, whatever the direction. The sort is stable, so
//! equal keys keep their manual order.

use super::column::ColumnDef;
use contracts::shared::data_grid::{CellValue, ColumnSort, Row, SortDirection};
use std::cmp::Ordering;

fn is_blank(value: &CellValue) -> bool {
    match value {
        CellValue::Null => true,
        CellValue::Text(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        CellValue::List(items) => Some(items.len() as f64),
        other => other.as_number(),
    }
}

/// Compares two non-blank values in ascending order. Total: numbers first
/// by value, then text in natural order.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => natural_cmp(&a.to_string(), &b.to_string()),
    }
}

/// Case-insensitive comparison where runs of ASCII digits compare as numbers
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let mut run_a = String::new();
                while let Some(c) = left.peek().copied().filter(|c| c.is_ascii_digit()) {
                    run_a.push(c);
                    left.next();
                }
                let mut run_b = String::new();
                while let Some(c) = right.peek().copied().filter(|c| c.is_ascii_digit()) {
                    run_b.push(c);
                    right.next();
                }
                let trimmed_a = run_a.trim_start_matches('0');
                let trimmed_b = run_b.trim_start_matches('0');
                let ord = trimmed_a
                    .len()
                    .cmp(&trimmed_b.len())
                    .then_with(|| trimmed_a.cmp(trimmed_b))
                    .then_with(|| run_a.len().cmp(&run_b.len()));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                left.next();
                right.next();
            }
        }
    }
}

/// Sorts `rows` in place by the sorting state. Sort entries naming unknown
/// columns are skipped.
pub fn sort_rows(rows: &mut Vec<&Row>, sorting: &[ColumnSort], columns: &[ColumnDef]) {
    let keys: Vec<(&ColumnDef, SortDirection)> = sorting
        .iter()
        .filter_map(|sort| {
            columns
                .iter()
                .find(|c| c.id == sort.column_id)
                .map(|column| (column, sort.direction))
        })
        .collect();

    if keys.is_empty() {
        return;
    }

    let mut decorated: Vec<(Vec<CellValue>, &Row)> = rows
        .iter()
        .map(|row| {
            let values = keys.iter().map(|(column, _)| column.raw_value(row)).collect();
            (values, *row)
        })
        .collect();

    decorated.sort_by(|(a, _), (b, _)| {
        for (i, (_, direction)) in keys.iter().enumerate() {
            let ord = match (is_blank(&a[i]), is_blank(&b[i])) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ord = compare_values(&a[i], &b[i]);
                    match direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                }
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    *rows = decorated.into_iter().map(|(_, row)| row).collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(column: &str, direction: SortDirection) -> Vec<ColumnSort> {
        vec![ColumnSort {
            column_id: column.to_string(),
            direction,
        }]
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("Batch 9", "Batch 10"), Ordering::Less);
        assert_eq!(natural_cmp("mag-2", "MAG-02"), Ordering::Less);
        assert_eq!(natural_cmp("abc", "ABC"), Ordering::Equal);
        assert_eq!(natural_cmp("a", "ab"), Ordering::Less);
    }

    #[test]
    fn test_numeric_sort_both_directions() {
        let columns = vec![ColumnDef::accessor("qty", "Qty")];
        let data = vec![
            Row::new(1).with("qty", 100),
            Row::new(2).with("qty", 200.5),
            Row::new(3).with("qty", 50),
        ];
        let mut rows: Vec<&Row> = data.iter().collect();

        sort_rows(&mut rows, &sort("qty", SortDirection::Asc), &columns);
        assert_eq!(ids(&rows), vec!["3", "1", "2"]);

        sort_rows(&mut rows, &sort("qty", SortDirection::Desc), &columns);
        assert_eq!(ids(&rows), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_numeric_text_sorts_by_value() {
        let columns = vec![ColumnDef::accessor("qty", "Qty")];
        let data = vec![
            Row::new(1).with("qty", 12.25),
            Row::new(2).with("qty", "12.5"),
            Row::new(3).with("qty", 13),
            Row::new(4).with("qty", "abc"),
            Row::new(5).with("qty", " 9 "),
        ];
        let mut rows: Vec<&Row> = data.iter().collect();

        sort_rows(&mut rows, &sort("qty", SortDirection::Asc), &columns);
        assert_eq!(ids(&rows), vec!["5", "1", "2", "3", "4"]);

        sort_rows(&mut rows, &sort("qty", SortDirection::Desc), &columns);
        assert_eq!(ids(&rows), vec!["4", "3", "2", "1", "5"]);
    }

    #[test]
    fn test_compare_values_is_transitive() {
        let values = [
            CellValue::Number(1.25),
            CellValue::Number(1.5),
            CellValue::from("1.7"),
            CellValue::from("1.10"),
            CellValue::Integer(2),
            CellValue::from("Batch 10"),
            CellValue::from("batch 9"),
            CellValue::Bool(true),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(compare_values(a, b), compare_values(b, a).reverse());
                for c in &values {
                    if compare_values(a, b) != Ordering::Greater
                        && compare_values(b, c) != Ordering::Greater
                    {
                        assert_ne!(compare_values(a, c), Ordering::Greater, "{a} {b} {c}");
                    }
                }
            }
        }
        assert_eq!(compare_values(&CellValue::from("1.7"), &CellValue::Number(1.25)), Ordering::Greater);
    }

    #[test]
    fn test_blanks_sort_last() {
        let columns = vec![ColumnDef::accessor("truck_no", "Truck")];
        let data = vec![
            Row::new(1),
            Row::new(2).with("truck_no", "MH-12"),
            Row::new(3).with("truck_no", "GJ-01"),
        ];
        let mut rows: Vec<&Row> = data.iter().collect();

        sort_rows(&mut rows, &sort("truck_no", SortDirection::Asc), &columns);
        assert_eq!(ids(&rows), vec!["3", "2", "1"]);

        sort_rows(&mut rows, &sort("truck_no", SortDirection::Desc), &columns);
        assert_eq!(ids(&rows), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let columns = vec![ColumnDef::accessor("plant", "Plant")];
        let data = vec![
            Row::new(1).with("plant", "Nagpur"),
            Row::new(2).with("plant", "Hyderabad"),
            Row::new(3).with("plant", "Nagpur"),
            Row::new(4).with("plant", "Hyderabad"),
        ];
        let mut rows: Vec<&Row> = data.iter().collect();

        sort_rows(&mut rows, &sort("plant", SortDirection::Asc), &columns);
        assert_eq!(ids(&rows), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_multi_column_sort() {
        let columns = vec![
            ColumnDef::accessor("plant", "Plant"),
            ColumnDef::accessor("qty", "Qty"),
        ];
        let data = vec![
            Row::new(1).with("plant", "B").with("qty", 1),
            Row::new(2).with("plant", "A").with("qty", 1),
            Row::new(3).with("plant", "B").with("qty", 9),
        ];
        let mut rows: Vec<&Row> = data.iter().collect();
        let sorting = vec![
            ColumnSort {
                column_id: "plant".to_string(),
                direction: SortDirection::Asc,
            },
            ColumnSort {
                column_id: "qty".to_string(),
                direction: SortDirection::Desc,
            },
        ];

        sort_rows(&mut rows, &sorting, &columns);
        assert_eq!(ids(&rows), vec!["2", "3", "1"]);
    }
}
