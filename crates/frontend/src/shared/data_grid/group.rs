use super::column::ColumnDef;
use contracts::shared::data_grid::Row;
use std::collections::HashMap;

/// Rows reordered so that every group is contiguous, plus the group path of
/// each row (one key per grouping column).
#[derive(Debug, Clone)]
pub struct GroupedRows<'a> {
    pub rows: Vec<&'a Row>,
    pub paths: Vec<Vec<String>>,
}

impl<'a> GroupedRows<'a> {
    /// Ungrouped pass-through
    pub fn flat(rows: Vec<&'a Row>) -> Self {
        let paths = vec![Vec::new(); rows.len()];
        Self { rows, paths }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose path starts with `prefix`
    pub fn members(&self, prefix: &[String]) -> Vec<&'a Row> {
        self.rows
            .iter()
            .zip(&self.paths)
            .filter(|(_, path)| path.starts_with(prefix))
            .map(|(row, _)| *row)
            .collect()
    }
}

/// Groups rows by the given columns, nested in column order.
///
/// Groups keep the order in which their first row appears in the input, so
/// an active sort decides the group order as well as the order inside each
/// group.
pub fn group_rows<'a>(rows: Vec<&'a Row>, columns: &[&ColumnDef]) -> GroupedRows<'a> {
    if columns.is_empty() {
        return GroupedRows::flat(rows);
    }

    let mut result = GroupedRows {
        rows: Vec::with_capacity(rows.len()),
        paths: Vec::with_capacity(rows.len()),
    };
    build_recursive(rows, columns, &mut Vec::new(), &mut result);
    result
}

fn build_recursive<'a>(
    rows: Vec<&'a Row>,
    columns: &[&ColumnDef],
    path: &mut Vec<String>,
    out: &mut GroupedRows<'a>,
) {
    let Some((column, rest)) = columns.split_first() else {
        for row in rows {
            out.rows.push(row);
            out.paths.push(path.clone());
        }
        return;
    };

    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<&'a Row>> = HashMap::new();
    for row in rows {
        let key = column.raw_value(row).to_string();
        buckets
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(row);
    }

    for key in order {
        let bucket = buckets.remove(&key).unwrap_or_default();
        path.push(key);
        build_recursive(bucket, rest, path, out);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Vec<Row> {
        vec![
            Row::new(1).with("plant", "Nagpur").with("brand", "Superdyne"),
            Row::new(2).with("plant", "Hyderabad").with("brand", "Powergel"),
            Row::new(3).with("plant", "Nagpur").with("brand", "Powergel"),
            Row::new(4).with("plant", "Nagpur").with("brand", "Superdyne"),
            Row::new(5).with("plant", "Hyderabad").with("brand", "Powergel"),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_single_level_keeps_first_appearance_order() {
        let data = data();
        let plant = ColumnDef::accessor("plant", "Plant");
        let grouped = group_rows(data.iter().collect(), &[&plant]);

        assert_eq!(ids(&grouped.rows), vec!["1", "3", "4", "2", "5"]);
        assert_eq!(grouped.paths[0], vec!["Nagpur".to_string()]);
        assert_eq!(grouped.paths[3], vec!["Hyderabad".to_string()]);
        assert_eq!(grouped.members(&["Hyderabad".to_string()]).len(), 2);
    }

    #[test]
    fn test_nested_groups() {
        let data = data();
        let plant = ColumnDef::accessor("plant", "Plant");
        let brand = ColumnDef::accessor("brand", "Brand");
        let grouped = group_rows(data.iter().collect(), &[&plant, &brand]);

        assert_eq!(ids(&grouped.rows), vec!["1", "4", "3", "2", "5"]);
        assert_eq!(
            grouped.paths[2],
            vec!["Nagpur".to_string(), "Powergel".to_string()]
        );
        assert_eq!(grouped.members(&["Nagpur".to_string()]).len(), 3);
    }

    #[test]
    fn test_no_grouping_is_flat() {
        let data = data();
        let grouped = group_rows(data.iter().collect(), &[]);
        assert_eq!(grouped.len(), 5);
        assert!(grouped.paths.iter().all(|p| p.is_empty()));
    }
}
