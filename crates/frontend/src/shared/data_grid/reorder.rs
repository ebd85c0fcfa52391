//! Manual row ordering (drag and drop, keyboard moves)

use contracts::shared::data_grid::{Row, RowId};

/// Where the dragged row lands relative to the drop target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    After,
}

impl DropPosition {
    /// Upper half of the target row means "before"
    pub fn from_pointer(pointer_y: f64, target_top: f64, target_height: f64) -> Self {
        if pointer_y < target_top + target_height / 2.0 {
            DropPosition::Before
        } else {
            DropPosition::After
        }
    }
}

/// Removes the element at `from` and inserts it at `to`.
///
/// Returns `false` (and leaves `items` untouched) when either index is out of
/// range or the move is a no-op.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() || from == to {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Final index of an item moved from `from` next to the item at `target`
pub fn insertion_index(from: usize, target: usize, position: DropPosition) -> usize {
    match position {
        DropPosition::Before if target < from => target,
        DropPosition::Before => target.saturating_sub(1),
        DropPosition::After if target < from => target + 1,
        DropPosition::After => target,
    }
}

/// Moves the row `dragged` before or after the row `target`. Unknown ids and
/// dropping a row onto itself leave the order unchanged.
pub fn reorder_by_id(rows: &mut Vec<Row>, dragged: &RowId, target: &RowId, position: DropPosition) -> bool {
    if dragged == target {
        return false;
    }
    let Some(from) = rows.iter().position(|r| &r.id == dragged) else {
        return false;
    };
    let Some(to) = rows.iter().position(|r| &r.id == target) else {
        return false;
    };
    move_item(rows, from, insertion_index(from, to, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: i64) -> Vec<Row> {
        (1..=n).map(Row::new).collect()
    }

    fn ids(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_move_item() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert!(move_item(&mut items, 0, 2));
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);
        assert!(move_item(&mut items, 3, 0));
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
        assert!(!move_item(&mut items, 1, 1));
        assert!(!move_item(&mut items, 9, 0));
    }

    #[test]
    fn test_reorder_before_and_after() {
        let mut data = rows(5);
        assert!(reorder_by_id(&mut data, &RowId::Int(1), &RowId::Int(4), DropPosition::Before));
        assert_eq!(ids(&data), vec!["2", "3", "1", "4", "5"]);

        let mut data = rows(5);
        assert!(reorder_by_id(&mut data, &RowId::Int(1), &RowId::Int(4), DropPosition::After));
        assert_eq!(ids(&data), vec!["2", "3", "4", "1", "5"]);

        let mut data = rows(5);
        assert!(reorder_by_id(&mut data, &RowId::Int(5), &RowId::Int(2), DropPosition::Before));
        assert_eq!(ids(&data), vec!["1", "5", "2", "3", "4"]);

        let mut data = rows(5);
        assert!(reorder_by_id(&mut data, &RowId::Int(5), &RowId::Int(2), DropPosition::After));
        assert_eq!(ids(&data), vec!["1", "2", "5", "3", "4"]);
    }

    #[test]
    fn test_reorder_noop() {
        let mut data = rows(3);
        assert!(!reorder_by_id(&mut data, &RowId::Int(2), &RowId::Int(2), DropPosition::After));
        assert!(!reorder_by_id(&mut data, &RowId::Int(9), &RowId::Int(2), DropPosition::After));
        // dropping just before the next row is the current place
        assert!(!reorder_by_id(&mut data, &RowId::Int(1), &RowId::Int(2), DropPosition::Before));
        assert_eq!(ids(&data), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_drop_position_from_pointer() {
        assert_eq!(DropPosition::from_pointer(105.0, 100.0, 30.0), DropPosition::Before);
        assert_eq!(DropPosition::from_pointer(120.0, 100.0, 30.0), DropPosition::After);
    }
}
