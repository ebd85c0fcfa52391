use serde::{Deserialize, Serialize};

/// Sort direction of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Header click cycle: none → asc → desc → none
    pub fn cycle(current: Option<SortDirection>) -> Option<SortDirection> {
        match current {
            None => Some(SortDirection::Asc),
            Some(SortDirection::Asc) => Some(SortDirection::Desc),
            Some(SortDirection::Desc) => None,
        }
    }
}

/// One entry of the grid sorting state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column_id: String,
    pub direction: SortDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        let mut state = None;
        state = SortDirection::cycle(state);
        assert_eq!(state, Some(SortDirection::Asc));
        state = SortDirection::cycle(state);
        assert_eq!(state, Some(SortDirection::Desc));
        state = SortDirection::cycle(state);
        assert_eq!(state, None);
    }
}
