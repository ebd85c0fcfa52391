use std::ops::Range;

/// Zero-based page cursor over the filtered row set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Number of pages for `row_count` rows; an empty set has no pages
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size.max(1))
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, row_count: usize) -> bool {
        self.page_index + 1 < self.page_count(row_count)
    }

    /// Navigation methods return `false` when the page did not change
    pub fn next(&mut self, row_count: usize) -> bool {
        if !self.can_next(row_count) {
            return false;
        }
        self.page_index += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.page_index -= 1;
        true
    }

    pub fn first(&mut self) -> bool {
        let changed = self.page_index != 0;
        self.page_index = 0;
        changed
    }

    pub fn last(&mut self, row_count: usize) -> bool {
        let last = self.page_count(row_count).saturating_sub(1);
        let changed = self.page_index != last;
        self.page_index = last;
        changed
    }

    pub fn go_to(&mut self, page_index: usize, row_count: usize) -> bool {
        let target = page_index.min(self.page_count(row_count).saturating_sub(1));
        let changed = self.page_index != target;
        self.page_index = target;
        changed
    }

    /// Changes the page size keeping the first row of the current page
    /// visible. A size of zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 || page_size == self.page_size {
            return;
        }
        let first_row = self.page_index * self.page_size;
        self.page_size = page_size;
        self.page_index = first_row / page_size;
    }

    /// Row positions of the current page within `row_count` rows
    pub fn page_range(&self, row_count: usize) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(row_count);
        let end = (start + self.page_size).min(row_count);
        start..end
    }

    /// One-based row number of the `index`-th row on the current page
    pub fn row_number(&self, index: usize) -> usize {
        self.page_index * self.page_size + index + 1
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let state = PaginationState::new(10);
        assert_eq!(state.page_count(0), 0);
        assert_eq!(state.page_count(10), 1);
        assert_eq!(state.page_count(37), 4);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut state = PaginationState::new(10);
        assert!(!state.previous());
        assert!(state.next(37));
        assert!(state.last(37));
        assert_eq!(state.page_index, 3);
        assert!(!state.next(37));
        assert!(state.first());
        assert!(!state.first());
    }

    #[test]
    fn test_page_range_and_numbers() {
        let mut state = PaginationState::new(10);
        state.last(37);
        assert_eq!(state.page_range(37), 30..37);
        assert_eq!(state.row_number(0), 31);
        assert_eq!(state.row_number(6), 37);
    }

    #[test]
    fn test_set_page_size_keeps_first_row() {
        let mut state = PaginationState::new(10);
        state.go_to(3, 100);
        state.set_page_size(20);
        assert_eq!(state.page_index, 1);
        assert_eq!(state.page_range(100), 20..40);

        state.set_page_size(0);
        assert_eq!(state.page_size, 20);
    }
}
