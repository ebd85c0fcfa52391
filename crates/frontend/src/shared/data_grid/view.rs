//! Render snapshot of one grid page. Components only read these structs;
//! all state changes go through [`super::GridModel`].

use super::aggregate::FooterCell;
use super::column::Align;
use contracts::shared::data_grid::{RowId, SortDirection};

/// Tri-state of the "select page" checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
    Indeterminate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub id: String,
    pub header: String,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
    pub filterable: bool,
    pub filter: String,
    pub align: Align,
    pub row_number: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: RowId,
    /// `id` as text, used for DOM keys and `data-row-id`
    pub key: String,
    pub number: usize,
    /// One entry per visible column, `srno` included
    pub cells: Vec<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupHeaderView {
    pub depth: usize,
    pub column_id: String,
    pub label: String,
    pub count: usize,
    /// Aligned with the visible columns. The first cell holds the group
    /// caption, the rest subtotals when the grid has a footer strategy.
    pub cells: Vec<FooterCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Group(GroupHeaderView),
    Row(RowView),
}

impl PageItem {
    pub fn key(&self) -> String {
        match self {
            PageItem::Group(group) => format!("group:{}:{}:{}", group.depth, group.column_id, group.label),
            PageItem::Row(row) => format!("row:{}", row.key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageView {
    pub columns: Vec<HeaderView>,
    pub items: Vec<PageItem>,
    pub footer: Option<Vec<FooterCell>>,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub filtered_count: usize,
    pub selected_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub page_selection: CheckState,
}

impl PageView {
    /// Data rows of the page, group headers skipped
    pub fn rows(&self) -> impl Iterator<Item = &RowView> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Row(row) => Some(row),
            PageItem::Group(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows().next().is_none()
    }

    /// "Page X of Y", clamped to the existing pages
    pub fn page_label(&self) -> String {
        let total = self.page_count.max(1);
        format!("Page {} of {}", (self.page_index + 1).min(total), total)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }
}
