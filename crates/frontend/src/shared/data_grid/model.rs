//! Grid state and its transform pipeline.
//!
//! `GridModel` owns a copy of the caller's rows plus every piece of transient
//! table state. Rows flow through a fixed pipeline:
//!
//! ```text
//! rows -> global filter -> column filters -> sort -> group -> page
//! ```
//!
//! Exports and the footer read the same pipeline up to (and including) the
//! sort, so they always cover the whole filtered set rather than the page.

use super::aggregate::{footer_row, summary_cells, FooterAggregator, FooterCell};
use super::column::ColumnDef;
use super::export::ExportTable;
use super::filter::filter_rows;
use super::group::{group_rows, GroupedRows};
use super::pagination::PaginationState;
use super::reorder::{self, DropPosition};
use super::sort::sort_rows;
use super::view::{CheckState, GroupHeaderView, HeaderView, PageItem, PageView, RowView};
use contracts::shared::data_grid::{
    ColumnSort, ExportHeaderSource, GridOptions, Row, RowId, SortDirection,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct GridModel {
    rows: Vec<Row>,
    columns: Vec<ColumnDef>,
    options: GridOptions,
    footer: Option<Arc<dyn FooterAggregator>>,
    row_selection: BTreeSet<RowId>,
    column_visibility: HashMap<String, bool>,
    column_filters: BTreeMap<String, String>,
    global_filter: String,
    sorting: Vec<ColumnSort>,
    pagination: PaginationState,
    grouping: Vec<String>,
}

impl fmt::Debug for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridModel")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("has_footer", &self.footer.is_some())
            .field("row_selection", &self.row_selection)
            .field("column_visibility", &self.column_visibility)
            .field("column_filters", &self.column_filters)
            .field("global_filter", &self.global_filter)
            .field("sorting", &self.sorting)
            .field("pagination", &self.pagination)
            .field("grouping", &self.grouping)
            .finish()
    }
}

fn warn_duplicate_ids(rows: &[Row]) {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if !seen.insert(&row.id) {
            log::warn!("data grid: duplicate row id {}", row.id);
        }
    }
}

fn common_prefix_len(a: &[String], b: &[String]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

impl GridModel {
    /// Creates a grid over `rows`. The row number column is prepended
    /// unless the caller already placed it.
    pub fn new(rows: Vec<Row>, columns: Vec<ColumnDef>, options: GridOptions) -> Self {
        let mut all_columns = Vec::with_capacity(columns.len() + 1);
        if !columns.iter().any(|c| c.is_row_number()) {
            all_columns.push(ColumnDef::row_number());
        }
        all_columns.extend(columns);
        warn_duplicate_ids(&rows);

        let pagination = PaginationState::new(options.page_size);
        Self {
            rows,
            columns: all_columns,
            options,
            footer: None,
            row_selection: BTreeSet::new(),
            column_visibility: HashMap::new(),
            column_filters: BTreeMap::new(),
            global_filter: String::new(),
            sorting: Vec::new(),
            pagination,
            grouping: Vec::new(),
        }
    }

    /// Attaches a footer strategy (turns the grid into a totals grid)
    pub fn with_footer(mut self, aggregator: Arc<dyn FooterAggregator>) -> Self {
        self.footer = Some(aggregator);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Replaces the row set. Depending on `reset_state_on_data_change` the
    /// transient state is reset, or kept with the selection pruned to the
    /// rows that still exist.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        warn_duplicate_ids(&rows);
        self.rows = rows;

        if self.options.reset_state_on_data_change {
            self.reset_state();
        } else {
            let ids: HashSet<&RowId> = self.rows.iter().map(|r| &r.id).collect();
            self.row_selection.retain(|id| ids.contains(id));
        }
    }

    /// Clears selection, filters, sorting and pagination
    pub fn reset_state(&mut self) {
        self.row_selection.clear();
        self.column_filters.clear();
        self.global_filter.clear();
        self.sorting.clear();
        self.pagination = PaginationState::new(self.options.page_size);
    }

    // ---------------------------------------------------------------------
    // Filters

    /// Sets the free-text filter. The page index is kept, so a narrowed set
    /// may leave the current page empty.
    pub fn set_global_filter(&mut self, text: &str) {
        self.global_filter = text.to_string();
    }

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    /// Sets the filter of one column; blank text clears it. Returns `false`
    /// for unknown or unfilterable columns.
    pub fn set_column_filter(&mut self, column_id: &str, value: &str) -> bool {
        match self.column(column_id) {
            Some(column) if column.enable_column_filter => {}
            Some(_) => return false,
            None => {
                log::warn!("data grid: filter on unknown column {}", column_id);
                return false;
            }
        }

        if value.trim().is_empty() {
            self.column_filters.remove(column_id);
        } else {
            self.column_filters
                .insert(column_id.to_string(), value.to_string());
        }
        true
    }

    pub fn column_filter(&self, column_id: &str) -> &str {
        self.column_filters
            .get(column_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn clear_filters(&mut self) {
        self.global_filter.clear();
        self.column_filters.clear();
    }

    // ---------------------------------------------------------------------
    // Sorting

    fn sortable(&self, column_id: &str) -> bool {
        match self.column(column_id) {
            Some(column) => column.enable_sorting,
            None => {
                log::warn!("data grid: sort on unknown column {}", column_id);
                false
            }
        }
    }

    /// Header click: cycles `none -> asc -> desc -> none` and makes this the
    /// only sorted column
    pub fn toggle_sort(&mut self, column_id: &str) -> bool {
        if !self.sortable(column_id) {
            return false;
        }
        let next = SortDirection::cycle(self.sort_direction(column_id));
        self.sorting = next
            .map(|direction| {
                vec![ColumnSort {
                    column_id: column_id.to_string(),
                    direction,
                }]
            })
            .unwrap_or_default();
        true
    }

    /// Shift+click: cycles this column while keeping the other sorts.
    /// Falls back to [`Self::toggle_sort`] unless `multi_sort` is enabled.
    pub fn toggle_sort_multi(&mut self, column_id: &str) -> bool {
        if !self.options.multi_sort {
            return self.toggle_sort(column_id);
        }
        if !self.sortable(column_id) {
            return false;
        }

        match self.sorting.iter().position(|s| s.column_id == column_id) {
            Some(i) => match SortDirection::cycle(Some(self.sorting[i].direction)) {
                Some(direction) => self.sorting[i].direction = direction,
                None => {
                    self.sorting.remove(i);
                }
            },
            None => self.sorting.push(ColumnSort {
                column_id: column_id.to_string(),
                direction: SortDirection::Asc,
            }),
        }
        true
    }

    pub fn sorting(&self) -> &[ColumnSort] {
        &self.sorting
    }

    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|s| s.column_id == column_id)
            .map(|s| s.direction)
    }

    // ---------------------------------------------------------------------
    // Column visibility

    /// Shows or hides a column. Columns with `enable_hiding == false` stay
    /// visible and the call returns `false`.
    pub fn toggle_column_visibility(&mut self, column_id: &str, visible: bool) -> bool {
        match self.column(column_id) {
            Some(column) if column.enable_hiding => {
                self.column_visibility.insert(column_id.to_string(), visible);
                true
            }
            _ => false,
        }
    }

    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.column_visibility
            .get(column_id)
            .copied()
            .unwrap_or(true)
    }

    /// Columns in render order, hidden ones skipped
    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.columns
            .iter()
            .filter(|c| self.is_column_visible(&c.id))
            .collect()
    }

    /// Entries of the column visibility menu
    pub fn hideable_columns(&self) -> Vec<(&ColumnDef, bool)> {
        self.columns
            .iter()
            .filter(|c| c.enable_hiding && !c.is_reserved())
            .map(|c| (c, self.is_column_visible(&c.id)))
            .collect()
    }

    /// Columns scanned by the global filter
    fn scan_columns(&self) -> Vec<&ColumnDef> {
        self.visible_columns()
            .into_iter()
            .filter(|c| !c.is_reserved())
            .collect()
    }

    // ---------------------------------------------------------------------
    // Selection

    pub fn toggle_row_selected(&mut self, id: &RowId, selected: bool) -> bool {
        if !self.options.enable_row_selection || !self.rows.iter().any(|r| &r.id == id) {
            return false;
        }
        if selected {
            self.row_selection.insert(id.clone())
        } else {
            self.row_selection.remove(id)
        }
    }

    pub fn is_row_selected(&self, id: &RowId) -> bool {
        self.row_selection.contains(id)
    }

    /// Header checkbox: selects or clears every row of the current page
    pub fn toggle_page_rows_selected(&mut self, selected: bool) {
        if !self.options.enable_row_selection {
            return;
        }
        let page_ids: Vec<RowId> = self.page_rows().iter().map(|r| r.id.clone()).collect();
        for id in page_ids {
            if selected {
                self.row_selection.insert(id);
            } else {
                self.row_selection.remove(&id);
            }
        }
    }

    /// Selected ids in row order
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selected_rows().iter().map(|r| r.id.clone()).collect()
    }

    pub fn selected_rows(&self) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|r| self.row_selection.contains(&r.id))
            .collect()
    }

    pub fn page_selection_state(&self) -> CheckState {
        let page = self.page_rows();
        let selected = page
            .iter()
            .filter(|r| self.row_selection.contains(&r.id))
            .count();
        if selected == 0 {
            CheckState::Unchecked
        } else if selected == page.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }

    // ---------------------------------------------------------------------
    // Manual ordering

    /// Moves row `from` right before or after row `to` in the underlying
    /// sequence
    pub fn reorder_row(&mut self, from: &RowId, to: &RowId, position: DropPosition) -> bool {
        let moved = reorder::reorder_by_id(&mut self.rows, from, to, position);
        if !moved {
            log::debug!("data grid: reorder {} -> {} ignored", from, to);
        }
        moved
    }

    /// Atomic index move on the underlying sequence
    pub fn move_item(&mut self, from_index: usize, to_index: usize) -> bool {
        reorder::move_item(&mut self.rows, from_index, to_index)
    }

    /// Keyboard move: swaps places with the neighbour `delta` steps away in
    /// the displayed order
    pub fn move_row_by(&mut self, id: &RowId, delta: isize) -> bool {
        let order: Vec<RowId> = self
            .grouped_rows()
            .rows
            .iter()
            .map(|r| r.id.clone())
            .collect();
        let Some(index) = order.iter().position(|r| r == id) else {
            return false;
        };
        let Some(target) = index.checked_add_signed(delta).and_then(|t| order.get(t)) else {
            return false;
        };
        let position = if delta < 0 {
            DropPosition::Before
        } else {
            DropPosition::After
        };
        self.reorder_row(id, target, position)
    }

    /// Resolves a `data-row-id` attribute back to the row id
    pub fn row_id_by_key(&self, key: &str) -> Option<RowId> {
        self.rows
            .iter()
            .find(|r| r.id.to_string() == key)
            .map(|r| r.id.clone())
    }

    // ---------------------------------------------------------------------
    // Pagination

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered_rows().len()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.filtered_count())
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.set_page_size(page_size);
    }

    pub fn next_page(&mut self) -> bool {
        let count = self.filtered_count();
        self.pagination.next(count)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous()
    }

    pub fn go_to_first_page(&mut self) -> bool {
        self.pagination.first()
    }

    pub fn go_to_last_page(&mut self) -> bool {
        let count = self.filtered_count();
        self.pagination.last(count)
    }

    /// Jumps to `page_index`; indexes past the last page are ignored
    pub fn go_to_page(&mut self, page_index: usize) -> bool {
        let count = self.filtered_count();
        if page_index >= self.pagination.page_count(count) {
            return false;
        }
        self.pagination.go_to(page_index, count)
    }

    // ---------------------------------------------------------------------
    // Grouping

    /// Sets the grouping columns; unknown ids are dropped
    pub fn set_grouping(&mut self, column_ids: Vec<String>) {
        self.grouping = column_ids
            .into_iter()
            .filter(|id| {
                let known = self.column(id).is_some();
                if !known {
                    log::warn!("data grid: grouping by unknown column {}", id);
                }
                known
            })
            .collect();
    }

    pub fn grouping(&self) -> &[String] {
        &self.grouping
    }

    fn grouping_columns(&self) -> Vec<&ColumnDef> {
        self.grouping
            .iter()
            .filter_map(|id| self.column(id))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Row pipeline

    /// Rows passing the global and column filters, in underlying order
    pub fn filtered_rows(&self) -> Vec<&Row> {
        filter_rows(
            &self.rows,
            &self.scan_columns(),
            &self.columns,
            &self.global_filter,
            &self.column_filters,
        )
    }

    /// Filtered rows in sort order; the scope of the footer and of exports
    pub fn sorted_rows(&self) -> Vec<&Row> {
        let mut rows = self.filtered_rows();
        sort_rows(&mut rows, &self.sorting, &self.columns);
        rows
    }

    pub fn grouped_rows(&self) -> GroupedRows<'_> {
        group_rows(self.sorted_rows(), &self.grouping_columns())
    }

    /// Data rows of the current page
    pub fn page_rows(&self) -> Vec<&Row> {
        let grouped = self.grouped_rows();
        let range = self.pagination.page_range(grouped.len());
        grouped.rows[range].to_vec()
    }

    /// Footer over the whole filtered set, `None` without a footer strategy
    pub fn footer_cells(&self) -> Option<Vec<FooterCell>> {
        let aggregator = self.footer.as_ref()?;
        let rows = self.sorted_rows();
        Some(footer_row(aggregator.as_ref(), &self.visible_columns(), &rows))
    }

    // ---------------------------------------------------------------------
    // Rendering

    pub fn page_view(&self) -> PageView {
        let visible = self.visible_columns();
        let rows = self.sorted_rows();
        let filtered_count = rows.len();
        let footer = self
            .footer
            .as_ref()
            .map(|aggregator| footer_row(aggregator.as_ref(), &visible, &rows));

        let grouping_columns = self.grouping_columns();
        let grouped = group_rows(rows, &grouping_columns);
        let range = self.pagination.page_range(grouped.len());

        let mut items = Vec::new();
        let mut previous: Option<&[String]> = None;
        for (position, index) in range.enumerate() {
            let row = grouped.rows[index];
            let path = grouped.paths[index].as_slice();
            let shared = previous.map(|p| common_prefix_len(p, path)).unwrap_or(0);
            for depth in shared..path.len() {
                items.push(PageItem::Group(self.group_header(
                    &grouped,
                    &path[..=depth],
                    grouping_columns[depth],
                    &visible,
                    row,
                )));
            }
            previous = Some(path);
            items.push(PageItem::Row(self.row_view(
                row,
                self.pagination.row_number(position),
                &visible,
            )));
        }

        let columns = visible
            .iter()
            .map(|column| HeaderView {
                id: column.id.clone(),
                header: column.header.clone(),
                sortable: column.enable_sorting,
                sort: self.sort_direction(&column.id),
                filterable: column.enable_column_filter,
                filter: self.column_filter(&column.id).to_string(),
                align: column.align,
                row_number: column.is_row_number(),
            })
            .collect();

        let page_count = self.pagination.page_count(filtered_count);
        PageView {
            columns,
            items,
            footer,
            page_index: self.pagination.page_index,
            page_count,
            page_size: self.pagination.page_size,
            filtered_count,
            selected_count: self.row_selection.len(),
            can_previous: self.pagination.can_previous(),
            can_next: self.pagination.can_next(filtered_count),
            page_selection: self.page_selection_state(),
        }
    }

    fn row_view(&self, row: &Row, number: usize, visible: &[&ColumnDef]) -> RowView {
        let cells = visible
            .iter()
            .map(|column| {
                if column.is_row_number() {
                    number.to_string()
                } else {
                    column.display_text(row)
                }
            })
            .collect();
        RowView {
            id: row.id.clone(),
            key: row.id.to_string(),
            number,
            cells,
            selected: self.row_selection.contains(&row.id),
        }
    }

    fn group_header(
        &self,
        grouped: &GroupedRows<'_>,
        prefix: &[String],
        column: &ColumnDef,
        visible: &[&ColumnDef],
        first_row: &Row,
    ) -> GroupHeaderView {
        let members = grouped.members(prefix);
        let label = column.display_text(first_row);
        let caption = format!("{}: {} ({})", column.header, label, members.len());
        let cells = match &self.footer {
            Some(aggregator) => summary_cells(aggregator.as_ref(), &caption, visible, &members),
            None => visible
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    if i == 0 {
                        FooterCell::Label(caption.clone())
                    } else {
                        FooterCell::Empty
                    }
                })
                .collect(),
        };
        GroupHeaderView {
            depth: prefix.len() - 1,
            column_id: column.id.clone(),
            label,
            count: members.len(),
            cells,
        }
    }

    // ---------------------------------------------------------------------
    // Export

    /// Visible columns that end up in exported files
    pub fn export_columns(&self) -> Vec<&ColumnDef> {
        self.visible_columns()
            .into_iter()
            .filter(|c| !c.is_reserved() && c.meta.exportable)
            .collect()
    }

    /// Filtered and sorted rows (all pages) over the exportable columns
    pub fn export_table(&self) -> ExportTable {
        let columns = self.export_columns();
        let headers = columns
            .iter()
            .map(|column| match self.options.export.header_source {
                ExportHeaderSource::ColumnId => column.id.to_uppercase(),
                ExportHeaderSource::Label => column.header.clone(),
            })
            .collect();
        let rows = self
            .sorted_rows()
            .into_iter()
            .map(|row| columns.iter().map(|column| column.export_value(row)).collect())
            .collect();
        ExportTable { headers, rows }
    }
}
