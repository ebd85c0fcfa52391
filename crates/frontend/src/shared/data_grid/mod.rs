//! Client-side data grid engine: filtering, sorting, grouping, pagination,
//! manual row order, footer totals and file export over an in-memory row
//! set. Pure Rust, rendered by `shared::components::data_table`.

pub mod aggregate;
pub mod column;
pub mod export;
pub mod filter;
pub mod format;
pub mod group;
pub mod model;
pub mod pagination;
pub mod reorder;
pub mod sort;
pub mod view;

pub use aggregate::{FooterAggregator, FooterCell, SumAggregator};
pub use column::{Align, ArrayExport, ColumnDef, ColumnMeta};
pub use export::{ExportError, ExportFormat, ExportTable};
pub use model::GridModel;
pub use reorder::DropPosition;
pub use view::{CheckState, GroupHeaderView, HeaderView, PageItem, PageView, RowView};
