pub mod data_table;
pub mod pagination_controls;
pub mod table_checkbox;
pub mod table_totals_row;
