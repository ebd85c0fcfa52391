//! RE report screen: query form plus a totals grid per report form

pub mod api;
pub mod columns;
pub mod ui;

pub use ui::ReportPage;
