//! Statutory register reports (RE forms) served by the remote API.
//!
//! The API returns each report as a flat array of rows; see
//! [`crate::shared::data_grid::Row`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statutory report form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Production register
    Re2,
    /// Dispatch register
    Re3,
    /// Magazine stock register
    Re4,
    /// Magazine transfer register
    Re7,
    /// Monthly return
    Re11,
}

impl ReportKind {
    pub fn all() -> &'static [ReportKind] {
        &[
            ReportKind::Re2,
            ReportKind::Re3,
            ReportKind::Re4,
            ReportKind::Re7,
            ReportKind::Re11,
        ]
    }

    /// Form code as printed on the register
    pub fn code(&self) -> &'static str {
        match self {
            ReportKind::Re2 => "RE2",
            ReportKind::Re3 => "RE3",
            ReportKind::Re4 => "RE4",
            ReportKind::Re7 => "RE7",
            ReportKind::Re11 => "RE11",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Re2 => "Production register",
            ReportKind::Re3 => "Dispatch register",
            ReportKind::Re4 => "Magazine stock register",
            ReportKind::Re7 => "Magazine transfer register",
            ReportKind::Re11 => "Monthly return",
        }
    }

    /// Path segment of the report endpoint (`/api/reports/{segment}`)
    pub fn api_segment(&self) -> &'static str {
        match self {
            ReportKind::Re2 => "re2",
            ReportKind::Re3 => "re3",
            ReportKind::Re4 => "re4",
            ReportKind::Re7 => "re7",
            ReportKind::Re11 => "re11",
        }
    }

    pub fn from_segment(segment: &str) -> Option<ReportKind> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.api_segment() == segment)
    }
}

/// Query parameters of a report request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_code: Option<String>,
}
