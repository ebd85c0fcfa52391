use crate::shared::api_utils::api_url;
use contracts::reports::{ReportKind, ReportQuery};
use contracts::shared::data_grid::Row;
use gloo_net::http::Request;

/// `/api/reports/{kind}?from_date=..&to_date=..[&plant_code=..]`
pub fn report_path(kind: ReportKind, query: &ReportQuery) -> Result<String, String> {
    let query_string =
        serde_qs::to_string(query).map_err(|e| format!("Invalid report query: {}", e))?;
    Ok(format!("/api/reports/{}?{}", kind.api_segment(), query_string))
}

/// Rows of one report; the API answers with a flat JSON array
pub async fn fetch_report(kind: ReportKind, query: &ReportQuery) -> Result<Vec<Row>, String> {
    let url = api_url(&report_path(kind, query)?);
    leptos::logging::log!("Fetching {} from {}", kind.code(), url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<Vec<Row>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_report_path() {
        let mut query = ReportQuery {
            from_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            plant_code: None,
        };
        assert_eq!(
            report_path(ReportKind::Re2, &query).unwrap(),
            "/api/reports/re2?from_date=2024-04-01&to_date=2024-04-30"
        );

        query.plant_code = Some("P01".to_string());
        assert_eq!(
            report_path(ReportKind::Re11, &query).unwrap(),
            "/api/reports/re11?from_date=2024-04-01&to_date=2024-04-30&plant_code=P01"
        );
    }

    #[test]
    fn test_report_payload_into_grid() {
        use crate::reports::columns::report_columns;
        use crate::shared::data_grid::{FooterCell, GridModel, SumAggregator};
        use contracts::shared::data_grid::{CellValue, GridOptions};
        use std::sync::Arc;

        let payload = r#"[
            {"id": 1, "mfg_date": "2024-04-02", "brand_name": "Supergel", "l1_barcodes": ["A", "B"], "net_qty_kg": 50},
            {"id": 2, "mfg_date": "2024-04-03", "brand_name": "Powergel", "l1_barcodes": ["C"], "net_qty_kg": "25.5"}
        ]"#;
        let rows: Vec<Row> = serde_json::from_str(payload).unwrap();
        let grid = GridModel::new(rows, report_columns(ReportKind::Re2), GridOptions::default())
            .with_footer(Arc::new(SumAggregator));

        let footer = grid.footer_cells().unwrap();
        let qty = grid.visible_columns().iter().position(|c| c.id == "net_qty_kg").unwrap();
        assert_eq!(footer[qty], FooterCell::Value(CellValue::Number(75.5)));

        let table = grid.export_table();
        let barcodes = table.headers.iter().position(|h| h == "L1_BARCODES").unwrap();
        assert_eq!(table.rows[0][barcodes], CellValue::Integer(2));

        let missing_id = r#"[{"brand_name": "Supergel"}]"#;
        assert!(serde_json::from_str::<Vec<Row>>(missing_id).is_err());
    }
}
