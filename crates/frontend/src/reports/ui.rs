use super::api::fetch_report;
use super::columns::report_columns;
use crate::shared::components::data_table::SummableDataTable;
use crate::shared::icons::icon;
use chrono::{Datelike, NaiveDate, Utc};
use contracts::reports::{ReportKind, ReportQuery};
use contracts::shared::data_grid::{ExportOptions, GridOptions, Row};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// First and last day of the month containing `today`
pub fn month_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.with_day(1).unwrap_or(today);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(today);
    (start, end)
}

/// Validates the form fields into a request
pub fn build_query(from_date: &str, to_date: &str, plant_code: &str) -> Result<ReportQuery, String> {
    let parse = |value: &str, field: &str| {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_| format!("{}: invalid date '{}'", field, value))
    };
    let from_date = parse(from_date, "From")?;
    let to_date = parse(to_date, "To")?;
    if from_date > to_date {
        return Err("'From' date is after 'To' date".to_string());
    }
    let plant_code = plant_code.trim();
    Ok(ReportQuery {
        from_date,
        to_date,
        plant_code: (!plant_code.is_empty()).then(|| plant_code.to_string()),
    })
}

fn grid_options(kind: ReportKind) -> GridOptions {
    GridOptions {
        page_size: 20,
        export: ExportOptions {
            sheet_name: kind.code().to_string(),
            ..ExportOptions::default()
        },
        ..GridOptions::default()
    }
}

/// One report request. Only the latest request for the form on screen may
/// update the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoadTicket {
    seq: u64,
    kind: ReportKind,
}

impl LoadTicket {
    fn is_current(&self, latest_seq: u64, current_kind: ReportKind) -> bool {
        self.seq == latest_seq && self.kind == current_kind
    }
}

/// `RE2_2024-04-01_2024-04-30`
fn export_stem(kind: ReportKind, from_date: &str, to_date: &str) -> String {
    format!("{}_{}_{}", kind.code(), from_date, to_date)
}

#[component]
pub fn ReportPage() -> impl IntoView {
    let (start, end) = month_range(Utc::now().date_naive());

    let kind = RwSignal::new(ReportKind::Re2);
    let kind_segment = RwSignal::new(ReportKind::Re2.api_segment().to_string());
    let from_date = RwSignal::new(start.to_string());
    let to_date = RwSignal::new(end.to_string());
    let plant_code = RwSignal::new(String::new());

    let rows = RwSignal::new(Vec::<Row>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let request_seq = StoredValue::new(0_u64);

    let load = move || {
        // any response still in flight is stale from here on
        let seq = request_seq.get_value() + 1;
        request_seq.set_value(seq);

        let query = match build_query(
            &from_date.get_untracked(),
            &to_date.get_untracked(),
            &plant_code.get_untracked(),
        ) {
            Ok(query) => query,
            Err(e) => {
                loading.set(false);
                error.set(Some(e));
                return;
            }
        };
        let report = kind.get_untracked();
        let ticket = LoadTicket { seq, kind: report };
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = fetch_report(report, &query).await;

            let current = request_seq
                .try_get_value()
                .zip(kind.try_get_untracked())
                .is_some_and(|(latest, shown)| ticket.is_current(latest, shown));
            if !current {
                log!("Dropping stale {} response", report.code());
                return;
            }

            match result {
                Ok(data) => {
                    log!("Loaded {} rows of {}", data.len(), report.code());
                    rows.set(data);
                }
                Err(e) => {
                    log!("Failed to load {}: {}", report.code(), e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    };

    // a new form gets a fresh grid and is loaded right away
    Effect::new(move |_| {
        let segment = kind_segment.get();
        let Some(next) = ReportKind::from_segment(&segment) else {
            return;
        };
        if kind.get_untracked() != next {
            rows.set(Vec::new());
            kind.set(next);
        }
        load();
    });

    view! {
        <div id="reports--list" class="page">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("columns")}
                    <h1 class="page__title">
                        {move || format!("{} {}", kind.get().code(), kind.get().title())}
                    </h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        <span>{move || rows.with(|r| r.len()).to_string()}</span>
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| load()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Load" }}
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <div class="filter-panel-content">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Report:"</Label>
                            <Select value=kind_segment>
                                {ReportKind::all()
                                    .iter()
                                    .map(|k| {
                                        view! {
                                            <option value=k.api_segment()>
                                                {format!("{} - {}", k.code(), k.title())}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </Select>
                        </Flex>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"From:"</Label>
                            <input
                                type="date"
                                class="filter-panel__date"
                                prop:value=move || from_date.get()
                                on:input=move |ev| from_date.set(event_target_value(&ev))
                            />
                        </Flex>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"To:"</Label>
                            <input
                                type="date"
                                class="filter-panel__date"
                                prop:value=move || to_date.get()
                                on:input=move |ev| to_date.set(event_target_value(&ev))
                            />
                        </Flex>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Plant:"</Label>
                            <Input value=plant_code placeholder="All plants" />
                        </Flex>
                    </Flex>
                </div>
            </div>

            {move || {
                error.get().map(|e| {
                    view! {
                        <div class="warning-box">
                            <span class="warning-box__text">{e}</span>
                        </div>
                    }
                })
            }}

            <div class="page-content">
                {move || {
                    let report = kind.get();
                    view! {
                        <SummableDataTable
                            rows=rows
                            columns=report_columns(report)
                            options=grid_options(report)
                            file_name=Signal::derive(move || {
                                export_stem(report, &from_date.get(), &to_date.get())
                            })
                        />
                    }
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_range() {
        assert_eq!(month_range(date(2024, 2, 14)), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(month_range(date(2024, 12, 31)), (date(2024, 12, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_build_query() {
        let query = build_query("2024-04-01", "2024-04-30", " P01 ").unwrap();
        assert_eq!(query.from_date, date(2024, 4, 1));
        assert_eq!(query.plant_code.as_deref(), Some("P01"));

        assert_eq!(build_query("2024-04-01", "2024-04-30", "").unwrap().plant_code, None);
        assert!(build_query("2024-05-01", "2024-04-30", "").is_err());
        assert!(build_query("01.04.2024", "2024-04-30", "").is_err());
    }

    #[test]
    fn test_only_latest_request_is_current() {
        let first = LoadTicket { seq: 1, kind: ReportKind::Re2 };
        let second = LoadTicket { seq: 2, kind: ReportKind::Re3 };

        // RE2 answered after the switch to RE3
        assert!(!first.is_current(2, ReportKind::Re3));
        assert!(second.is_current(2, ReportKind::Re3));
        // reload of the same form
        assert!(!first.is_current(2, ReportKind::Re2));
        assert!(!second.is_current(2, ReportKind::Re2));
    }

    #[test]
    fn test_export_stem_and_options() {
        assert_eq!(
            export_stem(ReportKind::Re7, "2024-04-01", "2024-04-30"),
            "RE7_2024-04-01_2024-04-30"
        );
        assert_eq!(grid_options(ReportKind::Re11).export.sheet_name, "RE11");
    }
}
