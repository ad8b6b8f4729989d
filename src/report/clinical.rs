//! Clinical analytics report: cover page, overview, trends, diagnosis
//! analysis and staff performance, footers on every page.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::ReportConfig;
use crate::models::{
    ClinicalReportData, DiagnosisAnalysis, OverviewMetrics, StaffPerformanceRecord, TrendPoint,
};

use super::document::{FontStyle, ReportDocument};
use super::format::{
    count, decimal2, minutes_long, minutes_short, percent, rating, ratio_percent, short_date,
    short_datetime, text_or_na,
};
use super::layout::{Layout, SECTION_TITLE_SIZE};

pub const CLINICAL_REPORT_TITLE: &str = "Clinical Analytics Report";
const CLINICAL_REPORT_SUBTITLE: &str = "Healthcare Performance & Outcomes Analysis";

/// Rows beyond this are dropped from the diagnosis and staff tables.
pub const MAX_TABLE_ROWS: usize = 10;
const MAX_TOP_DIAGNOSES: usize = 5;

const SUBTABLE_TITLE_SIZE: f32 = 12.0;
const SECTION_GAP: f32 = 10.0;

pub fn build(config: &ReportConfig, data: &ClinicalReportData, generated_at: NaiveDateTime) -> ReportDocument {
    let mut layout = Layout::new(config, CLINICAL_REPORT_TITLE);

    cover_page(&mut layout, data, generated_at);
    overview_section(&mut layout, data.overview.as_ref());
    trends_section(&mut layout, data.trends.as_deref().unwrap_or_default());
    diagnosis_section(&mut layout, data.diagnosis.as_ref());
    staff_section(&mut layout, data.staff.as_deref().unwrap_or_default());

    layout.stamp_footers(&short_date(generated_at.date()));
    layout.finish()
}

fn cover_page(layout: &mut Layout<'_>, data: &ClinicalReportData, generated_at: NaiveDateTime) {
    let margin = layout.margin();
    let line = layout.line_height();

    layout.advance(20.0);
    layout.centered_text(CLINICAL_REPORT_TITLE, 24.0, FontStyle::Bold);
    layout.advance(15.0);
    layout.centered_text(CLINICAL_REPORT_SUBTITLE, 16.0, FontStyle::Normal);
    layout.advance(20.0);

    layout.text(
        format!("Generated on: {}", short_datetime(generated_at)),
        margin,
        12.0,
        FontStyle::Normal,
    );
    layout.advance(line);

    if let Some(organization) = &data.organization {
        layout.text(format!("Organization: {organization}"), margin, 12.0, FontStyle::Normal);
        layout.advance(line);
    }
    if let Some(range) = &data.date_range {
        let period = format!(
            "Report Period: {} to {}",
            text_or_na(range.start.as_deref()),
            text_or_na(range.end.as_deref())
        );
        layout.text(period, margin, 12.0, FontStyle::Normal);
        layout.advance(line);
    }

    layout.advance(10.0);
    layout.text("Executive Summary", margin, SECTION_TITLE_SIZE, FontStyle::Bold);
    layout.advance(10.0);

    let overview = data.overview.as_ref();
    let summary = [
        format!("• Total Encounters: {}", count(overview.and_then(|o| o.total_encounters))),
        format!("• Average Wait Time: {}", minutes_long(overview.and_then(|o| o.average_wait_time))),
        format!("• Patient Satisfaction: {}", rating(overview.and_then(|o| o.patient_satisfaction))),
        format!(
            "• Treatment Success Rate: {}",
            ratio_percent(overview.and_then(|o| o.treatment_success_rate))
        ),
    ];
    for bullet in summary {
        layout.text(bullet, margin + 5.0, 12.0, FontStyle::Normal);
        layout.advance(line);
    }

    layout.add_page();
}

fn overview_section(layout: &mut Layout<'_>, overview: Option<&OverviewMetrics>) {
    layout.section_header("Clinical Overview");
    let Some(overview) = overview else {
        layout.placeholder("No overview data available");
        layout.advance(SECTION_GAP);
        return;
    };

    let rows = vec![
        row(["Metric", "Value"]),
        vec!["Total Encounters".into(), count(overview.total_encounters)],
        vec!["Total Patients".into(), count(overview.total_patients)],
        vec!["Total Appointments".into(), count(overview.total_appointments)],
        vec!["Average Wait Time".into(), minutes_short(overview.average_wait_time)],
        vec!["Patient Satisfaction".into(), rating(overview.patient_satisfaction)],
        vec!["Treatment Success Rate".into(), ratio_percent(overview.treatment_success_rate)],
    ];
    layout.table(&rows);
    layout.advance(SECTION_GAP);

    let top = overview.top_diagnoses.as_deref().unwrap_or_default();
    if !top.is_empty() {
        subtable_title(layout, "Top Diagnoses");
        let mut rows = vec![row(["Diagnosis", "Count"])];
        rows.extend(
            top.iter()
                .take(MAX_TOP_DIAGNOSES)
                .map(|d| vec![text_or_na(d.diagnosis.as_deref()), count(d.count)]),
        );
        layout.table(&rows);
        layout.advance(SECTION_GAP);
    }
    debug!(top_diagnoses = top.len(), "Overview section laid out");
}

fn trends_section(layout: &mut Layout<'_>, trends: &[TrendPoint]) {
    layout.section_header("Performance Trends");
    if trends.is_empty() {
        layout.placeholder("No trend data available");
        layout.advance(SECTION_GAP);
        return;
    }

    let mut rows = vec![row(["Period", "Encounters", "Avg Wait", "Satisfaction", "Success Rate"])];
    rows.extend(trends.iter().map(|t| {
        vec![
            text_or_na(t.period.as_deref()),
            count(t.encounters),
            minutes_short(t.avg_wait_time),
            rating(t.satisfaction),
            ratio_percent(t.success_rate),
        ]
    }));
    layout.table(&rows);
    layout.advance(SECTION_GAP);
    debug!(points = trends.len(), "Trends section laid out");
}

fn diagnosis_section(layout: &mut Layout<'_>, diagnosis: Option<&DiagnosisAnalysis>) {
    layout.section_header("Diagnosis Analysis");
    let distribution = diagnosis
        .and_then(|d| d.distribution.as_deref())
        .unwrap_or_default();
    let demographics = diagnosis.and_then(|d| d.demographics.as_ref());
    let has_buckets = |buckets: &Option<BTreeMap<String, Option<f64>>>| {
        buckets.as_ref().is_some_and(|b| !b.is_empty())
    };
    let has_demographics =
        demographics.is_some_and(|d| has_buckets(&d.age_groups) || has_buckets(&d.gender));

    if distribution.is_empty() && !has_demographics {
        layout.placeholder("No diagnosis data available");
        layout.advance(SECTION_GAP);
        return;
    }

    if !distribution.is_empty() {
        let mut rows = vec![row(["Diagnosis", "Count", "Percentage"])];
        rows.extend(distribution.iter().take(MAX_TABLE_ROWS).map(|d| {
            vec![
                text_or_na(d.diagnosis.as_deref()),
                count(d.count),
                percent(d.percentage),
            ]
        }));
        layout.table(&rows);
        layout.advance(SECTION_GAP);
    }

    if let Some(demographics) = demographics {
        for (title, header, buckets) in [
            ("Age Distribution", "Age Group", demographics.age_groups.as_ref()),
            ("Gender Distribution", "Gender", demographics.gender.as_ref()),
        ] {
            let Some(buckets) = buckets.filter(|b| !b.is_empty()) else {
                continue;
            };
            subtable_title(layout, title);
            let mut rows = vec![row([header, "Percentage"])];
            rows.extend(
                buckets
                    .iter()
                    .map(|(label, share)| vec![label.clone(), percent(*share)]),
            );
            layout.table(&rows);
            layout.advance(SECTION_GAP);
        }
    }
    debug!(
        entries = distribution.len(),
        rendered = distribution.len().min(MAX_TABLE_ROWS),
        "Diagnosis section laid out"
    );
}

fn staff_section(layout: &mut Layout<'_>, staff: &[StaffPerformanceRecord]) {
    layout.section_header("Staff Performance");
    if staff.is_empty() {
        layout.placeholder("No staff performance data available");
        layout.advance(SECTION_GAP);
        return;
    }

    let mut rows = vec![row([
        "Name",
        "Role",
        "Appointments",
        "Satisfaction",
        "Success Rate",
        "Productivity",
    ])];
    rows.extend(staff.iter().take(MAX_TABLE_ROWS).map(|s| {
        vec![
            text_or_na(s.name.as_deref()),
            text_or_na(s.role.as_deref()),
            count(s.appointments),
            rating(s.satisfaction),
            ratio_percent(s.success_rate),
            decimal2(s.productivity),
        ]
    }));
    layout.table(&rows);
    layout.advance(SECTION_GAP);
    debug!(records = staff.len(), "Staff section laid out");
}

/// Bold 12pt caption above a secondary table, kept on the same page as the
/// table's first row.
fn subtable_title(layout: &mut Layout<'_>, title: &str) {
    let keep_with_row = layout.line_height() + layout.row_height();
    layout.ensure_space(layout.row_reserve() + keep_with_row);
    let margin = layout.margin();
    layout.text(title, margin, SUBTABLE_TITLE_SIZE, FontStyle::Bold);
    layout.advance(layout.line_height());
}

fn row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, DiagnosisCount, DiagnosisShare, Demographics};
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn full_overview() -> OverviewMetrics {
        OverviewMetrics {
            total_encounters: Some(1240),
            total_patients: Some(0),
            total_appointments: Some(1502),
            average_wait_time: Some(12.46),
            patient_satisfaction: Some(4.26),
            treatment_success_rate: Some(0.853),
            top_diagnoses: Some(vec![DiagnosisCount {
                diagnosis: Some("Hypertension".into()),
                count: Some(88),
            }]),
        }
    }

    fn build_default(data: &ClinicalReportData) -> ReportDocument {
        build(&ReportConfig::default(), data, at())
    }

    #[test]
    fn empty_bundle_renders_cover_placeholders_and_footers() {
        let doc = build_default(&ClinicalReportData::default());
        assert_eq!(doc.page_count(), 2);

        let cover = doc.page_text(0);
        assert_eq!(cover[0], "Clinical Analytics Report");
        assert!(cover.contains(&"Generated on: 3/5/2026, 2:30:00 PM"));
        assert!(cover.contains(&"• Total Encounters: N/A"));
        assert!(cover.contains(&"• Average Wait Time: N/A"));
        assert!(cover.contains(&"• Patient Satisfaction: N/A"));
        assert!(cover.contains(&"• Treatment Success Rate: N/A"));

        let body = doc.page_text(1);
        for placeholder in [
            "No overview data available",
            "No trend data available",
            "No diagnosis data available",
            "No staff performance data available",
        ] {
            assert!(body.contains(&placeholder), "missing {placeholder}");
        }

        assert_eq!(
            *cover.last().unwrap(),
            "Page 1 of 2 | Generated by Bluequee2 Healthcare System | 3/5/2026"
        );
        assert_eq!(
            *body.last().unwrap(),
            "Page 2 of 2 | Generated by Bluequee2 Healthcare System | 3/5/2026"
        );
    }

    #[test]
    fn cover_page_never_shares_with_body() {
        let doc = build_default(&ClinicalReportData::default());
        assert!(!doc.page_text(0).contains(&"Clinical Overview"));
        assert_eq!(doc.page_text(1)[0], "Clinical Overview");
    }

    #[test]
    fn cover_summary_formats_values() {
        let data = ClinicalReportData {
            overview: Some(full_overview()),
            organization: Some("Northside Family Practice".into()),
            date_range: Some(DateRange {
                start: Some("2026-01-01".into()),
                end: Some("2026-03-31".into()),
            }),
            ..Default::default()
        };
        let cover = build_default(&data).page_text(0).join("\n");
        assert!(cover.contains("Organization: Northside Family Practice"));
        assert!(cover.contains("Report Period: 2026-01-01 to 2026-03-31"));
        assert!(cover.contains("• Total Encounters: 1240"));
        assert!(cover.contains("• Average Wait Time: 12.5 minutes"));
        assert!(cover.contains("• Patient Satisfaction: 4.3/5.0"));
        assert!(cover.contains("• Treatment Success Rate: 85.3%"));
    }

    #[test]
    fn overview_table_values() {
        let data = ClinicalReportData {
            overview: Some(full_overview()),
            ..Default::default()
        };
        let doc = build_default(&data);
        let body = doc.page_text(1);
        let after = |label: &str| {
            let i = body.iter().position(|t| *t == label).unwrap();
            body[i + 1]
        };
        assert_eq!(after("Total Encounters"), "1240");
        assert_eq!(after("Total Patients"), "0");
        assert_eq!(after("Average Wait Time"), "12.5m");
        assert_eq!(after("Patient Satisfaction"), "4.3/5.0");
        // 22-character label goes through the cell truncation rule.
        assert!(!body.contains(&"Treatment Success Rate"));
        assert_eq!(after("Treatment Success..."), "85.3%");
        assert!(body.contains(&"Top Diagnoses"));
        assert_eq!(after("Hypertension"), "88");
    }

    #[test]
    fn overview_missing_fields_render_na() {
        let data = ClinicalReportData {
            overview: Some(OverviewMetrics::default()),
            ..Default::default()
        };
        let doc = build_default(&data);
        let body = doc.page_text(1);
        let i = body.iter().position(|t| *t == "Average Wait Time").unwrap();
        assert_eq!(body[i + 1], "N/A");
        assert!(!body.contains(&"No overview data available"));
        assert!(!body.contains(&"Top Diagnoses"));
    }

    #[test]
    fn trends_keep_input_order() {
        let data = ClinicalReportData {
            trends: Some(
                ["2026-03", "2026-01", "2026-02"]
                    .iter()
                    .map(|p| TrendPoint {
                        period: Some((*p).into()),
                        encounters: Some(10),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        };
        let doc = build_default(&data);
        let body = doc.page_text(1);
        let periods: Vec<&str> = body.iter().copied().filter(|t| t.starts_with("2026-")).collect();
        assert_eq!(periods, vec!["2026-03", "2026-01", "2026-02"]);
    }

    #[test]
    fn diagnosis_table_caps_at_ten_rows() {
        let distribution = (1..=25)
            .map(|i| DiagnosisShare {
                diagnosis: Some(format!("Dx {i:02}")),
                count: Some(100 - i),
                percentage: Some(4.0),
            })
            .collect();
        let data = ClinicalReportData {
            diagnosis: Some(DiagnosisAnalysis {
                distribution: Some(distribution),
                demographics: None,
            }),
            ..Default::default()
        };
        let doc = build_default(&data);
        let text = doc.all_text();
        assert!(text.contains(&"Dx 10"));
        assert!(!text.contains(&"Dx 11"));
        assert!(!text.contains(&"Dx 25"));
        assert_eq!(text.iter().filter(|t| t.starts_with("Dx ")).count(), 10);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn diagnosis_percentages_are_not_recomputed() {
        let data = ClinicalReportData {
            diagnosis: Some(DiagnosisAnalysis {
                distribution: Some(vec![DiagnosisShare {
                    diagnosis: Some("Asthma".into()),
                    count: Some(3),
                    percentage: Some(37.26),
                }]),
                demographics: None,
            }),
            ..Default::default()
        };
        let doc = build_default(&data);
        let body = doc.page_text(1);
        assert!(body.contains(&"37.3%"));
        assert!(!body.contains(&"100.0%"));
    }

    #[test]
    fn demographics_render_sorted_by_label() {
        let data = ClinicalReportData {
            diagnosis: Some(DiagnosisAnalysis {
                distribution: None,
                demographics: Some(Demographics {
                    age_groups: Some(BTreeMap::from([
                        ("55+".to_string(), Some(20.0)),
                        ("18-34".to_string(), Some(30.0)),
                        ("35-54".to_string(), Some(50.0)),
                    ])),
                    gender: Some(BTreeMap::new()),
                }),
            }),
            ..Default::default()
        };
        let doc = build_default(&data);
        let body = doc.page_text(1);
        assert!(body.contains(&"Age Distribution"));
        assert!(!body.contains(&"Gender Distribution"));
        assert!(!body.contains(&"No diagnosis data available"));
        let groups: Vec<&str> = body
            .iter()
            .copied()
            .filter(|t| ["55+", "18-34", "35-54"].contains(t))
            .collect();
        assert_eq!(groups, vec!["18-34", "35-54", "55+"]);
    }

    #[test]
    fn null_demographic_shares_render_na() {
        let raw = r#"{
            "diagnosis": {
                "demographics": { "ageGroups": null, "gender": { "Female": 55.0, "Other": null } }
            }
        }"#;
        let data = ClinicalReportData::from_json(raw).unwrap();
        let doc = build_default(&data);
        let body = doc.page_text(1);
        assert!(!body.contains(&"Age Distribution"));
        assert!(body.contains(&"Gender Distribution"));
        let i = body.iter().position(|t| *t == "Other").unwrap();
        assert_eq!(body[i + 1], "N/A");
        let i = body.iter().position(|t| *t == "Female").unwrap();
        assert_eq!(body[i + 1], "55.0%");
    }

    #[test]
    fn null_demographics_alone_show_placeholder() {
        let data = ClinicalReportData::from_json(
            r#"{ "diagnosis": { "demographics": { "ageGroups": null, "gender": null } } }"#,
        )
        .unwrap();
        let doc = build_default(&data);
        assert!(doc.page_text(1).contains(&"No diagnosis data available"));
    }

    #[test]
    fn staff_table_caps_at_ten_rows() {
        let staff = (1..=14)
            .map(|i| StaffPerformanceRecord {
                name: Some(format!("Staff {i:02}")),
                role: Some("Nurse Practitioner".into()),
                appointments: Some(40),
                satisfaction: Some(4.5),
                success_rate: Some(0.9),
                productivity: Some(1.234),
            })
            .collect();
        let data = ClinicalReportData {
            staff: Some(staff),
            ..Default::default()
        };
        let text = build_default(&data).all_text().join("\n");
        assert!(text.contains("Staff 10"));
        assert!(!text.contains("Staff 11"));
        assert!(text.contains("1.23"));
        assert!(text.contains("90.0%"));
    }

    #[test]
    fn long_trend_table_flows_onto_new_pages() {
        let data = ClinicalReportData {
            trends: Some(
                (0..60)
                    .map(|i| TrendPoint {
                        period: Some(format!("Week {i}")),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        };
        let doc = build_default(&data);
        assert!(doc.page_count() >= 4);
        let total = doc.page_count();
        for i in 0..total {
            let last = *doc.page_text(i).last().unwrap();
            assert_eq!(
                last,
                format!("Page {} of {total} | Generated by Bluequee2 Healthcare System | 3/5/2026", i + 1)
            );
        }
        assert!(doc.contains_text("Week 59"));
    }

    #[test]
    fn identical_input_gives_identical_layout() {
        let data = ClinicalReportData {
            overview: Some(full_overview()),
            trends: Some(vec![TrendPoint::default(); 12]),
            ..Default::default()
        };
        let first = build_default(&data);
        let second = build_default(&data);
        assert_eq!(first.page_count(), second.page_count());
        assert_eq!(first.pages(), second.pages());
        assert_ne!(first.id, second.id);
    }
}
