//! Single-record compliance report. No cover page; empty findings or
//! recommendations drop their whole subsection rather than showing a
//! placeholder.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::ComplianceReportRecord;
use crate::config::ReportConfig;

use super::document::{FontStyle, ReportDocument};
use super::format::{iso_date_or_raw, short_date, text_or_na};
use super::layout::Layout;

pub const COMPLIANCE_REPORT_TITLE: &str = "Compliance Report";

const HEADER_TITLE_SIZE: f32 = 20.0;
const METADATA_FONT_SIZE: f32 = 11.0;

pub fn build(config: &ReportConfig, record: &ComplianceReportRecord, generated_at: NaiveDateTime) -> ReportDocument {
    let title = record.title.as_deref().unwrap_or(COMPLIANCE_REPORT_TITLE);
    let mut layout = Layout::new(config, title);

    header(&mut layout);
    metadata(&mut layout, record);

    let findings = record.findings();
    if !findings.is_empty() {
        layout.section_header("Findings");
        layout.bullets(findings);
        layout.advance(5.0);
    }

    let recommendations = record.recommendations();
    if !recommendations.is_empty() {
        layout.section_header("Recommendations");
        layout.bullets(recommendations);
        layout.advance(5.0);
    }

    debug!(
        findings = findings.len(),
        recommendations = recommendations.len(),
        "Compliance body laid out"
    );

    layout.stamp_footers(&short_date(generated_at.date()));
    layout.finish()
}

fn header(layout: &mut Layout<'_>) {
    layout.advance(10.0);
    layout.centered_text(COMPLIANCE_REPORT_TITLE, HEADER_TITLE_SIZE, FontStyle::Bold);
    layout.advance(10.0);
    layout.rule();
    layout.advance(10.0);
}

fn metadata(layout: &mut Layout<'_>, record: &ComplianceReportRecord) {
    let margin = layout.margin();
    let generated = record
        .generated_date
        .as_deref()
        .map(iso_date_or_raw);

    let lines = [
        format!("Title: {}", text_or_na(record.title.as_deref())),
        format!("Report Type: {}", text_or_na(record.report_type.as_deref())),
        format!("Generated: {}", text_or_na(generated.as_deref())),
        format!("Status: {}", text_or_na(record.status.as_deref())),
    ];
    for line in lines {
        layout.text(line, margin, METADATA_FONT_SIZE, FontStyle::Normal);
        layout.advance(layout.line_height());
    }
    layout.advance(10.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn audit() -> ComplianceReportRecord {
        ComplianceReportRecord {
            title: Some("Q1 HIPAA Audit".into()),
            report_type: Some("hipaa_audit".into()),
            generated_date: Some("2026-03-31T09:00:00Z".into()),
            status: Some("completed".into()),
            findings: Some(vec![
                "Two workstations without automatic screen lock".into(),
                "Access log review overdue by 14 days".into(),
            ]),
            recommendations: Some(vec!["Enforce a 5 minute screen lock policy".into()]),
        }
    }

    fn build_default(record: &ComplianceReportRecord) -> ReportDocument {
        build(&ReportConfig::default(), record, at())
    }

    #[test]
    fn full_record_layout() {
        let doc = build_default(&audit());
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.title, "Q1 HIPAA Audit");

        let text = doc.page_text(0);
        assert_eq!(
            text[..5],
            [
                "Compliance Report",
                "Title: Q1 HIPAA Audit",
                "Report Type: hipaa_audit",
                "Generated: 3/31/2026",
                "Status: completed",
            ]
        );
        assert!(text.contains(&"Findings"));
        assert!(text.contains(&"• Two workstations without automatic screen lock"));
        assert!(text.contains(&"• Access log review overdue by 14 days"));
        assert!(text.contains(&"Recommendations"));
        assert!(text.contains(&"• Enforce a 5 minute screen lock policy"));
        assert_eq!(
            *text.last().unwrap(),
            "Page 1 of 1 | Generated by Bluequee2 Healthcare System | 4/1/2026"
        );
    }

    #[test]
    fn empty_lists_omit_subsections() {
        let record = ComplianceReportRecord {
            findings: Some(vec![]),
            recommendations: None,
            ..audit()
        };
        let doc = build_default(&record);
        let text = doc.all_text();
        assert!(!text.contains(&"Findings"));
        assert!(!text.contains(&"Recommendations"));
        assert!(!text.iter().any(|t| t.starts_with("•")));
        assert!(text.contains(&"Title: Q1 HIPAA Audit"));
        assert!(text.contains(&"Report Type: hipaa_audit"));
        assert!(text.contains(&"Generated: 3/31/2026"));
        assert!(text.contains(&"Status: completed"));
    }

    #[test]
    fn missing_metadata_renders_na() {
        let doc = build_default(&ComplianceReportRecord::default());
        assert_eq!(doc.title, "Compliance Report");
        let text = doc.page_text(0);
        assert!(text.contains(&"Title: N/A"));
        assert!(text.contains(&"Report Type: N/A"));
        assert!(text.contains(&"Generated: N/A"));
        assert!(text.contains(&"Status: N/A"));
    }

    #[test]
    fn unparseable_date_is_rendered_raw() {
        let record = ComplianceReportRecord {
            generated_date: Some("end of quarter".into()),
            ..audit()
        };
        let doc = build_default(&record);
        assert!(doc.page_text(0).contains(&"Generated: end of quarter"));
    }

    #[test]
    fn many_findings_flow_onto_new_pages() {
        let record = ComplianceReportRecord {
            findings: Some((1..=60).map(|i| format!("Finding number {i}")).collect()),
            ..audit()
        };
        let doc = build_default(&record);
        assert!(doc.page_count() >= 2);
        assert!(doc.contains_text("• Finding number 60"));
        let total = doc.page_count();
        assert_eq!(
            *doc.page_text(total - 1).last().unwrap(),
            format!("Page {total} of {total} | Generated by Bluequee2 Healthcare System | 4/1/2026")
        );
    }
}
