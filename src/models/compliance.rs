use serde::{Deserialize, Serialize};

use crate::report::ReportError;

/// A single regulatory report instance.
///
/// `report_type` and `status` are free-form strings; they are rendered as
/// given, never validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceReportRecord {
    pub title: Option<String>,
    pub report_type: Option<String>,
    /// ISO-8601 timestamp or date.
    pub generated_date: Option<String>,
    pub status: Option<String>,
    pub findings: Option<Vec<String>>,
    pub recommendations: Option<Vec<String>>,
}

impl ComplianceReportRecord {
    pub fn from_json(raw: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn findings(&self) -> &[String] {
        self.findings.as_deref().unwrap_or_default()
    }

    pub fn recommendations(&self) -> &[String] {
        self.recommendations.as_deref().unwrap_or_default()
    }
}
