//! Clinical analytics bundle handed over by the data-aggregation layer.
//!
//! Every field is optional. The web client serialises these with camelCase
//! keys and freely sends `null` for metrics it could not compute, so every
//! collection is an `Option<Vec<_>>` rather than a defaulted `Vec`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::ReportError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClinicalReportData {
    pub overview: Option<OverviewMetrics>,
    pub trends: Option<Vec<TrendPoint>>,
    pub diagnosis: Option<DiagnosisAnalysis>,
    pub staff: Option<Vec<StaffPerformanceRecord>>,
    pub organization: Option<String>,
    pub date_range: Option<DateRange>,
}

impl ClinicalReportData {
    pub fn from_json(raw: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Aggregate KPIs for the reporting period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverviewMetrics {
    pub total_encounters: Option<u64>,
    pub total_patients: Option<u64>,
    pub total_appointments: Option<u64>,
    /// Minutes.
    pub average_wait_time: Option<f64>,
    /// 0.0 – 5.0
    pub patient_satisfaction: Option<f64>,
    /// 0.0 – 1.0
    pub treatment_success_rate: Option<f64>,
    /// Ranked by the caller, most frequent first.
    pub top_diagnoses: Option<Vec<DiagnosisCount>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagnosisCount {
    pub diagnosis: Option<String>,
    pub count: Option<u64>,
}

/// One period's rollup. Rendered in the order supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrendPoint {
    pub period: Option<String>,
    pub encounters: Option<u64>,
    pub avg_wait_time: Option<f64>,
    pub satisfaction: Option<f64>,
    pub success_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagnosisAnalysis {
    pub distribution: Option<Vec<DiagnosisShare>>,
    pub demographics: Option<Demographics>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagnosisShare {
    pub diagnosis: Option<String>,
    pub count: Option<u64>,
    /// Already a percentage (0 – 100), computed by the caller.
    pub percentage: Option<f64>,
}

/// Percentage buckets keyed by label, e.g. `"18-34" => 27.5`. A `null`
/// share renders as N/A.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Demographics {
    pub age_groups: Option<BTreeMap<String, Option<f64>>>,
    pub gender: Option<BTreeMap<String, Option<f64>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaffPerformanceRecord {
    pub name: Option<String>,
    pub role: Option<String>,
    pub appointments: Option<u64>,
    pub satisfaction: Option<f64>,
    pub success_rate: Option<f64>,
    pub productivity: Option<f64>,
}
