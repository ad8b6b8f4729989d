//! Report generation entry point.
//!
//! A `ReportGenerator` holds at most one finished document. Every generate
//! call lays out a fresh document and replaces the previous one; the
//! materialization methods then render whatever was generated last. Calls
//! take `&mut self`, so one instance cannot interleave two generations; share
//! an instance across threads only behind a `Mutex`.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::config::ReportConfig;
use crate::export;
use crate::models::{ClinicalReportData, ComplianceReportRecord};

use super::document::ReportDocument;
use super::{clinical, compliance, render, snapshot, ReportError};

#[derive(Debug)]
pub struct ReportGenerator {
    config: ReportConfig,
    fixed_time: Option<NaiveDateTime>,
    document: Option<ReportDocument>,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        config.validate()?;
        Ok(Self {
            config,
            fixed_time: None,
            document: None,
        })
    }

    /// Pins the generation timestamp instead of reading the local clock.
    pub fn with_generated_at(mut self, at: NaiveDateTime) -> Self {
        self.fixed_time = Some(at);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The last generated document, if any.
    pub fn document(&self) -> Option<&ReportDocument> {
        self.document.as_ref()
    }

    /// Drops the held document. The next materialization fails until another
    /// report is generated.
    pub fn reset(&mut self) {
        self.document = None;
    }

    fn now(&self) -> NaiveDateTime {
        self.fixed_time.unwrap_or_else(|| Local::now().naive_local())
    }

    fn store(&mut self, document: ReportDocument) -> &ReportDocument {
        self.document.insert(document)
    }

    /// Cover page, overview, trends, diagnosis and staff sections, footers.
    /// Absent inputs render placeholders; this never fails.
    pub fn generate_clinical_report(&mut self, data: &ClinicalReportData) -> &ReportDocument {
        let document = clinical::build(&self.config, data, self.now());
        info!(
            report_id = %document.id,
            pages = document.page_count(),
            "Clinical report generated"
        );
        self.store(document)
    }

    /// Header, metadata, findings and recommendations, footers.
    pub fn generate_compliance_report(&mut self, record: &ComplianceReportRecord) -> &ReportDocument {
        let document = compliance::build(&self.config, record, self.now());
        info!(
            report_id = %document.id,
            pages = document.page_count(),
            report_type = record.report_type.as_deref().unwrap_or("unknown"),
            "Compliance report generated"
        );
        self.store(document)
    }

    /// Paginates an encoded PNG/JPEG snapshot of a rendered view.
    pub fn generate_from_image(&mut self, image_bytes: &[u8]) -> Result<&ReportDocument, ReportError> {
        let image = snapshot::decode(image_bytes)?;
        let document = snapshot::build(&self.config, image)?;
        info!(
            report_id = %document.id,
            pages = document.page_count(),
            "Snapshot report generated"
        );
        Ok(self.store(document))
    }

    fn generated(&self) -> Result<&ReportDocument, ReportError> {
        self.document.as_ref().ok_or(ReportError::NotGenerated)
    }

    /// The finished PDF as bytes.
    pub fn pdf_blob(&self) -> Result<Vec<u8>, ReportError> {
        render::render_pdf(self.generated()?)
    }

    /// The finished PDF as a `data:application/pdf;base64,…` URL.
    pub fn pdf_data_url(&self) -> Result<String, ReportError> {
        Ok(export::to_data_url(&self.pdf_blob()?))
    }

    /// Writes the finished PDF into the configured export directory under
    /// `filename` and returns the full path.
    pub fn download_pdf(&self, filename: &str) -> Result<PathBuf, ReportError> {
        let bytes = self.pdf_blob()?;
        export::export_pdf_to_file(&bytes, filename, &self.config.export_dir())
    }
}
