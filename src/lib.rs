pub mod config;
pub mod export;
pub mod models;
pub mod report;

pub use models::{ClinicalReportData, ComplianceReportRecord};
pub use report::{ReportDocument, ReportError, ReportGenerator};

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` wins over the default filter.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Which report `run` produces from its input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Clinical,
    Compliance,
    Snapshot,
}

impl std::str::FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clinical" => Ok(Self::Clinical),
            "compliance" => Ok(Self::Compliance),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(ReportError::Config(format!("unknown report kind: {other}"))),
        }
    }
}

/// Reads `input` (JSON bundle, or an image for snapshots), generates the
/// report and writes the PDF to `output`.
pub fn run(kind: ReportKind, input: &Path, output: &Path) -> Result<usize, ReportError> {
    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let mut generator = ReportGenerator::new(config::ReportConfig::default())?;
    let pages = match kind {
        ReportKind::Clinical => {
            let data = ClinicalReportData::from_json(&std::fs::read_to_string(input)?)?;
            generator.generate_clinical_report(&data).page_count()
        }
        ReportKind::Compliance => {
            let record = ComplianceReportRecord::from_json(&std::fs::read_to_string(input)?)?;
            generator.generate_compliance_report(&record).page_count()
        }
        ReportKind::Snapshot => generator.generate_from_image(&std::fs::read(input)?)?.page_count(),
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, generator.pdf_blob()?)?;
    tracing::info!(path = %output.display(), pages, "Report written");
    Ok(pages)
}
