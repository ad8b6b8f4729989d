//! Handing finished PDFs to the outside world: files on disk and inline
//! data URLs.

use std::path::{Path, PathBuf};

use base64::Engine;

use crate::report::ReportError;

pub const PDF_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

/// Saves PDF bytes as `exports_dir/filename`, creating the directory if
/// needed. The filename is used as given; no extension is added.
pub fn export_pdf_to_file(
    pdf_bytes: &[u8],
    filename: &str,
    exports_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let name = Path::new(filename)
        .file_name()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ReportError::Config(format!("Invalid export filename: {filename:?}")))?;

    std::fs::create_dir_all(exports_dir)?;
    let path = exports_dir.join(name);
    std::fs::write(&path, pdf_bytes)?;

    tracing::info!(
        path = %path.display(),
        size_bytes = pdf_bytes.len(),
        "PDF exported"
    );
    Ok(path)
}

pub fn to_data_url(pdf_bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(pdf_bytes);
    format!("{PDF_DATA_URL_PREFIX}{encoded}")
}
