use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::report::ReportError;

/// Application-level constants
pub const APP_NAME: &str = "Bluequee2 Reports";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Product name stamped into every page footer.
pub const SYSTEM_NAME: &str = "Bluequee2 Healthcare System";

/// Overrides the directory `download_pdf` writes into.
pub const EXPORT_DIR_ENV: &str = "BLUEQUEE_EXPORT_DIR";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "bluequee_reports=info"
}

/// Physical page metrics, all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub line_height_mm: f32,
}

impl Default for PageSetup {
    /// A4 portrait, 20mm margins, 7mm base line.
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 20.0,
            line_height_mm: 7.0,
        }
    }
}

impl PageSetup {
    /// Usable width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }
}

/// Report layout configuration.
///
/// The two bottom reserves are independent: a section header needs room for
/// its rule and at least a few body lines, a table row only for itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub page: PageSetup,
    /// Space kept free at the page bottom before a section header.
    pub header_reserve_mm: f32,
    /// Space kept free at the page bottom before a table row or bullet line.
    pub row_reserve_mm: f32,
    pub system_name: String,
    pub export_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page: PageSetup::default(),
            header_reserve_mm: 50.0,
            row_reserve_mm: 30.0,
            system_name: SYSTEM_NAME.to_string(),
            export_dir: None,
        }
    }
}

impl ReportConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ReportError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        let page = &self.page;
        if page.width_mm <= 0.0 || page.height_mm <= 0.0 {
            return Err(ReportError::Config(format!(
                "page size must be positive, got {}x{}mm",
                page.width_mm, page.height_mm
            )));
        }
        if page.line_height_mm <= 0.0 {
            return Err(ReportError::Config("line height must be positive".into()));
        }
        if page.margin_mm < 0.0 || page.content_width() <= 0.0 {
            return Err(ReportError::Config(format!(
                "margin {}mm leaves no content width",
                page.margin_mm
            )));
        }
        if self.header_reserve_mm < 0.0 || self.row_reserve_mm < 0.0 {
            return Err(ReportError::Config("bottom reserves cannot be negative".into()));
        }
        Ok(())
    }

    /// Directory that `download_pdf` writes into.
    ///
    /// Resolution order: explicit config, `BLUEQUEE_EXPORT_DIR`, the user's
    /// downloads folder, home, then the working directory.
    pub fn export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.export_dir {
            return dir.clone();
        }
        if let Some(dir) = std::env::var_os(EXPORT_DIR_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
