//! Paginated report layout and PDF materialization.
//!
//! Layout is a pure pass that produces a [`ReportDocument`] (pages of text,
//! line, rectangle and image primitives in top-down millimetre coordinates).
//! Rendering to PDF bytes only happens when a caller materializes it.

pub mod document;
pub mod cursor;
pub mod metrics;
pub mod format;
pub mod layout;
pub mod clinical;
pub mod compliance;
pub mod snapshot;
pub mod render;
pub mod generator;

pub use document::*;
pub use cursor::Cursor;
pub use generator::ReportGenerator;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No report has been generated yet")]
    NotGenerated,

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding failed: {0}")]
    Image(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
