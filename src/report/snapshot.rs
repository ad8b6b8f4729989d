//! Rasterized-snapshot export: one tall image scaled to page width and
//! sliced across as many pages as it needs.

use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use tracing::debug;

use crate::config::ReportConfig;

use super::document::{Primitive, ReportDocument};
use super::ReportError;

pub const SNAPSHOT_TITLE: &str = "Report Snapshot";

pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ReportError> {
    image_crate::load_from_memory(bytes).map_err(|e| ReportError::Image(e.to_string()))
}

/// Lays `image` out at full page width. Page `n` (0-based) shows the slice
/// starting `n * page_height` millimetres down the image.
pub fn build(config: &ReportConfig, image: DynamicImage) -> Result<ReportDocument, ReportError> {
    let (px_width, px_height) = image.dimensions();
    if px_width == 0 || px_height == 0 {
        return Err(ReportError::Image("snapshot image is empty".into()));
    }

    let page_height = config.page.height_mm;
    let width = config.page.width_mm;
    let height = px_height as f32 * width / px_width as f32;

    let mut doc = ReportDocument::new(SNAPSHOT_TITLE, &config.page);
    let index = doc.add_image(image);

    let mut position = 0.0;
    let mut height_left = height;
    loop {
        doc.push(Primitive::Image { index, x: 0.0, y: position, width, height });
        height_left -= page_height;
        if height_left <= 0.0 {
            break;
        }
        position = height_left - height;
        doc.add_page();
    }

    debug!(
        px_width,
        px_height,
        pages = doc.page_count(),
        "Snapshot paginated"
    );
    Ok(doc)
}
