//! `ReportDocument` → PDF bytes via `printpdf`.
//!
//! Layout coordinates are top-down; PDF user space is bottom-up, so every
//! y is flipped against the page height here and nowhere else.

use std::io::BufWriter;

use printpdf::image_crate::GenericImageView;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rect, Rgb,
};
use tracing::debug;

use super::document::{FontStyle, Page, Primitive, ReportDocument};
use super::ReportError;

const STROKE_WIDTH_PT: f32 = 0.5;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Normal => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }
}

/// Renders every page of `report` and returns the PDF bytes.
pub fn render_pdf(report: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let (width, height) = (report.width_mm, report.height_mm);
    let (doc, page1, layer1) = PdfDocument::new(&report.title, Mm(width), Mm(height), "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?,
    };

    for (index, page) in report.pages().iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(width), Mm(height), format!("Page {}", index + 1));
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, report, &fonts);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Pdf(format!("save error: {e}")))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| ReportError::Pdf(format!("buffer error: {e}")))?;

    debug!(
        report_id = %report.id,
        pages = report.page_count(),
        size_bytes = bytes.len(),
        "PDF rendered"
    );
    Ok(bytes)
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn draw_page(layer: &PdfLayerReference, page: &Page, report: &ReportDocument, fonts: &Fonts) {
    let page_height = report.height_mm;
    let flip = |y: f32| Mm(page_height - y);

    layer.set_fill_color(black());
    layer.set_outline_color(black());
    layer.set_outline_thickness(STROKE_WIDTH_PT);

    for primitive in &page.primitives {
        match primitive {
            Primitive::Text { x, y, size, style, text } => {
                layer.use_text(text.as_str(), *size, Mm(*x), flip(*y), fonts.get(*style));
            }
            Primitive::Line { x1, y1, x2, y2 } => {
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1), flip(*y1)), false),
                        (Point::new(Mm(*x2), flip(*y2)), false),
                    ],
                    is_closed: false,
                });
            }
            Primitive::Rect { x, y, width, height } => {
                let rect = Rect::new(Mm(*x), flip(*y + *height), Mm(*x + *width), flip(*y))
                    .with_mode(PaintMode::Stroke);
                layer.add_rect(rect);
            }
            Primitive::Image { index, x, y, width, height } => {
                let Some(source) = report.image(*index) else {
                    continue;
                };
                let (px_width, _) = source.dimensions();
                let dpi = px_width as f32 * 25.4 / *width;
                let image = Image::from_dynamic_image(source);
                image.add_to_layer(
                    layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(*x)),
                        translate_y: Some(flip(*y + *height)),
                        dpi: Some(dpi),
                        ..Default::default()
                    },
                );
            }
        }
    }
}
