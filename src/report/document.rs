use std::sync::Arc;

use printpdf::image_crate::DynamicImage;
use uuid::Uuid;

use crate::config::PageSetup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Bold,
}

/// A drawing operation. Coordinates are millimetres from the top-left corner
/// of the page; `y` grows downwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    /// Stroked outline; `y` is the top edge.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Raster placed with its top-left corner at (`x`, `y`). May extend past
    /// the page edges, the page box clips it.
    Image {
        index: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub primitives: Vec<Primitive>,
}

impl Page {
    /// Text runs on this page in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A laid-out, format-independent report.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub id: Uuid,
    pub title: String,
    pub width_mm: f32,
    pub height_mm: f32,
    pages: Vec<Page>,
    images: Vec<Arc<DynamicImage>>,
}

impl ReportDocument {
    /// Creates a document with one empty page.
    pub fn new(title: impl Into<String>, page: &PageSetup) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            width_mm: page.width_mm,
            height_mm: page.height_mm,
            pages: vec![Page::default()],
            images: Vec::new(),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    /// Appends to the last page.
    pub fn push(&mut self, primitive: Primitive) {
        if let Some(page) = self.pages.last_mut() {
            page.primitives.push(primitive);
        }
    }

    pub(crate) fn push_to(&mut self, page_index: usize, primitive: Primitive) {
        if let Some(page) = self.pages.get_mut(page_index) {
            page.primitives.push(primitive);
        }
    }

    pub fn add_image(&mut self, image: DynamicImage) -> usize {
        self.images.push(Arc::new(image));
        self.images.len() - 1
    }

    pub fn image(&self, index: usize) -> Option<&DynamicImage> {
        self.images.get(index).map(Arc::as_ref)
    }

    pub fn page_text(&self, page_index: usize) -> Vec<&str> {
        self.pages
            .get(page_index)
            .map(|p| p.texts().collect())
            .unwrap_or_default()
    }

    pub fn all_text(&self) -> Vec<&str> {
        self.pages.iter().flat_map(Page::texts).collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.all_text().iter().any(|t| t.contains(needle))
    }
}
