//! Page rendering through Pdfium

use crate::{PreviewError, Result};
use pdfium_render::prelude::*;
use std::io::Cursor;
use std::path::Path;

/// PDF points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Renders PDF pages to PNG images
pub struct PreviewRenderer {
    pdfium: Pdfium,
}

impl PreviewRenderer {
    /// Bind to the Pdfium library, looking next to the executable first
    /// and falling back to the system library path
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| PreviewError::BindError(format!("{e:?}")))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Render every page of `path` at the given resolution
    pub fn render_pages(&self, path: &Path, dpi: u32) -> Result<Vec<PageImage>> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| PreviewError::LoadError(format!("{e:?}")))?;

        let mut pages = Vec::with_capacity(document.pages().len() as usize);
        for (index, page) in document.pages().iter().enumerate() {
            let width = page.width().value;
            let height = page.height().value;

            let config = PdfRenderConfig::new()
                .set_target_width((width * dpi as f32 / POINTS_PER_INCH) as i32)
                .set_target_height((height * dpi as f32 / POINTS_PER_INCH) as i32);
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| PreviewError::RenderError(format!("{e:?}")))?;

            let mut png_data = Vec::new();
            bitmap
                .as_image()
                .write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)
                .map_err(|e| PreviewError::ImageError(e.to_string()))?;

            pages.push(PageImage {
                page_number: index as u32 + 1,
                width_pts: width,
                height_pts: height,
                png_data,
            });
        }

        Ok(pages)
    }

    /// Number of pages in `path`
    pub fn page_count(&self, path: &Path) -> Result<usize> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| PreviewError::LoadError(format!("{e:?}")))?;
        Ok(document.pages().len() as usize)
    }
}

/// One rendered page with its PNG pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    /// 1-based page number
    pub page_number: u32,
    /// Page width in points
    pub width_pts: f32,
    /// Page height in points
    pub height_pts: f32,
    /// PNG-encoded pixels at the requested resolution
    pub png_data: Vec<u8>,
}

impl PageImage {
    /// PNG size in bytes
    pub fn size(&self) -> usize {
        self.png_data.len()
    }
}
