//! Viewing session over rendered pages

use crate::renderer::{PageImage, PreviewRenderer};
use crate::{PreviewError, Result};
use std::fs;
use std::path::Path;

/// Zoom multiplier per step
pub const ZOOM_STEP: f64 = 1.2;

/// Stepping and zoom state over the rendered pages of one document
///
/// Pages are rendered once; zooming only changes the display scale.
#[derive(Debug)]
pub struct PreviewSession {
    pages: Vec<PageImage>,
    current: usize,
    zoom: f64,
}

impl PreviewSession {
    /// Wrap rendered pages; at least one page is required
    pub fn new(pages: Vec<PageImage>) -> Result<Self> {
        if pages.is_empty() {
            return Err(PreviewError::LoadError("Document has no pages".to_string()));
        }
        Ok(Self {
            pages,
            current: 0,
            zoom: 1.0,
        })
    }

    /// Render `path` and open a session over the result
    pub fn open(renderer: &PreviewRenderer, path: &Path, dpi: u32) -> Result<Self> {
        Self::new(renderer.render_pages(path, dpi)?)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based number of the page on display
    pub fn page_number(&self) -> usize {
        self.current + 1
    }

    pub fn current_page(&self) -> &PageImage {
        &self.pages[self.current]
    }

    /// Step forward; returns false when already on the last page
    pub fn next_page(&mut self) -> bool {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Step backward; returns false when already on the first page
    pub fn previous_page(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Increase the display zoom by one step and return the new factor
    pub fn zoom_in(&mut self) -> f64 {
        self.zoom *= ZOOM_STEP;
        self.zoom
    }

    /// Decrease the display zoom by one step and return the new factor
    pub fn zoom_out(&mut self) -> f64 {
        self.zoom /= ZOOM_STEP;
        self.zoom
    }

    /// Current page size in points, scaled by the display zoom
    pub fn display_size(&self) -> (f64, f64) {
        let page = self.current_page();
        (
            page.width_pts as f64 * self.zoom,
            page.height_pts as f64 * self.zoom,
        )
    }
}

/// Save a previewed file by copying it to `destination`
pub fn save_copy(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination)?;
    Ok(())
}
