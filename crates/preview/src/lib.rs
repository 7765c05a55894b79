//! Preview - PDF page rasterization and viewing session
//!
//! This crate provides:
//! - Page rendering to PNG through the system Pdfium library
//! - A viewing session with clamped page stepping and display zoom
//! - Saving a previewed file to a chosen destination
//!
//! Rendering needs `libpdfium` available at runtime; the session logic
//! does not.
//!
//! # Example
//!
//! ```ignore
//! use preview::{PreviewRenderer, PreviewSession, DEFAULT_DPI};
//!
//! let renderer = PreviewRenderer::new()?;
//! let mut session = PreviewSession::open(&renderer, "devis.pdf".as_ref(), DEFAULT_DPI)?;
//! session.zoom_in();
//! session.next_page();
//! ```

mod renderer;
mod session;

pub use renderer::{PageImage, PreviewRenderer};
pub use session::{save_copy, PreviewSession, ZOOM_STEP};

use thiserror::Error;

/// Default rasterization resolution
pub const DEFAULT_DPI: u32 = 120;

/// Errors that can occur while previewing a document
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Pdfium library unavailable: {0}")]
    BindError(String),

    #[error("Failed to load PDF: {0}")]
    LoadError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for preview operations
pub type Result<T> = std::result::Result<T, PreviewError>;
