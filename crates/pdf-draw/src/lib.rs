//! PDF Draw - Single-page PDF composition
//!
//! This crate provides functionality for:
//! - Building a one-page A4 document from scratch
//! - Drawing text with the standard Helvetica family (WinAnsi encoded)
//! - Drawing lines, rectangles and rounded rectangles
//! - Embedding images (JPEG, PNG)
//!
//! # Example
//!
//! ```ignore
//! use pdf_draw::{Align, Font, Page};
//!
//! let mut page = Page::a4();
//! page.set_font(Font::HelveticaBold, 16.0);
//! page.draw_text("DEVIS", 100.0, 700.0, Align::Left);
//! page.save("output.pdf")?;
//! ```

mod document;
mod font;
mod image;
mod shapes;
mod text;

pub use document::{Color, Page};
pub use font::{encode_text_hex, encode_win_ansi, Font};

use thiserror::Error;

/// A4 page width in points
pub const A4_WIDTH: f64 = 595.28;

/// A4 page height in points
pub const A4_HEIGHT: f64 = 841.89;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
