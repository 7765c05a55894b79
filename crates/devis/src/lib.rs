//! Devis - quotation and invoice composition
//!
//! This crate provides:
//! - The document request type and its derived totals
//! - A fixed-layout A4 composer with the company letterhead
//! - Payment QR code embedding
//!
//! # Example
//!
//! ```ignore
//! use devis::{compose, DocumentKind, DocumentRequest};
//!
//! let request = DocumentRequest {
//!     kind: DocumentKind::Devis,
//!     number: "2024-001".to_string(),
//!     // client identity, line item, date, preferences...
//! };
//! compose(&request, request.default_file_name())?;
//! ```

mod company;
mod composer;
mod document;

pub use company::VAT_RATE;
pub use composer::{compose, compose_bytes};
pub use document::{DocumentKind, DocumentRequest, Totals, DATE_FORMAT};

use thiserror::Error;

/// Errors that can occur while composing a document
#[derive(Debug, Error)]
pub enum DevisError {
    #[error("Unknown document kind: {0}")]
    UnknownKind(String),

    #[error("QR code error: {0}")]
    QrError(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_draw::PdfError),
}

/// Result type for composition operations
pub type Result<T> = std::result::Result<T, DevisError>;
