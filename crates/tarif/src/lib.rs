//! Tarif - product catalogue and pricing
//!
//! This crate provides:
//! - The client categories (ciment, béton) and the products offered
//!   under each, in catalogue order
//! - The static unit-price table that pre-fills the price field
//! - A data-quality report for zero-priced table entries
//! - Monetary amount formatting for generated documents
//!
//! # Example
//!
//! ```ignore
//! use tarif::{designations, format_amount, unit_price, Category};
//!
//! // Products offered to a "beton" client
//! let offered = designations(Category::Beton);
//!
//! // Pre-fill the unit price field
//! let price = unit_price("Béton C20"); // Some(4500.0)
//!
//! // Display format for monetary cells
//! let cell = format_amount(4500.0); // "4,500.00"
//! ```

mod catalogue;
mod formatter;

pub use catalogue::{designations, products, unit_price, zero_priced, Category, Product, CATALOGUE};
pub use formatter::format_amount;

use thiserror::Error;

/// Errors that can occur during catalogue lookups
#[derive(Debug, Error)]
pub enum TarifError {
    #[error("Unknown client category: {0}")]
    UnknownCategory(String),
}

/// Result type for catalogue operations
pub type Result<T> = std::result::Result<T, TarifError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_pre_fill() {
        assert_eq!(unit_price("Béton C15"), Some(4300.0));
        assert_eq!(unit_price("Ciment 42.5"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(1160.0), "1,160.00");
    }
}
