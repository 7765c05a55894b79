//! Registre - client and quotation records
//!
//! This crate provides:
//! - A SQLite-backed store holding the `clients` and `quotations` tables
//! - Typed client records with per-client formatting preferences
//! - An append-only quotation log with filtered history queries
//! - CSV export of the history view
//!
//! The schema is created on first open. Databases written by earlier
//! releases are migrated in place with explicit, idempotent column
//! additions, gated by `PRAGMA user_version`.
//!
//! # Example
//!
//! ```ignore
//! use registre::{HistoryFilter, Store};
//!
//! let store = Store::open("clients.db")?;
//! let client = store.client_by_name("ACME")?;
//! let entries = store.history(&HistoryFilter::default())?;
//! ```

mod client;
mod export;
mod store;

pub use client::{Client, ClientPreferences};
pub use export::{export_csv, DEFAULT_EXPORT_NAME};
pub use store::{HistoryEntry, HistoryFilter, QuotationRecord, Store, SCHEMA_VERSION};

use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Client already exists: {0}")]
    DuplicateClient(String),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Preferences encoding failed: {0}")]
    Preferences(#[from] serde_json::Error),

    #[error("Export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_creates_schema() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.client_names(None).unwrap().is_empty());
        assert!(store.history(&HistoryFilter::default()).unwrap().is_empty());
    }
}
