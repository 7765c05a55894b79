//! Spreadsheet export of the quotation history

use crate::store::{HistoryEntry, DATE_FORMAT};
use crate::Result;
use std::io::Write;

/// Default export file name offered to the user
pub const DEFAULT_EXPORT_NAME: &str = "historique_devis_factures.csv";

/// Column headers, mirroring the history view
const HEADERS: [&str; 8] = [
    "Client",
    "Type",
    "Numéro",
    "Produit",
    "Quantité",
    "Prix Unitaire",
    "Date",
    "Bon de commande",
];

/// Write history entries as CSV
///
/// One row per entry, in the given order, with the same columns the
/// history view displays. Quantities and prices keep their stored
/// precision rather than the two-decimal display format.
pub fn export_csv<W: Write>(entries: &[HistoryEntry], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS)?;

    for entry in entries {
        let quantity = entry.quantity.to_string();
        let unit_price = entry.unit_price.to_string();
        let date = entry.date.format(DATE_FORMAT).to_string();
        csv.write_record([
            entry.client.as_str(),
            entry.kind.as_str(),
            entry.number.as_str(),
            entry.product.as_str(),
            quantity.as_str(),
            unit_price.as_str(),
            date.as_str(),
            entry.purchase_order.as_deref().unwrap_or(""),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
