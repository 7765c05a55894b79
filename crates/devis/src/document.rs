//! Document request types and totals

use crate::company;
use crate::{DevisError, Result};
use chrono::NaiveDate;
use registre::ClientPreferences;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Date format used in the document body and in file names
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two document types that share the same layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Devis,
    Facture,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Devis => "devis",
            DocumentKind::Facture => "facture",
        }
    }

    /// Banner title, e.g. "DEVIS"
    pub fn title(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = DevisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "devis" => Ok(DocumentKind::Devis),
            "facture" => Ok(DocumentKind::Facture),
            other => Err(DevisError::UnknownKind(other.to_string())),
        }
    }
}

/// Everything the composer needs to produce one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    pub number: String,
    pub client_name: String,
    pub nif: String,
    pub rc: String,
    pub address: String,
    pub purchase_order: Option<String>,
    pub product: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub date: NaiveDate,
    pub preferences: ClientPreferences,
    /// Path of the company logo image, tolerated missing
    pub logo_path: PathBuf,
}

impl DocumentRequest {
    /// Default output name: `{kind}_{client}_{number}_{date}.pdf`
    pub fn default_file_name(&self) -> String {
        format!(
            "{}_{}_{}_{}.pdf",
            self.kind,
            self.client_name,
            self.number,
            self.date.format(DATE_FORMAT)
        )
    }
}

/// Monetary totals derived from a single line item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Amount before tax
    pub ht: f64,
    /// Tax amount
    pub tva: f64,
    /// Amount including tax
    pub ttc: f64,
}

impl Totals {
    pub fn compute(quantity: f64, unit_price: f64) -> Self {
        let ht = quantity * unit_price;
        let tva = ht * company::VAT_RATE;
        Totals {
            ht,
            tva,
            ttc: ht + tva,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_round_trip() {
        assert_eq!("devis".parse::<DocumentKind>().unwrap(), DocumentKind::Devis);
        assert_eq!(
            "facture".parse::<DocumentKind>().unwrap(),
            DocumentKind::Facture
        );
        assert_eq!(DocumentKind::Devis.to_string(), "devis");
        assert_eq!(DocumentKind::Facture.title(), "FACTURE");
    }

    #[test]
    fn test_kind_parse_is_lenient() {
        assert_eq!(
            " Facture ".parse::<DocumentKind>().unwrap(),
            DocumentKind::Facture
        );
        assert!("avoir".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_totals() {
        let totals = Totals::compute(10.0, 100.0);
        assert_eq!(totals.ht, 1000.0);
        assert_eq!(totals.tva, 160.0);
        assert_eq!(totals.ttc, 1160.0);
    }

    #[test]
    fn test_totals_formatted() {
        let totals = Totals::compute(3.5, 4700.0);
        assert_eq!(tarif::format_amount(totals.ht), "16,450.00");
        assert_eq!(tarif::format_amount(totals.tva), "2,632.00");
        assert_eq!(tarif::format_amount(totals.ttc), "19,082.00");
    }

    #[test]
    fn test_default_file_name() {
        let request = DocumentRequest {
            kind: DocumentKind::Devis,
            number: "2024-001".to_string(),
            client_name: "ACME".to_string(),
            nif: String::new(),
            rc: String::new(),
            address: String::new(),
            purchase_order: None,
            product: "Béton C20".to_string(),
            quantity: 10.0,
            unit_price: 4500.0,
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            preferences: ClientPreferences::default(),
            logo_path: PathBuf::from("MAFCI.png"),
        };
        assert_eq!(
            request.default_file_name(),
            "devis_ACME_2024-001_2024-06-15.pdf"
        );
    }
}
