//! Fixed company identity printed on every document

use pdf_draw::Color;

/// Letterhead lines, printed under the logo
pub const COMPANY_LINES: [&str; 6] = [
    "Société Mauritano-Française des ciments",
    "Tel:+222 45 29 85 56 / mob:+222 45 29 48 17",
    "Email : info@mafci.mr",
    "Route de Rosso, Zone Port, Nouakchott-Mauritanie",
    "Capital: 431.000.000 MRU",
    "RC: 200721 / NIF: 30400224",
];

/// Account reference encoded into the payment QR code
pub const IBAN: &str = "MR130030000101006313901-73";

/// Payment block lines, printed above the footer
pub const PAYMENT_LINES: [&str; 4] = [
    "Banque : BAMIS",
    "Compte :  00001 01006313901-73",
    "IBAN : MR130030000101006313901-73",
    "Devise : MRU",
];

/// Heading of the payment block
pub const PAYMENT_HEADING: &str = "Paiement par virement bancaire uniquement :";

/// VAT rate applied to every line
pub const VAT_RATE: f64 = 0.16;

/// Background of the document type banner
pub fn banner_color() -> Color {
    Color::rgb(0.19, 0.44, 0.72)
}

/// Background of the items table header row
pub fn header_background() -> Color {
    Color::from_rgb(234, 241, 251)
}
