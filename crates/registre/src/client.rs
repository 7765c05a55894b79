//! Client records and their preferences

use serde::{Deserialize, Serialize};
use tarif::Category;

/// Per-client formatting preferences
///
/// Stored as a JSON blob on the client row. The serialized keys keep
/// the French names historically written by the application, so
/// existing databases decode unchanged. Missing keys take their
/// defaults; a blob that fails to decode falls back to the defaults
/// entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientPreferences {
    /// Delivery address, when it differs from the billing address
    #[serde(rename = "adresse_livraison")]
    pub delivery_address: String,
    /// Extra tax information
    #[serde(rename = "infos_fiscales")]
    pub fiscal_info: String,
    /// Free-form notes
    pub notes: String,
    /// Whether the custom footer is printed
    #[serde(rename = "afficher_pied")]
    pub show_footer: bool,
    /// Custom footer line
    #[serde(rename = "pied_page")]
    pub footer_text: String,
    /// Path to a client-specific logo
    pub logo: String,
    /// Branding color, as "#RRGGBB"
    #[serde(rename = "couleur")]
    pub color: String,
}

impl Default for ClientPreferences {
    fn default() -> Self {
        Self {
            delivery_address: String::new(),
            fiscal_info: String::new(),
            notes: String::new(),
            show_footer: true,
            footer_text: String::new(),
            logo: String::new(),
            color: String::new(),
        }
    }
}

impl ClientPreferences {
    /// Decode a stored preferences blob
    ///
    /// `None`, empty, and undecodable blobs all yield the defaults, so
    /// a half-filled legacy row never blocks loading a client.
    pub fn decode(blob: Option<&str>) -> Self {
        let Some(text) = blob else {
            return Self::default();
        };
        if text.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(text) {
            Ok(preferences) => preferences,
            Err(e) => {
                log::warn!("Undecodable client preferences, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Encode for storage
    pub fn encode(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A client row
///
/// The name is the identity key across the store. Legacy rows may
/// carry no category; such clients are offered an empty product list
/// until they are edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub name: String,
    pub nif: String,
    pub rc: String,
    pub address: String,
    pub category: Option<Category>,
    pub preferences: ClientPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let preferences = ClientPreferences::default();
        assert!(preferences.show_footer);
        assert!(preferences.footer_text.is_empty());
        assert!(preferences.logo.is_empty());
    }

    #[test]
    fn test_decode_absent_or_empty_blob() {
        assert_eq!(ClientPreferences::decode(None), ClientPreferences::default());
        assert_eq!(ClientPreferences::decode(Some("")), ClientPreferences::default());
        assert_eq!(ClientPreferences::decode(Some("  ")), ClientPreferences::default());
    }

    #[test]
    fn test_decode_partial_blob() {
        let preferences =
            ClientPreferences::decode(Some(r#"{"pied_page": "Merci de votre confiance"}"#));
        assert_eq!(preferences.footer_text, "Merci de votre confiance");
        // Absent keys keep their defaults
        assert!(preferences.show_footer);
        assert!(preferences.delivery_address.is_empty());
    }

    #[test]
    fn test_decode_garbage_blob() {
        assert_eq!(
            ClientPreferences::decode(Some("pas du json")),
            ClientPreferences::default()
        );
    }

    #[test]
    fn test_encode_uses_french_keys() {
        let preferences = ClientPreferences {
            delivery_address: "Zone Port".to_string(),
            show_footer: false,
            ..ClientPreferences::default()
        };
        let json = preferences.encode().unwrap();
        assert!(json.contains(r#""adresse_livraison":"Zone Port""#));
        assert!(json.contains(r#""afficher_pied":false"#));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let preferences = ClientPreferences {
            delivery_address: "Km 7, Route de Rosso".to_string(),
            fiscal_info: "Exonéré".to_string(),
            notes: "Livraison le matin".to_string(),
            show_footer: false,
            footer_text: "Conditions de paiement: 30 jours".to_string(),
            logo: "client.png".to_string(),
            color: "#0F4C81".to_string(),
        };
        let blob = preferences.encode().unwrap();
        assert_eq!(ClientPreferences::decode(Some(&blob)), preferences);
    }
}
