//! Product catalogue and static price table

use crate::{Result, TarifError};
use std::fmt;
use std::str::FromStr;

/// Client categories, each with its own product line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ciment,
    Beton,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 2] = [Category::Ciment, Category::Beton];

    /// Identifier stored in the client record
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ciment => "ciment",
            Category::Beton => "beton",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Ciment => "Ciment",
            Category::Beton => "Béton",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TarifError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ciment" => Ok(Category::Ciment),
            "beton" | "béton" => Ok(Category::Beton),
            other => Err(TarifError::UnknownCategory(other.to_string())),
        }
    }
}

/// A catalogue entry
///
/// A `None` unit price means the designation has no table price and the
/// price is always entered manually. A zero price is a real table entry
/// whose price has not been set yet; it pre-fills the field like any
/// other and never blocks document generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Product {
    /// Designation printed on the document
    pub designation: &'static str,
    /// Category under which the product is offered
    pub category: Category,
    /// Table unit price in MRU, if the table carries one
    pub unit_price: Option<f64>,
}

impl Product {
    const fn new(
        designation: &'static str,
        category: Category,
        unit_price: Option<f64>,
    ) -> Self {
        Self {
            designation,
            category,
            unit_price,
        }
    }
}

/// Full catalogue, in selection order
pub static CATALOGUE: [Product; 13] = [
    Product::new("Ciment 42.5", Category::Ciment, None),
    Product::new("Ciment 32.5", Category::Ciment, None),
    Product::new("Ciment SR", Category::Ciment, None),
    Product::new("Béton C15", Category::Beton, Some(4300.0)),
    Product::new("Béton C20", Category::Beton, Some(4500.0)),
    Product::new("Béton C20 SR", Category::Beton, Some(4700.0)),
    Product::new("Béton C25", Category::Beton, Some(4700.0)),
    Product::new("Béton C25 SR", Category::Beton, Some(5700.0)),
    Product::new("Béton C45 SR", Category::Beton, Some(0.0)),
    Product::new("Béton C30", Category::Beton, Some(0.0)),
    Product::new("Béton C30 SR", Category::Beton, Some(7772.0)),
    Product::new("Béton C35 SR", Category::Beton, Some(8352.0)),
    Product::new("Béton C15 SR", Category::Beton, Some(4300.0)),
];

/// Products offered to a client of the given category, in catalogue order
pub fn products(category: Category) -> impl Iterator<Item = &'static Product> {
    CATALOGUE.iter().filter(move |p| p.category == category)
}

/// Designations offered to a client of the given category
pub fn designations(category: Category) -> Vec<&'static str> {
    products(category).map(|p| p.designation).collect()
}

/// Table unit price for a designation
///
/// `None` means the designation is absent from the price table and the
/// price must be entered manually.
pub fn unit_price(designation: &str) -> Option<f64> {
    CATALOGUE
        .iter()
        .find(|p| p.designation == designation)
        .and_then(|p| p.unit_price)
}

/// Designations whose table price is still zero
///
/// These entries mark incomplete price data worth reviewing; they stay
/// selectable and generate documents like any other.
pub fn zero_priced() -> Vec<&'static str> {
    CATALOGUE
        .iter()
        .filter(|p| p.unit_price == Some(0.0))
        .map(|p| p.designation)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        assert_eq!("ciment".parse::<Category>().unwrap(), Category::Ciment);
        assert_eq!("beton".parse::<Category>().unwrap(), Category::Beton);
        assert_eq!(Category::Ciment.to_string(), "ciment");
        assert_eq!(Category::Beton.to_string(), "beton");
    }

    #[test]
    fn test_category_parse_is_lenient() {
        assert_eq!("Béton".parse::<Category>().unwrap(), Category::Beton);
        assert_eq!(" CIMENT ".parse::<Category>().unwrap(), Category::Ciment);
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        let result = "gravier".parse::<Category>();
        assert!(result.is_err());
    }

    #[test]
    fn test_designations_by_category() {
        assert_eq!(
            designations(Category::Ciment),
            vec!["Ciment 42.5", "Ciment 32.5", "Ciment SR"]
        );

        let beton = designations(Category::Beton);
        assert_eq!(beton.len(), 10);
        assert_eq!(beton[0], "Béton C15");
        assert_eq!(beton[5], "Béton C45 SR");
        assert_eq!(beton[9], "Béton C15 SR");
    }

    #[test]
    fn test_unit_price_lookup() {
        assert_eq!(unit_price("Béton C20"), Some(4500.0));
        assert_eq!(unit_price("Béton C30 SR"), Some(7772.0));
        assert_eq!(unit_price("Béton C15 SR"), Some(4300.0));
    }

    #[test]
    fn test_unit_price_absent_entries() {
        // Cement designations have no table price, the field stays manual
        assert_eq!(unit_price("Ciment 42.5"), None);
        assert_eq!(unit_price("Gravier"), None);
    }

    #[test]
    fn test_zero_priced_entries() {
        assert_eq!(zero_priced(), vec!["Béton C45 SR", "Béton C30"]);
    }
}
