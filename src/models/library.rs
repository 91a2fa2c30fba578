//! Library catalog
//!
//! Reference nutrient and price profiles per item, independent of current
//! stock level. Created and edited by the librarian collaborator.

use serde::{Deserialize, Serialize};

use super::{NutrientVector, ValidationError};
use crate::units::Unit;

/// Reference data for one catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    /// Quantity the reference price applies to
    pub reference_quantity: f64,
    pub reference_unit: Unit,
    pub price: f64,
    pub nutrient_per_100: NutrientVector,
}

impl LibraryEntry {
    /// Check creation inputs before the entry enters the engine
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.reference_quantity <= 0.0 {
            return Err(ValidationError::NonPositiveQuantity(self.reference_quantity));
        }
        if self.price < 0.0 {
            return Err(ValidationError::NegativePrice(self.price));
        }
        Ok(())
    }
}

/// The catalog collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    entries: Vec<LibraryEntry>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LibraryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact (name, brand) lookup
    pub fn find(&self, name: &str, brand: Option<&str>) -> Option<&LibraryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name && entry.brand.as_deref() == brand)
    }

    /// Insert a new entry or replace the one with the same (name, brand)
    pub fn upsert(&mut self, entry: LibraryEntry) {
        match self
            .entries
            .iter()
            .position(|e| e.name == entry.name && e.brand == entry.brand)
        {
            Some(index) => self.entries[index] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Remove an entry by (name, brand), returning it if present
    pub fn remove(&mut self, name: &str, brand: Option<&str>) -> Option<LibraryEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.name == name && entry.brand.as_deref() == brand)?;
        Some(self.entries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> LibraryEntry {
        LibraryEntry {
            name: "Rice".to_string(),
            brand: None,
            category: "grains".to_string(),
            reference_quantity: 100.0,
            reference_unit: Unit::Gram,
            price: 0.5,
            nutrient_per_100: NutrientVector::from_pairs([("kcal", 130.0)]).unwrap(),
        }
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let mut entry = rice();
        entry.name = "  ".to_string();
        assert_eq!(entry.validate(), Err(ValidationError::EmptyName));

        let mut entry = rice();
        entry.reference_quantity = 0.0;
        assert_eq!(
            entry.validate(),
            Err(ValidationError::NonPositiveQuantity(0.0))
        );

        let mut entry = rice();
        entry.price = -1.0;
        assert_eq!(entry.validate(), Err(ValidationError::NegativePrice(-1.0)));

        assert_eq!(rice().validate(), Ok(()));
    }

    #[test]
    fn test_find_is_exact_on_name_and_brand() {
        let mut library = Library::new();
        library.upsert(rice());
        let mut branded = rice();
        branded.brand = Some("Acme".to_string());
        branded.price = 0.8;
        library.upsert(branded);

        assert_eq!(library.find("Rice", None).unwrap().price, 0.5);
        assert_eq!(library.find("Rice", Some("Acme")).unwrap().price, 0.8);
        assert!(library.find("rice", None).is_none());
    }

    #[test]
    fn test_upsert_replaces_same_item() {
        let mut library = Library::new();
        library.upsert(rice());
        let mut updated = rice();
        updated.price = 0.6;
        library.upsert(updated);

        assert_eq!(library.len(), 1);
        assert_eq!(library.find("Rice", None).unwrap().price, 0.6);
    }

    #[test]
    fn test_remove() {
        let mut library = Library::from_entries(vec![rice()]);
        assert!(library.remove("Rice", None).is_some());
        assert!(library.is_empty());
        assert!(library.remove("Rice", None).is_none());
    }
}
