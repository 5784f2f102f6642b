//! Cat breeds as published by the breed catalog.

use serde::{Deserialize, Serialize};

/// A breed entry.
///
/// Only `name` takes part in validation; the remaining fields are carried
/// through for callers that display them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub temperament: String,
}

impl Breed {
    /// A breed with only a name, as used by fixed catalogs.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            origin: String::new(),
            temperament: String::new(),
        }
    }
}

/// Exact, case-sensitive lookup of `name` in `breeds`.
#[must_use]
pub fn contains_breed(breeds: &[Breed], name: &str) -> bool {
    breeds.iter().any(|b| b.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        let breeds = vec![Breed::named("Siamese"), Breed::named("Bengal")];
        assert!(contains_breed(&breeds, "Siamese"));
        assert!(!contains_breed(&breeds, "siamese"));
        assert!(!contains_breed(&breeds, "Dragon"));
    }

    #[test]
    fn decodes_catalog_entry_with_extra_fields() {
        let json = r#"{"id":"abys","name":"Abyssinian","origin":"Egypt","weight":{"metric":"3 - 5"}}"#;
        let breed: Breed = serde_json::from_str(json).unwrap();
        assert_eq!(breed.id, "abys");
        assert_eq!(breed.name, "Abyssinian");
        assert!(breed.description.is_empty());
    }
}
