//! Bookable field model

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FIELDS;

/// A bookable resource, e.g. a beach volley court
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
}

impl Field {
    /// Trim both parts; `None` when either ends up empty
    pub fn normalized(id: &str, name: &str) -> Option<Self> {
        let id = id.trim();
        let name = name.trim();
        if id.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            name: name.to_string(),
        })
    }
}

/// Fields of a fresh document
pub fn default_fields() -> Vec<Field> {
    DEFAULT_FIELDS
        .iter()
        .map(|(id, name)| Field {
            id: (*id).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

/// Keep the first occurrence of each id, preserving order
pub fn dedup_fields(fields: Vec<Field>) -> Vec<Field> {
    let mut seen = HashSet::new();
    fields
        .into_iter()
        .filter(|f| seen.insert(f.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized() {
        assert_eq!(
            Field::normalized("  Padel ", " Padel Court "),
            Some(Field {
                id: "Padel".into(),
                name: "Padel Court".into()
            })
        );
        assert!(Field::normalized("  ", "Name").is_none());
        assert!(Field::normalized("id", "").is_none());
    }

    #[test]
    fn test_dedup_keeps_first() {
        let fields = vec![
            Field::normalized("A", "First").unwrap(),
            Field::normalized("B", "Other").unwrap(),
            Field::normalized("A", "Second").unwrap(),
        ];
        let deduped = dedup_fields(fields);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name, "First");
    }

    #[test]
    fn test_defaults() {
        let ids: Vec<_> = default_fields().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["BeachVolley", "Calcio", "Multi"]);
    }
}
