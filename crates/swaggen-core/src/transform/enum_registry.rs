use std::collections::{HashMap, HashSet};

use heck::ToUpperCamelCase;
use indexmap::IndexMap;

use super::name_normalizer::normalize_name;
use crate::view::{EnumDefinition, EnumType};

/// Allocates enum names that are unique within one build.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    issued: HashSet<String>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `IEnum<N>` without a hint, `I<Hint>` with one. Collisions get a numeric
    /// suffix starting at 1.
    pub fn allocate(&mut self, hint: Option<&str>) -> String {
        let base = match hint.map(|h| normalize_name(h).to_upper_camel_case()) {
            Some(name) if !name.is_empty() => format!("I{name}"),
            _ => format!("IEnum{}", self.issued.len()),
        };

        let mut candidate = base.clone();
        let mut counter = 0;
        while self.issued.contains(&candidate) {
            counter += 1;
            candidate = format!("{base}{counter}");
        }

        self.issued.insert(candidate.clone());
        candidate
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

/// Every enum occurrence seen during a build.
///
/// The same enum is often reached more than once (a shared parameter used by two
/// paths, a definition resolved twice). Occurrences with the same hint and values
/// reuse the name allocated for the first one.
#[derive(Debug, Default)]
pub struct EnumCatalog {
    registry: EnumRegistry,
    by_shape: HashMap<String, String>,
    occurrences: Vec<EnumDefinition>,
}

impl EnumCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an enum occurrence and return its resolved form.
    pub fn intern(
        &mut self,
        hint: Option<&str>,
        values: &[serde_json::Value],
        description: Option<&str>,
    ) -> EnumType {
        let shape = format!(
            "{}|{}",
            hint.unwrap_or_default(),
            serde_json::Value::Array(values.to_vec())
        );

        let name = match self.by_shape.get(&shape) {
            Some(name) => name.clone(),
            None => {
                let name = self.registry.allocate(hint);
                self.by_shape.insert(shape, name.clone());
                name
            }
        };

        self.occurrences.push(EnumDefinition {
            name: name.clone(),
            values: values.to_vec(),
            description: description.map(str::to_string),
        });

        EnumType {
            name,
            values: values.to_vec(),
        }
    }

    /// One definition per allocated name, in first-seen order.
    pub fn into_definitions(self) -> Vec<EnumDefinition> {
        let mut unique: IndexMap<String, EnumDefinition> = IndexMap::new();
        for occurrence in self.occurrences {
            unique.entry(occurrence.name.clone()).or_insert(occurrence);
        }
        unique.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_allocate_without_hint() {
        let mut registry = EnumRegistry::new();
        assert_eq!(registry.allocate(None), "IEnum0");
        assert_eq!(registry.allocate(None), "IEnum1");
    }

    #[test]
    fn test_allocate_with_hint() {
        let mut registry = EnumRegistry::new();
        assert_eq!(registry.allocate(Some("status")), "IStatus");
        assert_eq!(registry.allocate(Some("sort-order")), "ISortOrder");
    }

    #[test]
    fn test_collisions_get_suffix() {
        let mut registry = EnumRegistry::new();
        assert_eq!(registry.allocate(Some("status")), "IStatus");
        assert_eq!(registry.allocate(Some("status")), "IStatus1");
        assert_eq!(registry.allocate(Some("status")), "IStatus2");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_allocations_are_unique() {
        let mut registry = EnumRegistry::new();
        let hints = [Some("a"), None, Some("a"), Some("enum0"), None, Some("IEnum")];
        let names: Vec<String> = hints.iter().map(|h| registry.allocate(*h)).collect();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_catalog_reuses_name_for_same_shape() {
        let mut catalog = EnumCatalog::new();
        let values = vec![json!("asc"), json!("desc")];
        let first = catalog.intern(Some("order"), &values, None);
        let second = catalog.intern(Some("order"), &values, Some("again"));
        assert_eq!(first.name, "IOrder");
        assert_eq!(second.name, "IOrder");

        let defs = catalog.into_definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].description, None);
    }

    #[test]
    fn test_catalog_distinct_values_get_distinct_names() {
        let mut catalog = EnumCatalog::new();
        let a = catalog.intern(Some("status"), &[json!("open")], None);
        let b = catalog.intern(Some("status"), &[json!("closed")], None);
        assert_ne!(a.name, b.name);
        assert_eq!(catalog.into_definitions().len(), 2);
    }
}
