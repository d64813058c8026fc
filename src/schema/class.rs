//! Metadata class - ordered property descriptors.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ClassProperty;

/// A class: property id -> descriptor, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetadataClass {
    #[cfg_attr(feature = "serde", serde(default))]
    properties: IndexMap<String, ClassProperty>,
}

impl MetadataClass {
    /// Create an empty class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, keeping declaration order.
    pub fn with_property(mut self, id: impl Into<String>, property: ClassProperty) -> Self {
        self.insert(id, property);
        self
    }

    /// Insert or replace a property. Replacing keeps the original position.
    pub fn insert(&mut self, id: impl Into<String>, property: ClassProperty) {
        self.properties.insert(id.into(), property);
    }

    /// Get a property by id.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&ClassProperty> {
        self.properties.get(id)
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.properties.contains_key(id)
    }

    /// Iterate over `(id, property)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassProperty)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<(String, ClassProperty)> for MetadataClass {
    fn from_iter<T: IntoIterator<Item = (String, ClassProperty)>>(iter: T) -> Self {
        Self { properties: iter.into_iter().collect() }
    }
}
