//! Binary metadata tables.
//!
//! A [`MetadataTable`] holds `count` entities whose property values are packed
//! column-wise into shared buffers. Construction interprets each property's
//! schema against its buffer views once; reads decode a single entity's value
//! on demand and hand out an owned copy.
//!
//! ```ignore
//! use metadata_table::prelude::*;
//!
//! let class = MetadataClass::new()
//!     .with_property("height", ClassProperty::scalar(ComponentType::Float32));
//! let views = BufferViews::new().with_view(0, BufferView::from_bytes(height_bytes));
//! let table = MetadataTable::new(2, class, [("height", TableProperty::new(0))], &views)?;
//!
//! let h = table.get_property(1, "height")?;
//! ```

mod buffer;
mod layout;
mod options;
mod property;

pub use buffer::{BufferView, BufferViews, TableProperty};
pub use layout::{Arity, ElementKind, Layout};
pub use options::{StringDecoding, TableOptions};
pub use property::{PropertyStore, TypedValues};

use std::collections::HashMap;

use tracing::{debug, debug_span, trace};

use crate::schema::MetadataClass;
use crate::util::{Error, MetadataValue, Result};

/// A table of binary metadata about a collection of entities.
///
/// Immutable once built; safe to share across threads for reading.
#[derive(Clone, Debug)]
pub struct MetadataTable {
    count: usize,
    class: MetadataClass,
    properties: HashMap<String, PropertyStore>,
    options: TableOptions,
}

impl MetadataTable {
    /// Build a table with default options.
    ///
    /// `properties` maps property ids to the buffer views storing them; every
    /// id must be declared by `class`. Any failure aborts construction.
    pub fn new<I, S>(count: usize, class: MetadataClass, properties: I, buffer_views: &BufferViews) -> Result<Self>
    where
        I: IntoIterator<Item = (S, TableProperty)>,
        S: Into<String>,
    {
        Self::new_opts(count, class, properties, buffer_views, TableOptions::default())
    }

    /// Build a table with explicit options.
    pub fn new_opts<I, S>(
        count: usize,
        class: MetadataClass,
        properties: I,
        buffer_views: &BufferViews,
        options: TableOptions,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (S, TableProperty)>,
        S: Into<String>,
    {
        let _span = debug_span!("metadata_table", count).entered();

        let mut stores = HashMap::new();
        for (id, property) in properties {
            let id = id.into();
            let class_property = class
                .get(&id)
                .ok_or_else(|| Error::PropertyNotInClass(id.clone()))?;
            let store = PropertyStore::build(&id, count, &property, class_property, buffer_views)?;
            debug!(
                property = %id,
                layout = ?store.layout(),
                slots = store.slot_count(),
                value_bytes = store.values().as_bytes().len(),
                "initialized property"
            );
            stores.insert(id, store);
        }

        Ok(Self {
            count,
            class,
            properties: stores,
            options,
        })
    }

    /// Number of entities.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The class the properties conform to.
    #[inline]
    pub fn class(&self) -> &MetadataClass {
        &self.class
    }

    #[inline]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Decoded store of a property, if the table stores it.
    #[inline]
    pub fn property(&self, id: &str) -> Option<&PropertyStore> {
        self.properties.get(id)
    }

    /// Stored properties in class declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyStore)> {
        self.class
            .iter()
            .filter_map(|(id, _)| self.properties.get(id).map(|store| (id, store)))
    }

    /// Whether entity `index` has property `id`.
    ///
    /// True when the table stores the property and `index` is a valid entity,
    /// or when the class declares a default for it.
    pub fn has_property(&self, index: usize, id: &str) -> bool {
        (index < self.count && self.properties.contains_key(id))
            || self.class.get(id).is_some_and(|p| p.default.is_some())
    }

    /// Ids of the properties entity `index` has, in class declaration order.
    pub fn get_property_ids(&self, index: usize) -> Vec<&str> {
        let mut results = Vec::new();
        self.get_property_ids_into(index, &mut results);
        results
    }

    /// Append the ids of the properties entity `index` has to `results`.
    pub fn get_property_ids_into<'a, E>(&'a self, index: usize, results: &mut E)
    where
        E: Extend<&'a str>,
    {
        results.extend(
            self.class
                .iter()
                .map(|(id, _)| id)
                .filter(|id| self.has_property(index, id)),
        );
    }

    /// Decode the value of property `id` for entity `index`.
    ///
    /// Returns a fresh copy of the stored value, else a fresh copy of the
    /// class default, else `None`. An index outside `[0, count)` is always
    /// `Error::IndexOutOfRange`, whichever property is asked for.
    pub fn get_property(&self, index: usize, id: &str) -> Result<Option<MetadataValue>> {
        if index >= self.count {
            return Err(Error::IndexOutOfRange { index, count: self.count });
        }

        if let Some(store) = self.properties.get(id) {
            trace!(index, property = id, "decoding stored value");
            return store.decode(id, index, &self.options).map(Some);
        }

        Ok(self.class.get(id).and_then(|p| p.default.clone()))
    }
}
