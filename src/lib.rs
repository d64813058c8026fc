//! # metadata-table
//!
//! Decoder for columnar binary metadata tables, the property tables used by
//! 3D Tiles and glTF structural metadata.
//!
//! A table describes `count` entities. Each property is one column whose
//! values are packed into shared little-endian buffers: fixed and
//! variable-length arrays, offset-delimited strings, bit-packed booleans and
//! enums. The table interprets the schema against those buffers once and
//! decodes individual values on request, without materializing the table.
//!
//! ## Modules
//!
//! - [`util`] - Binary kinds, decoded values, errors
//! - [`schema`] - Class, property and enum descriptors
//! - [`table`] - Buffer views, property stores and the table itself
//!
//! ## Example
//!
//! ```ignore
//! use metadata_table::prelude::*;
//!
//! let class = MetadataClass::new()
//!     .with_property("name", ClassProperty::string());
//! let views = BufferViews::new()
//!     .with_view(0, BufferView::from_bytes(b"oakpine".to_vec()))
//!     .with_view(1, BufferView::from_bytes(string_offsets));
//! let table = MetadataTable::new(
//!     2,
//!     class,
//!     [("name", TableProperty::new(0).with_string_offsets(1))],
//!     &views,
//! )?;
//!
//! assert_eq!(table.get_property(1, "name")?, Some("pine".into()));
//! ```

pub mod util;
pub mod schema;
pub mod table;

// Re-export commonly used types
pub use util::{ComponentType, Error, MetadataValue, Number, OffsetType, Result};
pub use schema::{ClassProperty, MetadataClass, MetadataEnum, MetadataType};
pub use table::{BufferView, BufferViews, MetadataTable, TableOptions, TableProperty};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{ComponentType, Error, MetadataValue, Number, OffsetType, Result};
    pub use crate::schema::{ClassProperty, EnumValue, MetadataClass, MetadataEnum, MetadataType};
    pub use crate::table::{
        BufferView, BufferViews, MetadataTable, StringDecoding, TableOptions, TableProperty,
    };
}
