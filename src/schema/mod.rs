//! Schema descriptors consumed by metadata tables.
//!
//! Classes are supplied from outside (usually parsed from tileset or glTF
//! JSON); this module only models them.

mod class;
mod enums;
mod property;
mod types;

pub use class::MetadataClass;
pub use enums::{EnumValue, MetadataEnum};
pub use property::ClassProperty;
pub use types::MetadataType;
