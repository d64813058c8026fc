//! Utility types shared by the schema and table layers.
//!
//! This module contains fundamental types used throughout the library:
//! - [`ComponentType`], [`OffsetType`], [`StorageType`] - binary kinds
//! - [`MetadataValue`] / [`Number`] - decoded values
//! - [`Error`] / [`Result`] - Error handling

mod component_type;
mod error;
mod value;

pub use component_type::*;
pub use error::*;
pub use value::*;
