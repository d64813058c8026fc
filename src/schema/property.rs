//! Class property descriptors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{MetadataEnum, MetadataType};
use crate::util::{ComponentType, MetadataValue};

/// Schema entry for one property of a class.
///
/// This is a flat descriptor: the variant of a property (scalar, vector,
/// array, string, boolean, enum) follows from its fields and is classified
/// once when a table is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct ClassProperty {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub property_type: MetadataType,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub component_type: Option<ComponentType>,
    /// Fixed number of elements per entity; absent for variable-length arrays
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub component_count: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub enum_type: Option<MetadataEnum>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub default: Option<MetadataValue>,
}

impl ClassProperty {
    /// Create a property of the given type with no other fields set.
    pub fn new(property_type: MetadataType) -> Self {
        Self {
            property_type,
            component_type: None,
            component_count: None,
            enum_type: None,
            default: None,
        }
    }

    /// SCALAR property with the given component type.
    pub fn scalar(component_type: ComponentType) -> Self {
        Self::new(MetadataType::Scalar).with_component_type(component_type)
    }

    /// VEC2/VEC3/VEC4 property.
    pub fn vector(property_type: MetadataType, component_type: ComponentType) -> Self {
        Self::new(property_type).with_component_type(component_type)
    }

    pub fn string() -> Self {
        Self::new(MetadataType::String)
    }

    pub fn boolean() -> Self {
        Self::new(MetadataType::Boolean)
    }

    /// ENUM property backed by `enum_type`.
    pub fn enumeration(enum_type: MetadataEnum) -> Self {
        Self::new(MetadataType::Enum).with_enum(enum_type)
    }

    /// ARRAY with `count` elements per entity.
    pub fn fixed_array(component_type: ComponentType, count: usize) -> Self {
        let mut p = Self::new(MetadataType::Array).with_component_type(component_type);
        p.component_count = Some(count);
        p
    }

    /// ARRAY whose length varies per entity.
    pub fn variable_array(component_type: ComponentType) -> Self {
        Self::new(MetadataType::Array).with_component_type(component_type)
    }

    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = Some(component_type);
        self
    }

    pub fn with_enum(mut self, enum_type: MetadataEnum) -> Self {
        self.enum_type = Some(enum_type);
        self
    }

    pub fn with_default(mut self, default: impl Into<MetadataValue>) -> Self {
        self.default = Some(default.into());
        self
    }
}
