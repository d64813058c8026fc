//! Enum definitions referenced by ENUM properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::util::ComponentType;

/// A single named enum value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// Enum definition: a backing integer type plus a value -> name table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct MetadataEnum {
    /// Integer kind each enum value is stored as
    #[cfg_attr(feature = "serde", serde(default = "MetadataEnum::default_value_type"))]
    pub value_type: ComponentType,
    pub values: Vec<EnumValue>,
}

impl MetadataEnum {
    /// Backing type used when none is declared.
    pub const DEFAULT_VALUE_TYPE: ComponentType = ComponentType::Uint16;

    /// Create an empty enum with the given backing type.
    pub fn new(value_type: ComponentType) -> Self {
        Self { value_type, values: Vec::new() }
    }

    /// Add a named value.
    pub fn with_value(mut self, name: impl Into<String>, value: i64) -> Self {
        self.values.push(EnumValue { name: name.into(), value });
        self
    }

    /// Look up the name of an integer value.
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.value == value)
            .map(|v| v.name.as_str())
    }

    #[cfg(feature = "serde")]
    fn default_value_type() -> ComponentType {
        Self::DEFAULT_VALUE_TYPE
    }
}

impl Default for MetadataEnum {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VALUE_TYPE)
    }
}
