//! Top-level property type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::util::ComponentType;

/// The `type` of a class property.
///
/// Numeric kinds may appear directly as the type (a bare scalar), or through
/// SCALAR/VECN with a separate component type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "UPPERCASE"))]
pub enum MetadataType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Boolean,
    String,
    Enum,
    Array,
}

impl MetadataType {
    /// Returns the name of this type as spelled in table JSON.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "INT8",
            Self::Uint8 => "UINT8",
            Self::Int16 => "INT16",
            Self::Uint16 => "UINT16",
            Self::Int32 => "INT32",
            Self::Uint32 => "UINT32",
            Self::Int64 => "INT64",
            Self::Uint64 => "UINT64",
            Self::Float32 => "FLOAT32",
            Self::Float64 => "FLOAT64",
            Self::Scalar => "SCALAR",
            Self::Vec2 => "VEC2",
            Self::Vec3 => "VEC3",
            Self::Vec4 => "VEC4",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Enum => "ENUM",
            Self::Array => "ARRAY",
        }
    }

    /// Parse a type from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "SCALAR" => Self::Scalar,
            "VEC2" => Self::Vec2,
            "VEC3" => Self::Vec3,
            "VEC4" => Self::Vec4,
            "ARRAY" => Self::Array,
            other => return ComponentType::from_name(other).map(Self::from),
        })
    }

    /// Number of lanes of a vector type.
    #[inline]
    pub const fn vector_dimension(self) -> Option<usize> {
        match self {
            Self::Vec2 => Some(2),
            Self::Vec3 => Some(3),
            Self::Vec4 => Some(4),
            _ => None,
        }
    }

    /// The component type this type names directly, if any.
    ///
    /// SCALAR, VECN and ARRAY defer to the property's `componentType`.
    pub const fn as_component_type(self) -> Option<ComponentType> {
        Some(match self {
            Self::Int8 => ComponentType::Int8,
            Self::Uint8 => ComponentType::Uint8,
            Self::Int16 => ComponentType::Int16,
            Self::Uint16 => ComponentType::Uint16,
            Self::Int32 => ComponentType::Int32,
            Self::Uint32 => ComponentType::Uint32,
            Self::Int64 => ComponentType::Int64,
            Self::Uint64 => ComponentType::Uint64,
            Self::Float32 => ComponentType::Float32,
            Self::Float64 => ComponentType::Float64,
            Self::Boolean => ComponentType::Boolean,
            Self::String => ComponentType::String,
            Self::Enum => ComponentType::Enum,
            Self::Scalar | Self::Vec2 | Self::Vec3 | Self::Vec4 | Self::Array => return None,
        })
    }
}

impl From<ComponentType> for MetadataType {
    fn from(ct: ComponentType) -> Self {
        match ct {
            ComponentType::Int8 => Self::Int8,
            ComponentType::Uint8 => Self::Uint8,
            ComponentType::Int16 => Self::Int16,
            ComponentType::Uint16 => Self::Uint16,
            ComponentType::Int32 => Self::Int32,
            ComponentType::Uint32 => Self::Uint32,
            ComponentType::Int64 => Self::Int64,
            ComponentType::Uint64 => Self::Uint64,
            ComponentType::Float32 => Self::Float32,
            ComponentType::Float64 => Self::Float64,
            ComponentType::Boolean => Self::Boolean,
            ComponentType::String => Self::String,
            ComponentType::Enum => Self::Enum,
        }
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
