//! Component, offset and storage types - the fundamental binary kinds of a table.

use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Number;

/// Component type of a property.
///
/// Used for the elements of ARRAY properties, the lanes of SCALAR/VECN
/// properties and the backing integer of enums.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "UPPERCASE"))]
pub enum ComponentType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    /// Declared by the format but never decodable here
    Uint64,
    Float32,
    Float64,
    Boolean,
    String,
    Enum,
}

impl ComponentType {
    /// Returns the name of this type as spelled in table JSON.
    #[inline]
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
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::Enum => "ENUM",
        }
    }

    /// Parse a component type from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "INT8" => Self::Int8,
            "UINT8" => Self::Uint8,
            "INT16" => Self::Int16,
            "UINT16" => Self::Uint16,
            "INT32" => Self::Int32,
            "UINT32" => Self::Uint32,
            "INT64" => Self::Int64,
            "UINT64" => Self::Uint64,
            "FLOAT32" => Self::Float32,
            "FLOAT64" => Self::Float64,
            "BOOLEAN" => Self::Boolean,
            "STRING" => Self::String,
            "ENUM" => Self::Enum,
            _ => return None,
        })
    }

    /// Returns true if this is a numeric type (int or float).
    #[inline]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns true if this is an integer type.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Uint8
                | Self::Int16
                | Self::Uint16
                | Self::Int32
                | Self::Uint32
                | Self::Int64
                | Self::Uint64
        )
    }

    /// Storage type of a numeric component.
    ///
    /// Returns `None` for UINT64 and for the non-numeric kinds.
    #[inline]
    pub const fn storage_type(self) -> Option<StorageType> {
        Some(match self {
            Self::Int8 => StorageType::Int8,
            Self::Uint8 => StorageType::Uint8,
            Self::Int16 => StorageType::Int16,
            Self::Uint16 => StorageType::Uint16,
            Self::Int32 => StorageType::Int32,
            Self::Uint32 => StorageType::Uint32,
            Self::Int64 => StorageType::Int64,
            Self::Float32 => StorageType::Float32,
            Self::Float64 => StorageType::Float64,
            Self::Uint64 | Self::Boolean | Self::String | Self::Enum => return None,
        })
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Offset Type
// ============================================================================

/// Integer kind of array and string offset buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "UPPERCASE"))]
pub enum OffsetType {
    Uint8,
    Uint16,
    #[default]
    Uint32,
    Uint64,
}

impl OffsetType {
    /// Returns the name of this type as spelled in table JSON.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uint8 => "UINT8",
            Self::Uint16 => "UINT16",
            Self::Uint32 => "UINT32",
            Self::Uint64 => "UINT64",
        }
    }

    /// Storage type used to read offsets, `None` for UINT64.
    #[inline]
    pub const fn storage_type(self) -> Option<StorageType> {
        match self {
            Self::Uint8 => Some(StorageType::Uint8),
            Self::Uint16 => Some(StorageType::Uint16),
            Self::Uint32 => Some(StorageType::Uint32),
            Self::Uint64 => None,
        }
    }
}

impl fmt::Display for OffsetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Storage Type
// ============================================================================

/// Little-endian element kind of a decoded values buffer.
///
/// Strings and booleans are stored as raw `Uint8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Float32,
    Float64,
}

impl StorageType {
    /// Returns the size in bytes of a single element of this type.
    #[inline]
    pub const fn num_bytes(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int64 | Self::Float64 => 8,
        }
    }

    /// Returns true if this is a floating point type.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Read element `index` as an integer. Floats are truncated.
    ///
    /// `bytes` must hold at least `(index + 1) * num_bytes()` bytes.
    #[inline]
    pub fn read_i64(self, bytes: &[u8], index: usize) -> i64 {
        let at = &bytes[index * self.num_bytes()..];
        match self {
            Self::Int8 => at[0] as i8 as i64,
            Self::Uint8 => at[0] as i64,
            Self::Int16 => LittleEndian::read_i16(at) as i64,
            Self::Uint16 => LittleEndian::read_u16(at) as i64,
            Self::Int32 => LittleEndian::read_i32(at) as i64,
            Self::Uint32 => LittleEndian::read_u32(at) as i64,
            Self::Int64 => LittleEndian::read_i64(at),
            Self::Float32 => LittleEndian::read_f32(at) as i64,
            Self::Float64 => LittleEndian::read_f64(at) as i64,
        }
    }

    /// Read element `index` as a float.
    #[inline]
    pub fn read_f64(self, bytes: &[u8], index: usize) -> f64 {
        let at = &bytes[index * self.num_bytes()..];
        match self {
            Self::Float32 => LittleEndian::read_f32(at) as f64,
            Self::Float64 => LittleEndian::read_f64(at),
            _ => self.read_i64(bytes, index) as f64,
        }
    }

    /// Read element `index` as a number, keeping the int/float split.
    #[inline]
    pub fn read_number(self, bytes: &[u8], index: usize) -> Number {
        if self.is_float() {
            Number::Float(self.read_f64(bytes, index))
        } else {
            Number::Int(self.read_i64(bytes, index))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_sizes() {
        assert_eq!(StorageType::Uint8.num_bytes(), 1);
        assert_eq!(StorageType::Int16.num_bytes(), 2);
        assert_eq!(StorageType::Float32.num_bytes(), 4);
        assert_eq!(StorageType::Int64.num_bytes(), 8);
    }

    #[test]
    fn test_component_names() {
        assert_eq!(ComponentType::Float32.name(), "FLOAT32");
        assert_eq!(ComponentType::from_name("ENUM"), Some(ComponentType::Enum));
        assert_eq!(ComponentType::from_name("float32"), None);
        assert_eq!(OffsetType::default(), OffsetType::Uint32);
    }

    #[test]
    fn test_uint64_has_no_storage() {
        assert_eq!(ComponentType::Uint64.storage_type(), None);
        assert_eq!(OffsetType::Uint64.storage_type(), None);
        assert_eq!(ComponentType::String.storage_type(), None);
        assert_eq!(ComponentType::Uint16.storage_type(), Some(StorageType::Uint16));
    }

    #[test]
    fn test_read_little_endian() {
        let bytes = [0x01, 0x02, 0xff, 0xff];
        assert_eq!(StorageType::Uint16.read_i64(&bytes, 0), 0x0201);
        assert_eq!(StorageType::Int16.read_i64(&bytes, 1), -1);
        assert_eq!(StorageType::Uint16.read_i64(&bytes, 1), 0xffff);
        assert_eq!(StorageType::Int8.read_i64(&bytes, 2), -1);

        let f = 1.5f32.to_le_bytes();
        assert_eq!(StorageType::Float32.read_number(&f, 0), Number::Float(1.5));
        assert_eq!(StorageType::Uint8.read_number(&bytes, 1), Number::Int(2));
    }
}
