//! Decoded property values.

use glam::{DVec2, DVec3, DVec4};
use smallvec::SmallVec;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Components of a VEC2/VEC3/VEC4 value.
pub type VectorComponents = SmallVec<[Number; 4]>;

/// One numeric lane, keeping the integer/float distinction of its storage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl From<Number> for MetadataValue {
    #[inline]
    fn from(n: Number) -> Self {
        match n {
            Number::Int(v) => Self::Int(v),
            Number::Float(v) => Self::Float(v),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

/// An owned, decoded property value.
///
/// Every value handed out by a table is a fresh copy; nothing here borrows
/// the table's buffers.
///
/// With the `serde` feature the value (de)serializes untagged, so JSON
/// defaults such as `5`, `"abc"` or `[1, 2]` map onto `Int`, `String` and
/// `Array`. `Vector` and `Enum` are only produced by decoding.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum MetadataValue {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<MetadataValue>),
    /// Fixed-size numeric tuple of a VECN property
    Vector(VectorComponents),
    /// Name of an enum value
    Enum(String),
}

impl MetadataValue {
    /// Integer value, `None` for anything but `Int`.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value as `f64`.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Text of a string or enum value.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Enum(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Elements of an ARRAY value.
    #[inline]
    pub fn as_array(&self) -> Option<&[MetadataValue]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Components of a VECN value.
    #[inline]
    pub fn as_vector(&self) -> Option<&[Number]> {
        match self {
            Self::Vector(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// VEC2 value as a double-precision glam vector.
    pub fn as_dvec2(&self) -> Option<DVec2> {
        let [x, y] = self.vector_f64::<2>()?;
        Some(DVec2::new(x, y))
    }

    /// VEC3 value as a double-precision glam vector.
    pub fn as_dvec3(&self) -> Option<DVec3> {
        let [x, y, z] = self.vector_f64::<3>()?;
        Some(DVec3::new(x, y, z))
    }

    /// VEC4 value as a double-precision glam vector.
    pub fn as_dvec4(&self) -> Option<DVec4> {
        let [x, y, z, w] = self.vector_f64::<4>()?;
        Some(DVec4::new(x, y, z, w))
    }

    fn vector_f64<const N: usize>(&self) -> Option<[f64; N]> {
        let comps = self.as_vector()?;
        if comps.len() != N {
            return None;
        }
        let mut out = [0.0; N];
        for (dst, c) in out.iter_mut().zip(comps) {
            *dst = c.as_f64();
        }
        Some(out)
    }
}

impl From<bool> for MetadataValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for MetadataValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for MetadataValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for MetadataValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<MetadataValue>> From<Vec<T>> for MetadataValue {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], open: char, close: char) -> fmt::Result {
            write!(f, "{}", open)?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            write!(f, "{}", close)
        }

        match self {
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(s) => write!(f, "{:?}", s),
            Self::Enum(name) => write!(f, "{}", name),
            Self::Array(items) => list(f, items, '[', ']'),
            Self::Vector(items) => list(f, items, '(', ')'),
        }
    }
}
