//! Binary layout of a property, classified once from its schema entry.

use crate::schema::{ClassProperty, MetadataType};
use crate::util::{ComponentType, Error, Result, StorageType};

/// What one slot of a property decodes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// `width` contiguous numbers per slot (1 for scalars, N for VECN)
    Numeric { storage: StorageType, width: usize },
    /// One bit per slot, packed LSB-first
    Boolean,
    /// Byte range per slot, delimited by string offsets
    String,
    /// Backing integer per slot, named through the enum definition
    Enum { storage: StorageType },
}

/// How many slots each entity owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// One slot per entity, value is not an array
    Single,
    /// ARRAY with a declared element count
    Fixed(usize),
    /// ARRAY delimited by array offsets
    Variable,
}

/// Element kind x arity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub element: ElementKind,
    pub arity: Arity,
}

impl Layout {
    /// Classify a class property.
    ///
    /// UINT64 anywhere is reported as `UnsupportedEncoding`; combinations with
    /// no binary form (a VEC3 of strings, an ARRAY without component type)
    /// are `InvalidSchema`.
    pub fn classify(id: &str, property: &ClassProperty) -> Result<Self> {
        let require_component = || {
            property.component_type.ok_or_else(|| {
                Error::invalid_schema(id, format!("{} requires a componentType", property.property_type))
            })
        };

        let (element, arity) = match property.property_type {
            MetadataType::Array => {
                let element = element_of(id, require_component()?, property)?;
                let arity = match property.component_count {
                    Some(k) => Arity::Fixed(k),
                    None => Arity::Variable,
                };
                (element, arity)
            }
            MetadataType::Scalar => {
                let ct = require_component()?;
                if !ct.is_numeric() && ct != ComponentType::Enum {
                    return Err(Error::invalid_schema(
                        id,
                        format!("SCALAR cannot have componentType {}", ct),
                    ));
                }
                (element_of(id, ct, property)?, Arity::Single)
            }
            MetadataType::Vec2 | MetadataType::Vec3 | MetadataType::Vec4 => {
                let ct = require_component()?;
                let width = property.property_type.vector_dimension().unwrap_or(1);
                if !ct.is_numeric() {
                    return Err(Error::invalid_schema(
                        id,
                        format!("{} requires a numeric componentType, got {}", property.property_type, ct),
                    ));
                }
                let storage = ct
                    .storage_type()
                    .ok_or_else(|| Error::unsupported(id, "componentType"))?;
                (ElementKind::Numeric { storage, width }, Arity::Single)
            }
            direct => {
                // Bare INT8..FLOAT64, BOOLEAN, STRING, ENUM
                let ct = direct
                    .as_component_type()
                    .ok_or_else(|| Error::invalid_schema(id, format!("unhandled type {}", direct)))?;
                let element = element_of(id, ct, property).map_err(|e| match e {
                    Error::UnsupportedEncoding { property, .. } if ct == ComponentType::Uint64 => {
                        Error::UnsupportedEncoding { property, what: "type" }
                    }
                    other => other,
                })?;
                (element, Arity::Single)
            }
        };

        Ok(Self { element, arity })
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        !matches!(self.arity, Arity::Single)
    }

    /// Storage kind of the values buffer. Strings and booleans are raw bytes.
    #[inline]
    pub fn storage_type(&self) -> StorageType {
        match self.element {
            ElementKind::Numeric { storage, .. } | ElementKind::Enum { storage } => storage,
            ElementKind::Boolean | ElementKind::String => StorageType::Uint8,
        }
    }
}

fn element_of(id: &str, ct: ComponentType, property: &ClassProperty) -> Result<ElementKind> {
    Ok(match ct {
        ComponentType::Boolean => ElementKind::Boolean,
        ComponentType::String => ElementKind::String,
        ComponentType::Enum => {
            let enum_type = property
                .enum_type
                .as_ref()
                .ok_or_else(|| Error::invalid_schema(id, "ENUM requires an enumType"))?;
            if !enum_type.value_type.is_integer() {
                return Err(Error::invalid_schema(
                    id,
                    format!("enum valueType must be an integer, got {}", enum_type.value_type),
                ));
            }
            let storage = enum_type
                .value_type
                .storage_type()
                .ok_or_else(|| Error::unsupported(id, "enumType"))?;
            ElementKind::Enum { storage }
        }
        numeric => ElementKind::Numeric {
            storage: numeric
                .storage_type()
                .ok_or_else(|| Error::unsupported(id, "componentType"))?,
            width: 1,
        },
    })
}
