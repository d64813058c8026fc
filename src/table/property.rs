//! Property stores: the decoded per-property state of a table.
//!
//! A store is built once from a class property, its table entry and the
//! buffer views. It keeps a shared reference to the values bytes plus the
//! offset arrays needed to find each entity's slots, and decodes slots on
//! demand.

use std::ops::Range;
use std::sync::Arc;

use super::buffer::{BufferView, BufferViews, TableProperty};
use super::layout::{Arity, ElementKind, Layout};
use super::options::{StringDecoding, TableOptions};
use crate::schema::{ClassProperty, MetadataType};
use crate::util::{ComponentType, Error, MetadataValue, OffsetType, Result, StorageType};

/// Typed view over the values bytes of one property.
#[derive(Clone, Debug)]
pub struct TypedValues {
    buffer: Arc<[u8]>,
    range: Range<usize>,
    len: usize,
    storage: StorageType,
}

impl TypedValues {
    /// Number of elements (bytes for strings and booleans).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn storage_type(&self) -> StorageType {
        self.storage
    }

    /// Raw little-endian bytes of all elements.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[self.range.clone()]
    }
}

/// Decoded state of one property.
#[derive(Clone, Debug)]
pub struct PropertyStore {
    layout: Layout,
    /// `count + 1` entries for variable arrays, empty otherwise
    array_offsets: Vec<u32>,
    /// One entry per addressed slot plus one for strings, empty otherwise
    string_offsets: Vec<u32>,
    slot_count: usize,
    values: TypedValues,
    class_property: ClassProperty,
}

impl PropertyStore {
    /// Build the store for property `id` of a table with `count` entities.
    pub(crate) fn build(
        id: &str,
        count: usize,
        property: &TableProperty,
        class_property: &ClassProperty,
        buffer_views: &BufferViews,
    ) -> Result<Self> {
        check_supported(id, property, class_property)?;

        let layout = Layout::classify(id, class_property)?;
        let offset_storage = property
            .offset_type
            .unwrap_or_default()
            .storage_type()
            .ok_or_else(|| Error::unsupported(id, "offsetType"))?;

        // Offsets index the values directly, so the values must cover every
        // slot up to `slot_end` even when the first offset is not zero.
        let (array_offsets, slot_count, slot_end) = match layout.arity {
            Arity::Variable => {
                let (view_id, view) =
                    resolve_view(id, "array offset", property.array_offset_buffer_view, buffer_views)?;
                let n = count
                    .checked_add(1)
                    .ok_or_else(|| Error::invalid_schema(id, "entity count overflows"))?;
                let offsets = read_offsets(id, "array", view_id, view, offset_storage, n)?;
                let end = offsets[count] as usize;
                let total = end - offsets[0] as usize;
                (offsets, total, end)
            }
            Arity::Fixed(k) => {
                let total = count
                    .checked_mul(k)
                    .ok_or_else(|| Error::invalid_schema(id, "componentCount overflows"))?;
                (Vec::new(), total, total)
            }
            Arity::Single => (Vec::new(), count, count),
        };

        let (string_offsets, value_len) = match layout.element {
            ElementKind::String => {
                let (view_id, view) =
                    resolve_view(id, "string offset", property.string_offset_buffer_view, buffer_views)?;
                let n = slot_end
                    .checked_add(1)
                    .ok_or_else(|| Error::invalid_schema(id, "slot count overflows"))?;
                let offsets = read_offsets(id, "string", view_id, view, offset_storage, n)?;
                let bytes = offsets[slot_end] as usize;
                (offsets, bytes)
            }
            ElementKind::Boolean => (Vec::new(), slot_end.div_ceil(8)),
            ElementKind::Numeric { width, .. } => {
                let len = slot_end
                    .checked_mul(width)
                    .ok_or_else(|| Error::invalid_schema(id, "vector width overflows"))?;
                (Vec::new(), len)
            }
            ElementKind::Enum { .. } => (Vec::new(), slot_end),
        };

        let storage = layout.storage_type();
        let (view_id, view) = resolve_view(id, "values", Some(property.buffer_view), buffer_views)?;
        let range = element_range(id, view_id, view, storage, value_len)?;

        Ok(Self {
            layout,
            array_offsets,
            string_offsets,
            slot_count,
            values: TypedValues {
                buffer: Arc::clone(view.buffer()),
                range,
                len: value_len,
                storage,
            },
            class_property: class_property.clone(),
        })
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Schema entry this store was built from.
    #[inline]
    pub fn class_property(&self) -> &ClassProperty {
        &self.class_property
    }

    /// Per-entity slot boundaries of a variable-length array, as stored.
    pub fn array_offsets(&self) -> Option<&[u32]> {
        (self.layout.arity == Arity::Variable).then_some(self.array_offsets.as_slice())
    }

    /// Per-slot byte boundaries of a string property, relative to the start
    /// of the values. The last entry is the values length.
    pub fn string_offsets(&self) -> Option<&[u32]> {
        (self.layout.element == ElementKind::String).then_some(self.string_offsets.as_slice())
    }

    /// Total number of slots across all entities.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    #[inline]
    pub fn values(&self) -> &TypedValues {
        &self.values
    }

    /// Slots owned by entity `index`; `index` must be below the table count.
    pub(crate) fn slot_range(&self, index: usize) -> Range<usize> {
        match self.layout.arity {
            Arity::Single => index..index + 1,
            Arity::Fixed(k) => index * k..(index + 1) * k,
            Arity::Variable => {
                self.array_offsets[index] as usize..self.array_offsets[index + 1] as usize
            }
        }
    }

    /// Decode the value of entity `index` into a fresh owned value.
    pub(crate) fn decode(&self, id: &str, index: usize, options: &TableOptions) -> Result<MetadataValue> {
        let slots = self.slot_range(index);
        if self.layout.is_array() {
            slots
                .map(|slot| self.decode_slot(id, slot, options))
                .collect::<Result<Vec<_>>>()
                .map(MetadataValue::Array)
        } else {
            self.decode_slot(id, slots.start, options)
        }
    }

    fn decode_slot(&self, id: &str, slot: usize, options: &TableOptions) -> Result<MetadataValue> {
        let bytes = self.values.as_bytes();
        match self.layout.element {
            ElementKind::Numeric { storage, width: 1 } => Ok(storage.read_number(bytes, slot).into()),
            ElementKind::Numeric { storage, width } => Ok(MetadataValue::Vector(
                (0..width)
                    .map(|lane| storage.read_number(bytes, slot * width + lane))
                    .collect(),
            )),
            ElementKind::Boolean => {
                let bit = bytes[slot >> 3] & (1 << (slot & 7));
                Ok(MetadataValue::Boolean(bit != 0))
            }
            ElementKind::String => {
                let start = self.string_offsets[slot] as usize;
                let end = self.string_offsets[slot + 1] as usize;
                let raw = &bytes[start..end];
                let text = match options.string_decoding {
                    StringDecoding::Lossy => String::from_utf8_lossy(raw).into_owned(),
                    StringDecoding::Strict => std::str::from_utf8(raw)
                        .map_err(|source| Error::InvalidUtf8 {
                            property: id.to_string(),
                            source,
                        })?
                        .to_owned(),
                };
                Ok(MetadataValue::String(text))
            }
            ElementKind::Enum { storage } => {
                let raw = storage.read_i64(bytes, slot);
                let name = self
                    .class_property
                    .enum_type
                    .as_ref()
                    .and_then(|e| e.name_of(raw))
                    .ok_or_else(|| Error::UnknownEnumValue {
                        property: id.to_string(),
                        value: raw,
                    })?;
                Ok(MetadataValue::Enum(name.to_string()))
            }
        }
    }
}

// ============================================================================
// Construction Helpers
// ============================================================================

/// Reject UINT64 before touching any buffer.
fn check_supported(id: &str, property: &TableProperty, class_property: &ClassProperty) -> Result<()> {
    if property.offset_type == Some(OffsetType::Uint64) {
        return Err(Error::unsupported(id, "offsetType"));
    }
    if class_property
        .enum_type
        .as_ref()
        .is_some_and(|e| e.value_type == ComponentType::Uint64)
    {
        return Err(Error::unsupported(id, "enumType"));
    }
    if class_property.component_type == Some(ComponentType::Uint64) {
        return Err(Error::unsupported(id, "componentType"));
    }
    if class_property.property_type == MetadataType::Uint64 {
        return Err(Error::unsupported(id, "type"));
    }
    Ok(())
}

fn resolve_view<'a>(
    id: &str,
    role: &'static str,
    view_id: Option<usize>,
    buffer_views: &'a BufferViews,
) -> Result<(usize, &'a BufferView)> {
    let missing = || Error::MissingBufferView {
        property: id.to_string(),
        role,
        buffer_view: view_id,
    };
    let view_id = view_id.ok_or_else(missing)?;
    let view = buffer_views.get(view_id).ok_or_else(missing)?;
    Ok((view_id, view))
}

/// Absolute byte range of the first `len` elements of a view.
fn element_range(
    id: &str,
    view_id: usize,
    view: &BufferView,
    storage: StorageType,
    len: usize,
) -> Result<Range<usize>> {
    let range = view.checked_range(view_id)?;
    let available = range.len();
    let required = len.checked_mul(storage.num_bytes()).unwrap_or(usize::MAX);
    if required > available {
        return Err(Error::BufferViewTooShort {
            property: id.to_string(),
            buffer_view: view_id,
            required,
            available,
        });
    }
    Ok(range.start..range.start + required)
}

/// Read `n` offsets and check they never decrease.
fn read_offsets(
    id: &str,
    role: &'static str,
    view_id: usize,
    view: &BufferView,
    storage: StorageType,
    n: usize,
) -> Result<Vec<u32>> {
    // A lone sentinel (zero entities or zero slots) may come from an empty view.
    if n == 1 && view.byte_length() == 0 {
        return Ok(vec![0]);
    }

    let range = element_range(id, view_id, view, storage, n)?;
    let bytes = &view.buffer()[range];
    let offsets: Vec<u32> = (0..n).map(|i| storage.read_i64(bytes, i) as u32).collect();

    if let Some(i) = offsets.windows(2).position(|w| w[1] < w[0]) {
        return Err(Error::malformed_offsets(
            id,
            role,
            format!(
                "offset {} ({}) is less than offset {} ({})",
                i + 1,
                offsets[i + 1],
                i,
                offsets[i]
            ),
        ));
    }

    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{LittleEndian, WriteBytesExt};

    fn offsets_u32(values: &[u32]) -> Vec<u8> {
        let mut out = Vec::new();
        for v in values {
            out.write_u32::<LittleEndian>(*v).unwrap();
        }
        out
    }

    fn views(list: Vec<Vec<u8>>) -> BufferViews {
        list.into_iter()
            .enumerate()
            .map(|(i, bytes)| (i, BufferView::from_bytes(bytes)))
            .collect()
    }

    #[test]
    fn test_boolean_packing() {
        // 10 booleans: only slots 0 and 9 set
        let views = views(vec![vec![0b0000_0001, 0b0000_0010]]);
        let store = PropertyStore::build(
            "flag",
            10,
            &TableProperty::new(0),
            &ClassProperty::boolean(),
            &views,
        )
        .unwrap();
        assert_eq!(store.values().len(), 2);

        let opts = TableOptions::default();
        let decoded: Vec<bool> = (0..10)
            .map(|i| store.decode("flag", i, &opts).unwrap().as_bool().unwrap())
            .collect();
        assert_eq!(
            decoded,
            [true, false, false, false, false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_string_slicing() {
        let views = views(vec![b"foobarz".to_vec(), offsets_u32(&[0, 3, 7, 7])]);
        let store = PropertyStore::build(
            "name",
            3,
            &TableProperty::new(0).with_string_offsets(1),
            &ClassProperty::string(),
            &views,
        )
        .unwrap();
        assert_eq!(store.values().len(), 7);
        assert_eq!(store.string_offsets(), Some(&[0, 3, 7, 7][..]));
        assert_eq!(store.array_offsets(), None);

        let opts = TableOptions::default();
        let names: Vec<String> = (0..3)
            .map(|i| store.decode("name", i, &opts).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["foo", "barz", ""]);
    }

    #[test]
    fn test_array_offsets_not_starting_at_zero() {
        let views = views(vec![vec![10, 11, 12, 13, 14, 15, 16], offsets_u32(&[4, 5, 7])]);
        let store = PropertyStore::build(
            "v",
            2,
            &TableProperty::new(0).with_array_offsets(1),
            &ClassProperty::variable_array(ComponentType::Uint8),
            &views,
        )
        .unwrap();
        assert_eq!(store.array_offsets(), Some(&[4, 5, 7][..]));
        assert_eq!(store.slot_count(), 3);
        assert_eq!(store.values().len(), 7);

        let opts = TableOptions::default();
        assert_eq!(
            store.decode("v", 0, &opts).unwrap(),
            MetadataValue::from(vec![14i64])
        );
        assert_eq!(
            store.decode("v", 1, &opts).unwrap(),
            MetadataValue::from(vec![15i64, 16])
        );
    }

    #[test]
    fn test_string_offsets_not_starting_at_zero() {
        let views = views(vec![b"foobar".to_vec(), offsets_u32(&[3, 6])]);
        let store = PropertyStore::build(
            "s",
            1,
            &TableProperty::new(0).with_string_offsets(1),
            &ClassProperty::string(),
            &views,
        )
        .unwrap();
        assert_eq!(store.values().len(), 6);
        assert_eq!(
            store.decode("s", 0, &TableOptions::default()).unwrap(),
            MetadataValue::from("bar")
        );
    }

    #[test]
    fn test_offsets_past_values_rejected() {
        // Offsets address bytes 3..9 but only 6 are present
        let views = views(vec![b"foobar".to_vec(), offsets_u32(&[3, 9])]);
        let err = PropertyStore::build(
            "s",
            1,
            &TableProperty::new(0).with_string_offsets(1),
            &ClassProperty::string(),
            &views,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::BufferViewTooShort { required: 9, available: 6, .. }
        ));
    }

    #[test]
    fn test_decreasing_offsets_rejected() {
        let views = views(vec![vec![0u8; 8], offsets_u32(&[0, 3, 2])]);
        let err = PropertyStore::build(
            "v",
            2,
            &TableProperty::new(0).with_array_offsets(1),
            &ClassProperty::variable_array(ComponentType::Uint8),
            &views,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedOffsets { role: "array", .. }));
    }

    #[test]
    fn test_decreasing_string_offsets_rejected() {
        let views = views(vec![b"abcd".to_vec(), offsets_u32(&[0, 4, 2])]);
        let err = PropertyStore::build(
            "s",
            2,
            &TableProperty::new(0).with_string_offsets(1),
            &ClassProperty::string(),
            &views,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedOffsets { role: "string", .. }));
    }

    #[test]
    fn test_zero_count_sentinel() {
        let views = views(vec![Vec::new(), Vec::new()]);
        let store = PropertyStore::build(
            "v",
            0,
            &TableProperty::new(0).with_array_offsets(1),
            &ClassProperty::variable_array(ComponentType::Float32),
            &views,
        )
        .unwrap();
        assert_eq!(store.array_offsets(), Some(&[0][..]));
        assert_eq!(store.slot_count(), 0);
        assert!(store.values().is_empty());
    }

    #[test]
    fn test_offset_type_uint16() {
        let mut offsets = Vec::new();
        for v in [0u16, 2, 2] {
            offsets.write_u16::<LittleEndian>(v).unwrap();
        }
        let views = views(vec![b"hi".to_vec(), offsets]);
        let store = PropertyStore::build(
            "s",
            2,
            &TableProperty::new(0)
                .with_string_offsets(1)
                .with_offset_type(OffsetType::Uint16),
            &ClassProperty::string(),
            &views,
        )
        .unwrap();
        let opts = TableOptions::default();
        assert_eq!(store.decode("s", 0, &opts).unwrap(), MetadataValue::from("hi"));
        assert_eq!(store.decode("s", 1, &opts).unwrap(), MetadataValue::from(""));
    }

    #[test]
    fn test_values_too_short() {
        let views = views(vec![vec![0u8; 7]]);
        let err = PropertyStore::build(
            "f",
            2,
            &TableProperty::new(0),
            &ClassProperty::scalar(ComponentType::Float32),
            &views,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::BufferViewTooShort { required: 8, available: 7, .. }
        ));
    }

    #[test]
    fn test_uint64_checked_before_views() {
        // No buffer views at all: the encoding check must fire first.
        let empty = BufferViews::new();
        let err = PropertyStore::build(
            "s",
            1,
            &TableProperty::new(0).with_offset_type(OffsetType::Uint64),
            &ClassProperty::string(),
            &empty,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding { what: "offsetType", .. }));
    }

    #[test]
    fn test_strict_utf8() {
        let views = views(vec![vec![0xff, 0xfe], offsets_u32(&[0, 2])]);
        let store = PropertyStore::build(
            "s",
            1,
            &TableProperty::new(0).with_string_offsets(1),
            &ClassProperty::string(),
            &views,
        )
        .unwrap();

        let lossy = store.decode("s", 0, &TableOptions::default()).unwrap();
        assert_eq!(lossy.as_str(), Some("\u{fffd}\u{fffd}"));

        let err = store.decode("s", 0, &TableOptions::new().strict_strings()).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { .. }));
    }
}
