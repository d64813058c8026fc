//! Buffer views and the per-property references into them.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::util::{Error, OffsetType, Result};

/// A byte range of an already-resident buffer.
///
/// The buffer is reference counted, so a table built from a view keeps the
/// bytes alive without copying them.
#[derive(Clone, Debug)]
pub struct BufferView {
    buffer: Arc<[u8]>,
    byte_offset: usize,
    byte_length: usize,
}

impl BufferView {
    /// Create a view of `byte_length` bytes starting at `byte_offset`.
    ///
    /// The range is checked against the buffer when a table reads it.
    pub fn new(buffer: impl Into<Arc<[u8]>>, byte_offset: usize, byte_length: usize) -> Self {
        Self {
            buffer: buffer.into(),
            byte_offset,
            byte_length,
        }
    }

    /// Create a view spanning a whole buffer.
    pub fn from_bytes(buffer: impl Into<Arc<[u8]>>) -> Self {
        let buffer = buffer.into();
        let byte_length = buffer.len();
        Self { buffer, byte_offset: 0, byte_length }
    }

    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    #[inline]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// The shared backing buffer.
    #[inline]
    pub fn buffer(&self) -> &Arc<[u8]> {
        &self.buffer
    }

    /// Absolute byte range of this view inside its buffer.
    pub(crate) fn checked_range(&self, id: usize) -> Result<Range<usize>> {
        self.byte_offset
            .checked_add(self.byte_length)
            .filter(|&end| end <= self.buffer.len())
            .map(|end| self.byte_offset..end)
            .ok_or_else(|| Error::BufferViewOutOfBounds {
                buffer_view: id,
                offset: self.byte_offset,
                length: self.byte_length,
                buffer_len: self.buffer.len(),
            })
    }
}

/// Buffer views keyed by the ids used in table property entries.
#[derive(Clone, Debug, Default)]
pub struct BufferViews {
    views: HashMap<usize, BufferView>,
}

impl BufferViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a view under `id`, replacing any previous one.
    pub fn insert(&mut self, id: usize, view: BufferView) {
        self.views.insert(id, view);
    }

    pub fn with_view(mut self, id: usize, view: BufferView) -> Self {
        self.insert(id, view);
        self
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&BufferView> {
        self.views.get(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl FromIterator<(usize, BufferView)> for BufferViews {
    fn from_iter<T: IntoIterator<Item = (usize, BufferView)>>(iter: T) -> Self {
        Self { views: iter.into_iter().collect() }
    }
}

/// Where a table stores one property: the buffer views holding its values
/// and offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct TableProperty {
    pub buffer_view: usize,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub array_offset_buffer_view: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub string_offset_buffer_view: Option<usize>,
    /// Integer kind of both offset buffers, UINT32 when absent
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub offset_type: Option<OffsetType>,
}

impl TableProperty {
    /// Property whose values live in `buffer_view`.
    pub fn new(buffer_view: usize) -> Self {
        Self {
            buffer_view,
            array_offset_buffer_view: None,
            string_offset_buffer_view: None,
            offset_type: None,
        }
    }

    pub fn with_array_offsets(mut self, buffer_view: usize) -> Self {
        self.array_offset_buffer_view = Some(buffer_view);
        self
    }

    pub fn with_string_offsets(mut self, buffer_view: usize) -> Self {
        self.string_offset_buffer_view = Some(buffer_view);
        self
    }

    pub fn with_offset_type(mut self, offset_type: OffsetType) -> Self {
        self.offset_type = Some(offset_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_range() {
        let view = BufferView::new(vec![0u8; 16], 4, 8);
        assert_eq!(view.checked_range(0).unwrap(), 4..12);

        let whole = BufferView::from_bytes(vec![1u8, 2, 3]);
        assert_eq!(whole.byte_length(), 3);
        assert_eq!(whole.checked_range(0).unwrap(), 0..3);
    }

    #[test]
    fn test_view_out_of_bounds() {
        let view = BufferView::new(vec![0u8; 8], 4, 8);
        let err = view.checked_range(3).unwrap_err();
        assert!(matches!(err, Error::BufferViewOutOfBounds { buffer_view: 3, .. }));

        let view = BufferView::new(vec![0u8; 8], usize::MAX, 2);
        assert!(view.checked_range(0).is_err());
    }

    #[test]
    fn test_views_share_buffer() {
        let buffer: Arc<[u8]> = Arc::from(vec![0u8; 32]);
        let views = BufferViews::new()
            .with_view(0, BufferView::new(buffer.clone(), 0, 16))
            .with_view(1, BufferView::new(buffer.clone(), 16, 16));
        assert_eq!(views.len(), 2);
        assert_eq!(Arc::strong_count(&buffer), 3);
        assert!(views.get(2).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_table_property_json() {
        let p: TableProperty = serde_json::from_str(
            r#"{"bufferView": 2, "stringOffsetBufferView": 3, "offsetType": "UINT16"}"#,
        )
        .unwrap();
        assert_eq!(
            p,
            TableProperty::new(2).with_string_offsets(3).with_offset_type(OffsetType::Uint16)
        );
    }
}
