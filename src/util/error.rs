//! Error types for metadata table decoding.

use thiserror::Error;

/// Main error type for metadata table operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A 64-bit unsigned kind was requested somewhere in the encoding
    #[error("Unsupported encoding for property '{property}': {what} of UINT64 is not supported")]
    UnsupportedEncoding { property: String, what: &'static str },

    /// Schema references a buffer view that was not supplied
    #[error("Property '{property}' references missing {role} buffer view {buffer_view:?}")]
    MissingBufferView {
        property: String,
        role: &'static str,
        buffer_view: Option<usize>,
    },

    /// Entity index outside `[0, count)`
    #[error("Entity index {index} out of range (count: {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Offset array is decreasing or points past its data
    #[error("Malformed {role} offsets for property '{property}': {reason}")]
    MalformedOffsets {
        property: String,
        role: &'static str,
        reason: String,
    },

    /// Buffer view holds fewer bytes than the layout requires
    #[error("Buffer view {buffer_view} too short for property '{property}': need {required} bytes, have {available}")]
    BufferViewTooShort {
        property: String,
        buffer_view: usize,
        required: usize,
        available: usize,
    },

    /// Buffer view range lies outside its backing buffer
    #[error("Buffer view {buffer_view} range {offset}+{length} exceeds buffer of {buffer_len} bytes")]
    BufferViewOutOfBounds {
        buffer_view: usize,
        offset: usize,
        length: usize,
        buffer_len: usize,
    },

    /// Type / component type combination that has no binary layout
    #[error("Invalid schema for property '{property}': {reason}")]
    InvalidSchema { property: String, reason: String },

    /// Table property with no matching class property
    #[error("Property '{0}' is not declared by the class")]
    PropertyNotInClass(String),

    /// Enum integer without a name in the enum definition
    #[error("Property '{property}' holds enum value {value} with no matching name")]
    UnknownEnumValue { property: String, value: i64 },

    /// String bytes are not valid UTF-8 (strict decoding only)
    #[error("Property '{property}' holds invalid UTF-8: {source}")]
    InvalidUtf8 {
        property: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl Error {
    /// Create an invalid schema error.
    pub fn invalid_schema(property: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            property: property.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a malformed offsets error.
    pub fn malformed_offsets(property: &str, role: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedOffsets {
            property: property.to_string(),
            role,
            reason: reason.into(),
        }
    }

    /// Create an unsupported (UINT64) encoding error.
    pub fn unsupported(property: &str, what: &'static str) -> Self {
        Self::UnsupportedEncoding {
            property: property.to_string(),
            what,
        }
    }
}

/// Result type alias for metadata table operations.
pub type Result<T> = std::result::Result<T, Error>;
