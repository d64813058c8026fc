//! Table construction options.

/// How STRING bytes that are not valid UTF-8 are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StringDecoding {
    /// Replace invalid sequences with U+FFFD
    #[default]
    Lossy,
    /// Report `Error::InvalidUtf8`
    Strict,
}

/// Options for [`MetadataTable::new_opts`](super::MetadataTable::new_opts).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableOptions {
    pub string_decoding: StringDecoding,
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject strings that are not valid UTF-8.
    pub fn strict_strings(mut self) -> Self {
        self.string_decoding = StringDecoding::Strict;
        self
    }
}
