//! Contains the Error and Result type used when reading, writing and querying
//! NBT trees.
use std::fmt::Display;

use crate::Tag;

/// Various errors that can occur while decoding, encoding or narrowing NBT
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// What went wrong. Obtained through [`Error::kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`. Errors in this category may be moved to new
    /// variants.
    Other,

    /// A tag byte outside of 0 to 12.
    InvalidTag(u8),

    /// Input ran out part way through some NBT value.
    UnexpectedEof,

    /// An array, list or string declared a negative length.
    NegativeLength(i32),

    /// A value was asked for as one kind but holds another, or a list was
    /// given an element of a different kind to the one it records.
    TypeMismatch { expected: Tag, found: Tag },

    /// A compound has no entry under the key.
    KeyNotFound(String),

    /// A list position past the end of the list.
    IndexOutOfBounds { index: usize, len: usize },

    /// The document does not start with, or does not consist of, a single
    /// named compound.
    NoRootCompound,

    /// A string is longer than the 65535 bytes its length prefix can express.
    /// Contains the encoded length.
    StringTooLong(usize),

    /// A sequence is longer than allowed, either by the format or by
    /// [`DeOpts::max_seq_len`][`crate::DeOpts::max_seq_len`].
    SeqTooLong(usize),

    /// Containers nested beyond [`DeOpts::max_depth`][`crate::DeOpts::max_depth`].
    TooDeep(usize),

    /// A non-empty list declared `End` as its element type.
    InvalidListType(Tag),

    /// Expected unicode data but was not valid. Contains the invalid data.
    Nonunicode(Vec<u8>),

    /// The underlying reader or writer failed.
    Io(std::io::ErrorKind),
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::unexpected_eof(),
            kind => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io(kind),
            },
        }
    }
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeMismatch { .. })
    }

    pub(crate) fn invalid_tag(tag: u8) -> Error {
        Self {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::InvalidTag(tag),
        }
    }

    /// An invalid first byte that looks like the start of a compressed
    /// stream. Still an `InvalidTag`, but tells the caller what to do about it.
    pub(crate) fn compressed_input(tag: u8, format: &str) -> Error {
        Self {
            msg: format!(
                "invalid nbt tag value: {}: input looks {} compressed, decompress it first",
                tag, format
            ),
            kind: ErrorKind::InvalidTag(tag),
        }
    }

    pub(crate) fn unexpected_eof() -> Error {
        Self {
            msg: "eof: unexpectedly ran out of input".to_owned(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn negative_length(len: i32) -> Error {
        Self {
            msg: format!("invalid nbt: negative length {}", len),
            kind: ErrorKind::NegativeLength(len),
        }
    }

    pub(crate) fn type_mismatch(expected: Tag, found: Tag) -> Error {
        Self {
            msg: format!("type mismatch: expected {:?}, found {:?}", expected, found),
            kind: ErrorKind::TypeMismatch { expected, found },
        }
    }

    pub(crate) fn key_not_found(key: &str) -> Error {
        Self {
            msg: format!("no entry for key {:?} in compound", key),
            kind: ErrorKind::KeyNotFound(key.to_owned()),
        }
    }

    pub(crate) fn index_out_of_bounds(index: usize, len: usize) -> Error {
        Self {
            msg: format!("index {} out of bounds for list of length {}", index, len),
            kind: ErrorKind::IndexOutOfBounds { index, len },
        }
    }

    pub(crate) fn no_root_compound() -> Error {
        Self {
            msg: "invalid nbt: no root compound".to_owned(),
            kind: ErrorKind::NoRootCompound,
        }
    }

    pub(crate) fn string_too_long(len: usize) -> Error {
        Self {
            msg: format!("string of {} bytes does not fit a u16 length", len),
            kind: ErrorKind::StringTooLong(len),
        }
    }

    pub(crate) fn seq_too_long(len: usize) -> Error {
        Self {
            msg: format!("sequence length {} too large", len),
            kind: ErrorKind::SeqTooLong(len),
        }
    }

    pub(crate) fn too_deep(max_depth: usize) -> Error {
        Self {
            msg: format!("nbt nested deeper than {} levels", max_depth),
            kind: ErrorKind::TooDeep(max_depth),
        }
    }

    pub(crate) fn invalid_list_type(tag: Tag) -> Error {
        Self {
            msg: format!("invalid nbt list type {:?} for non-empty list", tag),
            kind: ErrorKind::InvalidListType(tag),
        }
    }

    pub(crate) fn nonunicode_string(data: &[u8]) -> Error {
        Self {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
            kind: ErrorKind::Nonunicode(data.to_vec()),
        }
    }
}
