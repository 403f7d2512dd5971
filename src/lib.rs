//! nbtree reads and writes NBT data from *Minecraft: Java Edition* as an owned
//! tree of values. This format is used by the game to store various things,
//! such as the world data and player inventories.
//!
//! * For the tree itself see [`Value`], [`Compound`] and [`List`].
//! * For reading see [`from_bytes`] and [`from_reader`].
//! * For writing see [`to_bytes`] and [`to_writer`].
//! * For building trees in code see the [`nbt!`] macro.
//!
//! Decoding then encoding a document gives back the same bytes: compound
//! entries keep their order, empty lists keep their declared element type and
//! nothing is coerced between numeric kinds.
//!
//! # Quick example
//!
//! ```
//! use nbtree::{from_bytes, to_bytes, Value};
//!
//! # fn main() -> nbtree::error::Result<()> {
//! let bytes = b"\x0a\x00\x0bhello world\x08\x00\x04name\x00\x09Bananrama\x00";
//!
//! let root: Value = from_bytes(bytes)?;
//! let doc = root.as_compound()?.get_as::<nbtree::Compound>("hello world")?;
//! assert_eq!(doc.get_as::<String>("name")?, "Bananrama");
//!
//! assert_eq!(to_bytes(&root)?, bytes);
//! # Ok(())
//! # }
//! ```
//!
//! # Compression
//!
//! NBT files are usually gzip or zlib compressed. This crate does not
//! decompress anything; wrap your reader in a decoder such as
//! `flate2::read::GzDecoder` first. Handing compressed data to the reader
//! gives an error saying so.
//!
//! ```no_run
//! use flate2::read::GzDecoder;
//! use nbtree::Value;
//!
//! let file = std::fs::File::open("level.dat").unwrap();
//! let level: Value = nbtree::from_reader(GzDecoder::new(file)).unwrap();
//! println!("{:#?}", level);
//! ```

pub mod error;

#[macro_use]
mod macros;

mod de;
mod input;
mod ser;
mod value;

pub use de::{from_bytes, from_bytes_with_opts, from_reader, from_reader_with_opts};
pub use ser::{to_bytes, to_writer, to_writer_with_opts};
pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

/// How strings are encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringEncoding {
    /// Standard UTF-8. Invalid sequences are an error when reading.
    #[default]
    Utf8,
    /// Java's modified UTF-8 (CESU-8 with a two byte NUL), which is what
    /// Minecraft itself writes. Only differs from UTF-8 for NUL and characters
    /// outside the Basic Multilingual Plane.
    Cesu8,
}

/// Options for reading NBT.
///
/// ```
/// use nbtree::{from_bytes_with_opts, DeOpts};
///
/// let opts = DeOpts::new().max_depth(64).max_seq_len(1 << 20);
/// let res = from_bytes_with_opts(&[], opts);
/// assert!(res.unwrap_err().is_eof());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeOpts {
    /// Maximum number of nested compounds and lists, the root included.
    pub(crate) max_depth: usize,
    /// Maximum declared length of any list or array.
    pub(crate) max_seq_len: usize,
    pub(crate) string_encoding: StringEncoding,
}

impl DeOpts {
    /// Default options: 512 levels of nesting (the same limit as Minecraft),
    /// any length the format allows, and UTF-8 strings.
    pub fn new() -> Self {
        Self {
            max_depth: 512,
            max_seq_len: i32::MAX as usize,
            string_encoding: StringEncoding::Utf8,
        }
    }

    /// Maximum number of nested compounds and lists, the root compound
    /// counting as one. Nesting is tracked on the heap, so any limit is safe
    /// while decoding, but a tree far deeper than the default may overflow
    /// the stack when it is later dropped or compared.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Maximum length declared by a list or array. Input declaring more is an
    /// error before anything is allocated for it.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }

    /// How strings on the wire are decoded. Defaults to
    /// [`StringEncoding::Utf8`].
    pub fn string_encoding(mut self, value: StringEncoding) -> Self {
        self.string_encoding = value;
        self
    }
}

impl Default for DeOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for writing NBT.
///
/// ```
/// use nbtree::{nbt, to_writer_with_opts, SerOpts, StringEncoding};
///
/// let root = nbt!({ "name": "Bananrama" }).into_compound().unwrap().into_root("");
/// let opts = SerOpts::new().string_encoding(StringEncoding::Cesu8);
/// to_writer_with_opts(Vec::<u8>::new(), &root, opts).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerOpts {
    pub(crate) max_depth: usize,
    pub(crate) string_encoding: StringEncoding,
}

impl SerOpts {
    /// Default options: the same 512 level limit as [`DeOpts`], so anything
    /// written can be read back with default options, and UTF-8 strings.
    pub fn new() -> Self {
        Self {
            max_depth: 512,
            string_encoding: StringEncoding::Utf8,
        }
    }

    /// Maximum number of nested compounds and lists, the root compound
    /// counting as one. Deeper trees fail with
    /// [`ErrorKind::TooDeep`][`crate::error::ErrorKind::TooDeep`].
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// How strings are encoded on the wire. Defaults to
    /// [`StringEncoding::Utf8`].
    pub fn string_encoding(mut self, value: StringEncoding) -> Self {
        self.string_encoding = value;
        self
    }
}

impl Default for SerOpts {
    fn default() -> Self {
        Self::new()
    }
}
