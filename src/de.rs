//! Decoding of NBT bytes into a [`Value`] tree.
//!
//! Open compounds and lists are kept on an explicit stack of layers rather
//! than the call stack, so nesting costs heap, not thread stack. The number
//! of layers is bounded by [`DeOpts::max_depth`].

use std::io::Read;

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::input::Input;
use crate::{Compound, DeOpts, List, Tag, Value};

/// Most list elements we reserve up front for a declared length.
const MAX_LIST_PREALLOC: usize = 1024;

/// Decode a document from a byte slice. See [`from_reader`].
pub fn from_bytes(bytes: &[u8]) -> Result<Value> {
    from_reader(bytes)
}

/// Decode a document from a byte slice with the given options.
pub fn from_bytes_with_opts(bytes: &[u8], opts: DeOpts) -> Result<Value> {
    from_reader_with_opts(bytes, opts)
}

/// Decode a document from a reader. The reader must provide uncompressed NBT.
///
/// The result is always a [`Value::Compound`] holding a single entry: the name
/// of the root tag (usually empty) mapped to the root compound. Only the root
/// tag is consumed, anything after it is left in the reader.
///
/// Decoding is all or nothing, on error no part of the tree is returned.
pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
    from_reader_with_opts(reader, DeOpts::new())
}

/// Decode a document from a reader with the given options.
pub fn from_reader_with_opts<R: Read>(reader: R, opts: DeOpts) -> Result<Value> {
    let mut decoder = Decoder {
        input: Input::new(reader),
        opts,
        layers: Vec::new(),
    };
    decoder.root()
}

/// A compound or list being filled in, with the name it will have in its
/// parent. List elements have no name.
enum Layer {
    Compound {
        name: Option<String>,
        entries: Compound,
    },
    List {
        name: Option<String>,
        tag: Tag,
        remaining: usize,
        items: Vec<Value>,
    },
}

impl Layer {
    fn push(&mut self, name: Option<String>, value: Value) {
        match self {
            Layer::Compound { entries, .. } => {
                let name = name.unwrap_or_default();
                if entries.contains_key(&name) {
                    warn!("duplicate key {:?} in compound, later value replaces earlier", name);
                }
                entries.insert(name, value);
            }
            Layer::List { items, .. } => items.push(value),
        }
    }

    fn finish(self) -> (Option<String>, Value) {
        match self {
            Layer::Compound { name, entries } => (name, Value::Compound(entries)),
            // Elements are decoded straight from the declared tag so they are
            // homogeneous by construction.
            Layer::List {
                name, tag, items, ..
            } => (name, Value::List(List::from_parts(tag, items))),
        }
    }
}

struct Decoder<R: Read> {
    input: Input<R>,
    opts: DeOpts,
    /// Parents of the layer currently being filled.
    layers: Vec<Layer>,
}

impl<R: Read> Decoder<R> {
    fn root(&mut self) -> Result<Value> {
        let first = self.input.consume_byte()?;
        if let Some(format) = self.compression(first) {
            return Err(Error::compressed_input(first, format));
        }

        match Tag::try_from(first) {
            Ok(Tag::Compound) => {}
            Ok(_) => return Err(Error::no_root_compound()),
            Err(()) => return Err(Error::invalid_tag(first)),
        }

        let name = self.input.consume_str(self.opts.string_encoding)?;
        let top = self.open(Some(name), Tag::Compound, 0)?;
        let (name, body) = self.tree(top)?;
        let name = name.unwrap_or_default();
        let body = body.into_compound()?;
        debug!("decoded root compound {:?} with {} entries", name, body.len());

        Ok(body.into_root(name))
    }

    /// Gzip starts `1f 8b`, zlib `78 01`, `78 9c` or `78 da`. Neither first
    /// byte is a valid tag, so the input is rejected either way.
    fn compression(&mut self, first: u8) -> Option<&'static str> {
        if first != 0x1f && first != 0x78 {
            return None;
        }
        match (first, self.input.consume_byte().ok()?) {
            (0x1f, 0x8b) => Some("gzip"),
            (0x78, 0x01 | 0x9c | 0xda) => Some("zlib"),
            _ => None,
        }
    }

    /// Read the header of a compound or list, `depth` layers deep.
    fn open(&mut self, name: Option<String>, tag: Tag, depth: usize) -> Result<Layer> {
        if depth >= self.opts.max_depth {
            return Err(Error::too_deep(self.opts.max_depth));
        }

        if tag == Tag::Compound {
            trace!("entering compound at depth {}", depth + 1);
            return Ok(Layer::Compound {
                name,
                entries: Compound::new(),
            });
        }

        let element_tag = self.input.consume_tag()?;
        let len = self.input.consume_len(self.opts.max_seq_len)?;
        trace!(
            "entering list of {} {:?} at depth {}",
            len,
            element_tag,
            depth + 1
        );

        if element_tag == Tag::End && len > 0 {
            return Err(Error::invalid_list_type(element_tag));
        }

        Ok(Layer::List {
            name,
            tag: element_tag,
            remaining: len,
            items: Vec::with_capacity(len.min(MAX_LIST_PREALLOC)),
        })
    }

    /// Fill `top` and everything under it, returning it once it is closed.
    fn tree(&mut self, mut top: Layer) -> Result<(Option<String>, Value)> {
        loop {
            let next = match &mut top {
                Layer::Compound { .. } => match self.input.consume_tag()? {
                    Tag::End => None,
                    tag => Some((Some(self.input.consume_str(self.opts.string_encoding)?), tag)),
                },
                Layer::List { remaining: 0, .. } => None,
                Layer::List { tag, remaining, .. } => {
                    *remaining -= 1;
                    Some((None, *tag))
                }
            };

            match next {
                None => {
                    let (name, value) = top.finish();
                    match self.layers.pop() {
                        Some(parent) => {
                            top = parent;
                            top.push(name, value);
                        }
                        None => return Ok((name, value)),
                    }
                }
                Some((name, tag @ (Tag::Compound | Tag::List))) => {
                    let child = self.open(name, tag, self.layers.len() + 1)?;
                    self.layers.push(std::mem::replace(&mut top, child));
                }
                Some((name, tag)) => {
                    let value = self.scalar(tag)?;
                    top.push(name, value);
                }
            }
        }
    }

    fn scalar(&mut self, tag: Tag) -> Result<Value> {
        let max_seq_len = self.opts.max_seq_len;

        Ok(match tag {
            // Lists of End are rejected when opened, End in a compound closes
            // it, and containers are opened as layers.
            Tag::End | Tag::List | Tag::Compound => return Err(Error::invalid_tag(tag as u8)),
            Tag::Byte => Value::Byte(self.input.consume_i8()?),
            Tag::Short => Value::Short(self.input.consume_i16()?),
            Tag::Int => Value::Int(self.input.consume_i32()?),
            Tag::Long => Value::Long(self.input.consume_i64()?),
            Tag::Float => Value::Float(self.input.consume_f32()?),
            Tag::Double => Value::Double(self.input.consume_f64()?),
            Tag::String => Value::String(self.input.consume_str(self.opts.string_encoding)?),
            Tag::ByteArray => {
                let len = self.input.consume_len(max_seq_len)?;
                Value::ByteArray(self.input.consume_i8_array(len)?)
            }
            Tag::IntArray => {
                let len = self.input.consume_len(max_seq_len)?;
                Value::IntArray(self.input.consume_i32_array(len)?)
            }
            Tag::LongArray => {
                let len = self.input.consume_len(max_seq_len)?;
                Value::LongArray(self.input.consume_i64_array(len)?)
            }
        })
    }
}
