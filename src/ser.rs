use std::convert::TryFrom;
use std::io::Write;
use std::slice;

use byteorder::{BigEndian, WriteBytesExt};
use indexmap::map;
use log::debug;

use crate::error::{Error, Result};
use crate::{Compound, SerOpts, StringEncoding, Tag, Value};

/// Encode a document to a new byte vector. See [`to_writer`].
pub fn to_bytes(root: &Value) -> Result<Vec<u8>> {
    let mut result = vec![];
    to_writer(&mut result, root)?;
    Ok(result)
}

/// Encode a document to a writer.
///
/// `root` must have the shape [`from_reader`][`crate::from_reader`] produces:
/// a [`Value::Compound`] with exactly one entry, whose value is itself a
/// compound. The key of that entry is written as the root name.
pub fn to_writer<W: Write>(writer: W, root: &Value) -> Result<()> {
    to_writer_with_opts(writer, root, SerOpts::new())
}

/// Encode a document to a writer with the given options.
pub fn to_writer_with_opts<W: Write>(mut writer: W, root: &Value, opts: SerOpts) -> Result<()> {
    let wrapper = match root {
        Value::Compound(c) if c.len() == 1 => c,
        _ => return Err(Error::no_root_compound()),
    };
    let (name, body) = match wrapper.iter().next() {
        Some((name, Value::Compound(body))) => (name, body),
        _ => return Err(Error::no_root_compound()),
    };

    if opts.max_depth == 0 {
        return Err(Error::too_deep(opts.max_depth));
    }

    let mut encoder = Encoder {
        writer: &mut writer,
        opts,
    };
    encoder.writer.write_tag(Tag::Compound)?;
    encoder.writer.write_size_prefixed_str(name, opts.string_encoding)?;
    encoder.tree(body)?;
    debug!("encoded root compound {:?} with {} entries", name, body.len());

    Ok(())
}

pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag as u8)?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, s: &str, encoding: StringEncoding) -> Result<()> {
        let bytes = match encoding {
            StringEncoding::Utf8 => std::borrow::Cow::Borrowed(s.as_bytes()),
            StringEncoding::Cesu8 => cesu8::to_java_cesu8(s),
        };
        let len = u16::try_from(bytes.len()).map_err(|_| Error::string_too_long(bytes.len()))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(&bytes)?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| Error::seq_too_long(len))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

/// A compound or list whose children are still being written.
enum Layer<'a> {
    Compound(map::Iter<'a, String, Value>),
    List(slice::Iter<'a, Value>),
}

struct Encoder<W: Write> {
    writer: W,
    opts: SerOpts,
}

impl<W: Write> Encoder<W> {
    /// Write the body of the root compound. Nesting is walked with an explicit
    /// stack, the root being the first layer.
    fn tree(&mut self, body: &Compound) -> Result<()> {
        let mut layers = vec![Layer::Compound(body.iter())];

        while let Some(top) = layers.last_mut() {
            let next = match top {
                Layer::Compound(entries) => match entries.next() {
                    Some((name, value)) => {
                        self.writer.write_tag(value.tag())?;
                        self.writer
                            .write_size_prefixed_str(name, self.opts.string_encoding)?;
                        Some(value)
                    }
                    None => {
                        self.writer.write_tag(Tag::End)?;
                        None
                    }
                },
                Layer::List(items) => items.next(),
            };

            let child = match next {
                None => {
                    layers.pop();
                    continue;
                }
                Some(Value::Compound(compound)) => Layer::Compound(compound.iter()),
                Some(Value::List(list)) => {
                    // The list guarantees every element has this tag.
                    self.writer.write_tag(list.element_tag())?;
                    self.writer.write_len(list.len())?;
                    Layer::List(list.iter())
                }
                Some(value) => {
                    self.scalar(value)?;
                    continue;
                }
            };

            if layers.len() >= self.opts.max_depth {
                return Err(Error::too_deep(self.opts.max_depth));
            }
            layers.push(child);
        }
        Ok(())
    }

    fn scalar(&mut self, value: &Value) -> Result<()> {
        let w = &mut self.writer;
        match value {
            Value::Byte(v) => w.write_i8(*v)?,
            Value::Short(v) => w.write_i16::<BigEndian>(*v)?,
            Value::Int(v) => w.write_i32::<BigEndian>(*v)?,
            Value::Long(v) => w.write_i64::<BigEndian>(*v)?,
            Value::Float(v) => w.write_f32::<BigEndian>(*v)?,
            Value::Double(v) => w.write_f64::<BigEndian>(*v)?,
            Value::String(s) => w.write_size_prefixed_str(s, self.opts.string_encoding)?,
            Value::ByteArray(data) => {
                w.write_len(data.len())?;
                let bytes: Vec<u8> = data.iter().map(|b| *b as u8).collect();
                w.write_all(&bytes)?;
            }
            Value::IntArray(data) => {
                w.write_len(data.len())?;
                for v in data {
                    w.write_i32::<BigEndian>(*v)?;
                }
            }
            Value::LongArray(data) => {
                w.write_len(data.len())?;
                for v in data {
                    w.write_i64::<BigEndian>(*v)?;
                }
            }
            // Opened as layers by the caller.
            Value::List(_) | Value::Compound(_) => {}
        }
        Ok(())
    }
}
