use std::convert::TryFrom;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::{
    error::{Error, Result},
    StringEncoding, Tag,
};

/// Most we reserve up front for a declared length. Longer sequences grow as
/// the data actually arrives.
const MAX_PREALLOC: usize = 4096;

/// Byte-level NBT input over any reader. Every `consume_*` either reads the
/// whole field or fails; a short read is always `UnexpectedEof`.
pub(crate) struct Input<R: Read> {
    reader: R,
}

impl<R: Read> Input<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader }
    }

    pub(crate) fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.reader.read_u8()?)
    }

    pub(crate) fn consume_tag(&mut self) -> Result<Tag> {
        let tag = self.consume_byte()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    pub(crate) fn consume_i8(&mut self) -> Result<i8> {
        Ok(self.reader.read_i8()?)
    }

    pub(crate) fn consume_i16(&mut self) -> Result<i16> {
        Ok(self.reader.read_i16::<BigEndian>()?)
    }

    pub(crate) fn consume_i32(&mut self) -> Result<i32> {
        Ok(self.reader.read_i32::<BigEndian>()?)
    }

    pub(crate) fn consume_i64(&mut self) -> Result<i64> {
        Ok(self.reader.read_i64::<BigEndian>()?)
    }

    pub(crate) fn consume_f32(&mut self) -> Result<f32> {
        Ok(self.reader.read_f32::<BigEndian>()?)
    }

    pub(crate) fn consume_f64(&mut self) -> Result<f64> {
        Ok(self.reader.read_f64::<BigEndian>()?)
    }

    /// Consume a signed 32 bit length, as used by lists and arrays.
    pub(crate) fn consume_len(&mut self, max: usize) -> Result<usize> {
        let len = self.consume_i32()?;
        let len = usize::try_from(len).map_err(|_| Error::negative_length(len))?;
        if len > max {
            return Err(Error::seq_too_long(len));
        }
        Ok(len)
    }

    /// Consume a u16 length prefixed string.
    pub(crate) fn consume_str(&mut self, encoding: StringEncoding) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;
        let buf = self.consume_bytes(len)?;

        match encoding {
            StringEncoding::Utf8 => {
                String::from_utf8(buf).map_err(|e| Error::nonunicode_string(e.as_bytes()))
            }
            StringEncoding::Cesu8 => cesu8::from_java_cesu8(&buf)
                .map(|s| s.into_owned())
                .map_err(|_| Error::nonunicode_string(&buf)),
        }
    }

    /// Consume exactly `n` raw bytes.
    pub(crate) fn consume_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(n.min(MAX_PREALLOC));
        (&mut self.reader).take(n as u64).read_to_end(&mut buf)?;
        if buf.len() != n {
            return Err(Error::unexpected_eof());
        }
        Ok(buf)
    }

    pub(crate) fn consume_i8_array(&mut self, n: usize) -> Result<Vec<i8>> {
        Ok(self.consume_bytes(n)?.into_iter().map(|b| b as i8).collect())
    }

    pub(crate) fn consume_i32_array(&mut self, n: usize) -> Result<Vec<i32>> {
        let mut data = Vec::with_capacity(n.min(MAX_PREALLOC));
        for _ in 0..n {
            data.push(self.consume_i32()?);
        }
        Ok(data)
    }

    pub(crate) fn consume_i64_array(&mut self, n: usize) -> Result<Vec<i64>> {
        let mut data = Vec::with_capacity(n.min(MAX_PREALLOC));
        for _ in 0..n {
            data.push(self.consume_i64()?);
        }
        Ok(data)
    }
}
