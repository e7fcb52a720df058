use super::*;
use bytes::Buf;
use tracing::debug;

/// Width of the length or integer field that follows a tag byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Width {
    /// One byte.
    W8,
    /// Two bytes.
    W16,
    /// Four bytes.
    W32,
    /// Eight bytes.
    W64,
}

impl Width {
    /// Size of the field in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Width::W8 => 1,
            Width::W16 => 2,
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }
}

/// A classified leading byte.
///
/// Fix forms carry the value or length embedded in the tag; the others name the width
/// of the field that follows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Positive fixint, carrying its value.
    PosFixint(u8),
    /// Negative fixint, carrying its value.
    NegFixint(i8),
    /// Fixmap, carrying its pair count.
    FixMap(u8),
    /// Fixarray, carrying its element count.
    FixArray(u8),
    /// Fixstr, carrying its byte length.
    FixStr(u8),
    /// Nil.
    Nil,
    /// Boolean false.
    False,
    /// Boolean true.
    True,
    /// Binary with a length field of the given width.
    Bin(Width),
    /// Extension with a length field of the given width.
    Ext(Width),
    /// Single precision float.
    Float32,
    /// Double precision float.
    Float64,
    /// Unsigned integer of the given width.
    Uint(Width),
    /// Signed integer of the given width.
    Int(Width),
    /// Fixext, carrying its payload length.
    FixExt(u8),
    /// String with a length field of the given width.
    Str(Width),
    /// Array with a count field of the given width.
    Array(Width),
    /// Map with a count field of the given width.
    Map(Width),
}

use Tag::*;

impl Tag {
    /// Classifies a leading byte. Returns `None` only for 0xc1, the one unused byte.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::encoding::{Tag, Width};
    ///
    /// assert_eq!(Tag::from_byte(0x93), Some(Tag::FixArray(3)));
    /// assert_eq!(Tag::from_byte(0xcd), Some(Tag::Uint(Width::W16)));
    /// assert_eq!(Tag::from_byte(0xff), Some(Tag::NegFixint(-1)));
    /// assert_eq!(Tag::from_byte(0xc1), None);
    /// ```
    pub fn from_byte(byte: u8) -> Option<Tag> {
        let tag = match byte {
            0x00..=POS_FIXINT_MAX => PosFixint(byte),
            NEG_FIXINT..=0xff => NegFixint(byte as i8),
            FIXMAP..=0x8f => FixMap(byte & MASK_FIXCOL_LEN),
            FIXARRAY..=0x9f => FixArray(byte & MASK_FIXCOL_LEN),
            FIXSTR..=0xbf => FixStr(byte & MASK_FIXSTR_LEN),
            NIL => Nil,
            FALSE => False,
            TRUE => True,
            BIN8 => Bin(Width::W8),
            BIN16 => Bin(Width::W16),
            BIN32 => Bin(Width::W32),
            EXT8 => Ext(Width::W8),
            EXT16 => Ext(Width::W16),
            EXT32 => Ext(Width::W32),
            FLOAT32 => Float32,
            FLOAT64 => Float64,
            UINT8 => Uint(Width::W8),
            UINT16 => Uint(Width::W16),
            UINT32 => Uint(Width::W32),
            UINT64 => Uint(Width::W64),
            INT8 => Int(Width::W8),
            INT16 => Int(Width::W16),
            INT32 => Int(Width::W32),
            INT64 => Int(Width::W64),
            FIXEXT1..=FIXEXT16 => FixExt(FIXEXT_LENS[(byte - FIXEXT1) as usize] as u8),
            STR8 => Str(Width::W8),
            STR16 => Str(Width::W16),
            STR32 => Str(Width::W32),
            ARRAY16 => Array(Width::W16),
            ARRAY32 => Array(Width::W32),
            MAP16 => Map(Width::W16),
            MAP32 => Map(Width::W32),
            _ => return None,
        };
        Some(tag)
    }

    /// Wire-format name, e.g. `"fixstr"` or `"uint16"`.
    pub fn name(self) -> &'static str {
        match self {
            PosFixint(_) => "positive fixint",
            NegFixint(_) => "negative fixint",
            FixMap(_) => "fixmap",
            FixArray(_) => "fixarray",
            FixStr(_) => "fixstr",
            Nil => "nil",
            False | True => "bool",
            Bin(Width::W8) => "bin8",
            Bin(Width::W16) => "bin16",
            Bin(_) => "bin32",
            Ext(Width::W8) => "ext8",
            Ext(Width::W16) => "ext16",
            Ext(_) => "ext32",
            Float32 => "float32",
            Float64 => "float64",
            Uint(Width::W8) => "uint8",
            Uint(Width::W16) => "uint16",
            Uint(Width::W32) => "uint32",
            Uint(Width::W64) => "uint64",
            Int(Width::W8) => "int8",
            Int(Width::W16) => "int16",
            Int(Width::W32) => "int32",
            Int(Width::W64) => "int64",
            FixExt(_) => "fixext",
            Str(Width::W8) => "str8",
            Str(Width::W16) => "str16",
            Str(_) => "str32",
            Array(Width::W16) => "array16",
            Array(_) => "array32",
            Map(Width::W16) => "map16",
            Map(_) => "map32",
        }
    }
}

/// A cursor over an in-memory buffer that decodes one value at a time.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// // two values back to back
/// let buf = [0x01, 0xa2, b'h', b'i'];
///
/// let mut d = Decoder::new(&buf);
/// assert_eq!(d.decode_value().unwrap(), Value::from(1));
/// assert_eq!(d.position(), 1);
/// assert_eq!(d.decode_value().unwrap(), Value::from("hi"));
/// assert_eq!(d.remaining(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
    limits: Limits,
}

impl<'a> Decoder<'a> {
    /// A decoder starting at the first byte of `buf`.
    pub fn new(buf: &'a [u8]) -> Self { Decoder::at(buf, 0) }

    /// A decoder starting at `offset`. An offset past the end is accepted; the first
    /// read then fails with [`Error::TruncatedInput`].
    pub fn at(buf: &'a [u8], offset: usize) -> Self {
        Decoder {
            buf,
            pos: offset,
            limits: Limits::default(),
        }
    }

    /// Replaces the default [`Limits`].
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Absolute offset of the next unread byte.
    pub fn position(&self) -> usize { self.pos }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize { self.buf.len().saturating_sub(self.pos) }

    #[inline]
    fn take_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn peek_byte(&self) -> Result<u8> {
        match self.buf.get(self.pos) {
            Some(byte) => Ok(*byte),
            None => Err(Error::truncated(self.pos, 1, 0)),
        }
    }

    #[inline]
    fn read_many(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if remaining >= len {
            let bs = &self.buf[self.pos..self.pos + len];
            self.pos += len;
            Ok(bs)
        } else {
            Err(Error::truncated(self.pos, len, remaining))
        }
    }

    #[inline]
    fn read_uint(&mut self, width: Width) -> Result<u64> {
        let mut bs = self.read_many(width.bytes())?;
        Ok(match width {
            Width::W8 => bs.get_u8() as u64,
            Width::W16 => bs.get_u16() as u64,
            Width::W32 => bs.get_u32() as u64,
            Width::W64 => bs.get_u64(),
        })
    }

    #[inline]
    fn read_len(&mut self, width: Width) -> Result<usize> { Ok(self.read_uint(width)? as usize) }

    /// Classifies the next byte without consuming it.
    ///
    /// # Errors
    ///
    /// [`Error::TruncatedInput`] at the end of the buffer, [`Error::UnknownFormat`] for
    /// a byte outside the format table.
    pub fn peek_tag(&self) -> Result<Tag> {
        let byte = self.peek_byte()?;
        Tag::from_byte(byte).ok_or_else(|| {
            debug!(tag = byte, offset = self.pos, "unknown format tag");
            Error::UnknownFormat {
                tag: byte,
                offset: self.pos,
            }
        })
    }

    /// Reads and classifies the next byte.
    pub fn read_tag(&mut self) -> Result<Tag> {
        let tag = self.peek_tag()?;
        self.pos += 1;
        Ok(tag)
    }

    /// Decodes the value starting at the current position and advances past it.
    ///
    /// # Errors
    ///
    /// Any decode error of [`Error`]. The position after a failure is unspecified.
    pub fn decode_value(&mut self) -> Result<Value> { self.decode_nested(0) }

    fn decode_nested(&mut self, depth: usize) -> Result<Value> {
        let v = match self.read_tag()? {
            Nil => Value::Nil,
            False => Value::Bool(false),
            True => Value::Bool(true),
            PosFixint(u) => Value::Int(Inum::Fix(u as i8)),
            NegFixint(i) => Value::Int(Inum::Fix(i)),
            Uint(width) => {
                let u = self.read_uint(width)?;
                Value::Int(match width {
                    Width::W8 => Inum::U8(u as u8),
                    Width::W16 => Inum::U16(u as u16),
                    Width::W32 => Inum::U32(u as u32),
                    Width::W64 => Inum::U64(u),
                })
            }
            Int(width) => {
                let u = self.read_uint(width)?;
                Value::Int(match width {
                    Width::W8 => Inum::I8(u as u8 as i8),
                    Width::W16 => Inum::I16(u as u16 as i16),
                    Width::W32 => Inum::I32(u as u32 as i32),
                    Width::W64 => Inum::I64(u as i64),
                })
            }
            Float32 => Value::Float(Float::Single(self.read_uint(Width::W32)? as u32)),
            Float64 => Value::Float(Float::Double(self.read_uint(Width::W64)?)),
            FixStr(len) => self.read_str(len as usize)?,
            Str(width) => {
                let len = self.read_len(width)?;
                self.read_str(len)?
            }
            Bin(width) => {
                let len = self.read_len(width)?;
                Value::Bin(Bytes::copy_from_slice(self.read_many(len)?))
            }
            FixExt(len) => self.read_ext(len as usize)?,
            Ext(width) => {
                let len = self.read_len(width)?;
                self.read_ext(len)?
            }
            FixArray(len) => self.read_array(len as usize, depth)?,
            Array(width) => {
                let len = self.read_len(width)?;
                self.read_array(len, depth)?
            }
            FixMap(len) => self.read_map(len as usize, depth)?,
            Map(width) => {
                let len = self.read_len(width)?;
                self.read_map(len, depth)?
            }
        };
        Ok(v)
    }

    fn read_str(&mut self, len: usize) -> Result<Value> {
        let offset = self.pos;
        let bs = self.read_many(len)?;
        match std::str::from_utf8(bs) {
            Ok(s) => Ok(Value::Str(s.to_owned())),
            Err(_) => Err(Error::InvalidUtf8 { offset }),
        }
    }

    fn read_ext(&mut self, len: usize) -> Result<Value> {
        let type_id = self.take_byte()? as i8;
        let data = Bytes::copy_from_slice(self.read_many(len)?);
        Ok(Value::Ext(type_id, data))
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        self.limits.enter(depth).map_err(|e| {
            debug!(offset = self.pos, depth, "container nesting too deep");
            e
        })
    }

    fn read_array(&mut self, len: usize, depth: usize) -> Result<Value> {
        let depth = self.enter(depth)?;
        // every element takes at least one byte
        let mut out = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            out.push(self.decode_nested(depth)?);
        }
        Ok(Value::Array(out))
    }

    fn read_map(&mut self, len: usize, depth: usize) -> Result<Value> {
        let depth = self.enter(depth)?;
        let mut out = VecMap::with_capacity(len.min(self.remaining() / 2));
        for _ in 0..len {
            let k = self.decode_nested(depth)?;
            let v = self.decode_nested(depth)?;
            out.push(k, v);
        }
        Ok(Value::Map(out))
    }
}

/// Yields back-to-back values until the buffer is exhausted. Iteration stops after the
/// first error.
impl<'a> Iterator for Decoder<'a> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Result<Value>> {
        if self.remaining() == 0 {
            return None;
        }
        let res = self.decode_value();
        if res.is_err() {
            self.pos = self.buf.len();
        }
        Some(res)
    }
}
