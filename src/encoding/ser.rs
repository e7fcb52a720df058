use super::*;
use crate::util::width_bytes;
use bytes::BytesMut;
use smallvec::SmallVec;

/// A sink that encoded bytes are written to.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8);
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]);
    /// The current write position.
    fn mark(&self) -> usize;
    /// Drops everything written after `mark`.
    fn rewind(&mut self, mark: usize);
    /// Return the output value.
    fn finalize(self) -> Self::Out;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) { self.push(u) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn mark(&self) -> usize { self.len() }

    fn rewind(&mut self, mark: usize) { self.truncate(mark) }

    fn finalize(self) -> Self::Out { self }
}

impl Serializer for BytesMut {
    type Out = Bytes;

    fn put_u8(&mut self, u: u8) { self.extend_from_slice(&[u]) }

    fn put_slice(&mut self, slice: &[u8]) { self.extend_from_slice(slice) }

    fn mark(&self) -> usize { self.len() }

    fn rewind(&mut self, mark: usize) { self.truncate(mark) }

    fn finalize(self) -> Self::Out { self.freeze() }
}

/// Per-format writers for [`Serializer`]. Each one picks the smallest tier that fits.
pub trait SerializerExt: Serializer {
    /// Add nil.
    fn put_nil(&mut self);
    /// Add a [`bool`].
    fn put_bool(&mut self, b: bool);
    /// Add a non-negative integer as a positive fixint or the narrowest uint tier.
    fn put_uint(&mut self, u: u64);
    /// Add an integer. Non-negative values take the unsigned forms, negative values a
    /// negative fixint or the narrowest int tier.
    fn put_int(&mut self, i: i64);
    /// Add an [`Inum`] by its numeric value.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::IntegerOutOfRange`] outside `[-2^63, 2^64 - 1]`.
    fn put_inum(&mut self, i: &Inum) -> Result<()>;
    /// Add an [`f32`] as float32.
    fn put_f32(&mut self, f: f32);
    /// Add an [`f64`] as float64.
    fn put_f64(&mut self, f: f64);
    /// Add a [`Float`] in the width it carries.
    fn put_float(&mut self, f: Float);
    /// Add a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::LengthOutOfRange`] past `2^32 - 1` bytes.
    fn put_str(&mut self, s: &str) -> Result<()>;
    /// Add a binary blob.
    fn put_bin(&mut self, b: &[u8]) -> Result<()>;
    /// Add an extension value. Payloads of 1, 2, 4, 8 or 16 bytes use fixext.
    fn put_ext(&mut self, type_id: i8, data: &[u8]) -> Result<()>;
    /// Add an array header. The caller writes `len` values after it.
    fn put_array_len(&mut self, len: usize) -> Result<()>;
    /// Add a map header. The caller writes `len` key, value pairs after it.
    fn put_map_len(&mut self, len: usize) -> Result<()>;
    /// Add a whole [`Value`] tree.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NestingTooDeep`] if containers nest deeper than `limits`
    /// allows, or with any error of the per-format writers.
    fn put_value(&mut self, v: &Value, limits: Limits) -> Result<()>;
}

/// Tag byte and length field for a length-prefixed family.
fn header(tiers: &Tiers, len: usize) -> Result<SmallVec<[u8; 5]>> {
    if len > MAX_LEN {
        return Err(Error::LengthOutOfRange {
            kind: tiers.kind,
            len,
        });
    }

    let mut out = SmallVec::new();

    if let Some((bits, max)) = tiers.fix {
        if len <= max {
            out.push(bits | len as u8);
            return Ok(out);
        }
    }

    match (tiers.w8, width_bytes(len as u64)) {
        (Some(tag), 1) => {
            out.push(tag);
            out.push(len as u8);
        }
        (_, 1) | (_, 2) => {
            out.push(tiers.w16);
            out.extend_from_slice(&(len as u16).to_be_bytes());
        }
        _ => {
            out.push(tiers.w32);
            out.extend_from_slice(&(len as u32).to_be_bytes());
        }
    }

    Ok(out)
}

fn put_nested<S: Serializer>(s: &mut S, v: &Value, limits: Limits, depth: usize) -> Result<()> {
    match v {
        Value::Nil => s.put_nil(),
        Value::Bool(b) => s.put_bool(*b),
        Value::Int(i) => s.put_inum(i)?,
        Value::Float(f) => s.put_float(*f),
        Value::Str(st) => s.put_str(st)?,
        Value::Bin(b) => s.put_bin(b)?,
        Value::Ext(ty, data) => s.put_ext(*ty, data)?,
        Value::Array(a) => {
            let depth = limits.enter(depth)?;
            s.put_array_len(a.len())?;
            for elem in a {
                put_nested(s, elem, limits, depth)?;
            }
        }
        Value::Map(m) => {
            let depth = limits.enter(depth)?;
            s.put_map_len(m.len())?;
            for (k, val) in m {
                put_nested(s, k, limits, depth)?;
                put_nested(s, val, limits, depth)?;
            }
        }
    }
    Ok(())
}

impl<S: Serializer> SerializerExt for S {
    fn put_nil(&mut self) { self.put_u8(NIL) }

    fn put_bool(&mut self, b: bool) {
        if b {
            self.put_u8(TRUE)
        } else {
            self.put_u8(FALSE)
        }
    }

    #[inline]
    fn put_uint(&mut self, u: u64) {
        if u <= POS_FIXINT_MAX as u64 {
            self.put_u8(u as u8);
            return;
        }
        match width_bytes(u) {
            1 => {
                self.put_u8(UINT8);
                self.put_u8(u as u8);
            }
            2 => {
                self.put_u8(UINT16);
                self.put_slice(&(u as u16).to_be_bytes());
            }
            4 => {
                self.put_u8(UINT32);
                self.put_slice(&(u as u32).to_be_bytes());
            }
            _ => {
                self.put_u8(UINT64);
                self.put_slice(&u.to_be_bytes());
            }
        }
    }

    #[inline]
    fn put_int(&mut self, i: i64) {
        if i >= 0 {
            self.put_uint(i as u64);
        } else if i >= NEG_FIXINT_MIN {
            self.put_u8(i as u8);
        } else if i >= i8::min_value() as i64 {
            self.put_u8(INT8);
            self.put_u8(i as i8 as u8);
        } else if i >= i16::min_value() as i64 {
            self.put_u8(INT16);
            self.put_slice(&(i as i16).to_be_bytes());
        } else if i >= i32::min_value() as i64 {
            self.put_u8(INT32);
            self.put_slice(&(i as i32).to_be_bytes());
        } else {
            self.put_u8(INT64);
            self.put_slice(&i.to_be_bytes());
        }
    }

    fn put_inum(&mut self, i: &Inum) -> Result<()> {
        let n = i.encodable()?;
        if n < 0 {
            self.put_int(n as i64);
        } else {
            self.put_uint(n as u64);
        }
        Ok(())
    }

    fn put_f32(&mut self, f: f32) { self.put_float(Float::from(f)) }

    fn put_f64(&mut self, f: f64) { self.put_float(Float::from(f)) }

    fn put_float(&mut self, f: Float) {
        match f {
            Float::Single(bits) => {
                self.put_u8(FLOAT32);
                self.put_slice(&bits.to_be_bytes());
            }
            Float::Double(bits) => {
                self.put_u8(FLOAT64);
                self.put_slice(&bits.to_be_bytes());
            }
        }
    }

    fn put_str(&mut self, s: &str) -> Result<()> {
        self.put_slice(&header(&STR_TIERS, s.len())?);
        self.put_slice(s.as_bytes());
        Ok(())
    }

    fn put_bin(&mut self, b: &[u8]) -> Result<()> {
        self.put_slice(&header(&BIN_TIERS, b.len())?);
        self.put_slice(b);
        Ok(())
    }

    fn put_ext(&mut self, type_id: i8, data: &[u8]) -> Result<()> {
        match FIXEXT_LENS.iter().position(|l| *l == data.len()) {
            Some(ix) => self.put_u8(FIXEXT1 + ix as u8),
            None => self.put_slice(&header(&EXT_TIERS, data.len())?),
        }
        self.put_u8(type_id as u8);
        self.put_slice(data);
        Ok(())
    }

    fn put_array_len(&mut self, len: usize) -> Result<()> {
        self.put_slice(&header(&ARRAY_TIERS, len)?);
        Ok(())
    }

    fn put_map_len(&mut self, len: usize) -> Result<()> {
        self.put_slice(&header(&MAP_TIERS, len)?);
        Ok(())
    }

    fn put_value(&mut self, v: &Value, limits: Limits) -> Result<()> {
        put_nested(self, v, limits, 0)
    }
}

/// A value that can be serialized.
pub trait Ser {
    /// Writes `self` to `s`, choosing the tier from the value's size.
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()>;

    /// Writes `self` as an element sitting below `depth` enclosing containers.
    ///
    /// Containers override this to count themselves against `limits`; scalars keep the
    /// default.
    fn ser_nested<S: Serializer>(&self, s: &mut S, _limits: Limits, _depth: usize) -> Result<()> {
        self.ser(s)
    }
}

impl<T: Ser + ?Sized> Ser for &T {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { (**self).ser(s) }

    fn ser_nested<S: Serializer>(&self, s: &mut S, limits: Limits, depth: usize) -> Result<()> {
        (**self).ser_nested(s, limits, depth)
    }
}

impl Ser for Value {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_value(self, Limits::default()) }

    fn ser_nested<S: Serializer>(&self, s: &mut S, limits: Limits, depth: usize) -> Result<()> {
        put_nested(s, self, limits, depth)
    }
}

impl Ser for Inum {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_inum(self) }
}

impl Ser for Float {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
        s.put_float(*self);
        Ok(())
    }
}

impl Ser for str {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_str(self) }
}

impl Ser for String {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_str(self) }
}

impl Ser for Bytes {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { s.put_bin(self) }
}

impl Ser for () {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
        s.put_nil();
        Ok(())
    }
}

impl<T: Ser> Ser for [T] {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
        self.ser_nested(s, Limits::default(), 0)
    }

    fn ser_nested<S: Serializer>(&self, s: &mut S, limits: Limits, depth: usize) -> Result<()> {
        let depth = limits.enter(depth)?;
        s.put_array_len(self.len())?;
        for t in self {
            t.ser_nested(s, limits, depth)?;
        }
        Ok(())
    }
}

impl<T: Ser> Ser for Vec<T> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> { self.as_slice().ser(s) }

    fn ser_nested<S: Serializer>(&self, s: &mut S, limits: Limits, depth: usize) -> Result<()> {
        self.as_slice().ser_nested(s, limits, depth)
    }
}

impl<T: Ser> Ser for Option<T> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
        self.ser_nested(s, Limits::default(), 0)
    }

    fn ser_nested<S: Serializer>(&self, s: &mut S, limits: Limits, depth: usize) -> Result<()> {
        match self {
            Some(t) => t.ser_nested(s, limits, depth),
            None => {
                s.put_nil();
                Ok(())
            }
        }
    }
}

macro_rules! infallible_ser {
    ($typ:ty, $put:ident) => {
        impl Ser for $typ {
            #[inline]
            fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
                s.$put((*self).into());
                Ok(())
            }
        }
    };
}

infallible_ser!(bool, put_bool);
infallible_ser!(u8, put_uint);
infallible_ser!(u16, put_uint);
infallible_ser!(u32, put_uint);
infallible_ser!(u64, put_uint);
infallible_ser!(i8, put_int);
infallible_ser!(i16, put_int);
infallible_ser!(i32, put_int);
infallible_ser!(i64, put_int);
infallible_ser!(f32, put_f32);
infallible_ser!(f64, put_f64);

impl Ser for usize {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
        s.put_uint(*self as u64);
        Ok(())
    }
}

impl Ser for isize {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<()> {
        s.put_int(*self as i64);
        Ok(())
    }
}
