//! # mpack
//!
//! A compact, self-describing binary codec for nested data, following the MessagePack
//! wire format.
//!
//! # Usage
//!
//! Every encodable thing is a [`Value`]. Build one directly or through `From`,
//! then encode it; decoding hands back the value together with the number of bytes it
//! took.
//!
//! ```
//! use mpack::prelude::*;
//!
//! let value = Value::from(vec![Value::from(1), Value::from("two"), Value::Nil]);
//!
//! // encode
//! let encoded = encode_full(&value).unwrap();
//!
//! // and then immediately decode
//! let (decoded, consumed) = decode_one(&encoded, 0).unwrap();
//!
//! assert_eq!(decoded, value);
//! assert_eq!(consumed, encoded.len());
//! ```
//!
//! Host types can be converted with the [`ValueRep`](rep::ValueRep) trait:
//!
//! ```
//! use mpack::prelude::*;
//!
//! let pair = (3u8, "three".to_string());
//! let back: (u8, String) = ValueRep::from_value(pair.to_value()).unwrap();
//! assert_eq!(back, pair);
//! ```
//!
//! # Data model
//!
//! | Variant          | Payload                                                   |
//! | ---              | ---                                                       |
//! | [`Value::Nil`]   | none                                                      |
//! | [`Value::Bool`]  | `bool`                                                    |
//! | [`Value::Int`]   | an [`Inum`]: fixint, `u8`..`u64`, `i8`..`i64`, or a `BigInt` |
//! | [`Value::Float`] | a [`Float`], single or double precision                   |
//! | [`Value::Str`]   | UTF-8 text                                                |
//! | [`Value::Bin`]   | raw bytes                                                 |
//! | [`Value::Array`] | a [`Vec`] of values                                       |
//! | [`Value::Map`]   | a [`VecMap`] of value pairs, in insertion order           |
//! | [`Value::Ext`]   | an application type id and raw bytes                      |
//!
//! Integers keep the width they were decoded with, but compare by numeric value.
//!
//! # Wire format
//!
//! ## Tags
//!
//! The first byte of every value is its *tag*. Small integers and the lengths of small
//! strings, arrays and maps live in the low bits of the tag. Everything else names the
//! width of a big-endian field that follows.
//!
//! | Byte          | Meaning                                     |
//! | ---           | ---                                         |
//! | `0x00`-`0x7f` | positive fixint, the byte is the value      |
//! | `0x80`-`0x8f` | fixmap, low nibble is the pair count        |
//! | `0x90`-`0x9f` | fixarray, low nibble is the element count   |
//! | `0xa0`-`0xbf` | fixstr, low five bits are the byte length   |
//! | `0xc0`        | nil                                         |
//! | `0xc2`/`0xc3` | false / true                                |
//! | `0xc4`-`0xc6` | bin 8/16/32                                 |
//! | `0xc7`-`0xc9` | ext 8/16/32: length, type id, payload       |
//! | `0xca`/`0xcb` | float 32 / float 64                         |
//! | `0xcc`-`0xcf` | uint 8/16/32/64                             |
//! | `0xd0`-`0xd3` | int 8/16/32/64                              |
//! | `0xd4`-`0xd8` | fixext 1/2/4/8/16: type id, payload         |
//! | `0xd9`-`0xdb` | str 8/16/32                                 |
//! | `0xdc`/`0xdd` | array 16/32                                 |
//! | `0xde`/`0xdf` | map 16/32                                   |
//! | `0xe0`-`0xff` | negative fixint, value is `byte - 256`      |
//!
//! `0xc1` is never valid.
//!
//! ## Integers
//!
//! Integers take the smallest form that holds them exactly. Non-negative values use a
//! positive fixint up to 127, then the narrowest of uint 8/16/32/64. Negative values use
//! a negative fixint down to -32, then the narrowest of int 8/16/32/64. The sign picks
//! the family, not the declared width: a signed 200 is written as uint 8.
//!
//! ## Strings, binaries and extensions
//!
//! Strings take a fixstr up to 31 bytes, then str 8, 16 or 32 by length. Binaries have
//! no fix form. Extensions whose payload is exactly 1, 2, 4, 8 or 16 bytes use fixext;
//! any other length uses ext 8, 16 or 32.
//!
//! ## Arrays and maps
//!
//! Up to 15 items fit the fix form, then 16 and 32-bit counts. The payload is each
//! element in order; for maps, each key followed by its value.
//!
//! Decoding recurses once per nested container, bounded by [`Limits`].

#![warn(
//    missing_docs,
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod encoding;
pub mod errors;
pub mod float;
pub mod inum;
pub mod limits;
pub mod prelude;
pub mod rep;
mod util;
pub mod vecmap;

use bytes::Bytes;
use errors::{Error, Result};
use num_bigint::BigInt;
use std::convert::TryFrom;

pub use float::Float;
pub use inum::Inum;
pub use limits::Limits;
pub use vecmap::VecMap;

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// A decoded or to-be-encoded value.
///
/// # Example
///
/// ```
/// use mpack::prelude::*;
///
/// let b = Value::Bool(true);
///
/// let val = match b {
///     Value::Bool(b) => b,
///     _ => panic!(),
/// };
///
/// assert!(val);
/// ```
pub enum Value {
    /// The absent value.
    Nil,
    /// Boolean.
    Bool(bool),
    /// Integer.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let k_num = Value::Int(Inum::U16(300));
    /// assert_eq!(encode_full(&k_num).unwrap(), vec![0xcd, 0x01, 0x2c]);
    /// ```
    Int(Inum),
    /// Floating point number.
    Float(Float),
    /// UTF-8 string.
    Str(String),
    /// Raw binary.
    Bin(Bytes),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Ordered key-value pairs. Keys are full values.
    Map(VecMap<Value, Value>),
    /// Extension: an application-defined type id and its payload.
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let ext = Value::Ext(1, Bytes::from_static(&[2]));
    /// assert_eq!(encode_full(&ext).unwrap(), vec![0xd4, 0x01, 0x02]);
    /// ```
    Ext(i8, Bytes),
}

use Value::*;

impl Value {
    /// Name of the variant, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Nil => "nil",
            Bool(_) => "bool",
            Int(_) => "integer",
            Float(_) => "float",
            Str(_) => "string",
            Bin(_) => "binary",
            Array(_) => "array",
            Map(_) => "map",
            Ext(..) => "extension",
        }
    }

    /// Indicates whether a value is [`Value::Nil`].
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::Value::Nil;
    ///
    /// let foo = Nil;
    ///
    /// assert!(foo.is_nil());
    /// ```
    pub fn is_nil(&self) -> bool {
        match self {
            Nil => true,
            _ => false,
        }
    }

    /// Tries to convert a value to a [`bool`].
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Bool(b) => Ok(*b),
            other => Err(Error::conversion("bool", other.type_name())),
        }
    }

    /// Tries to borrow the value as an [`Inum`].
    pub fn as_inum(&self) -> Result<&Inum> {
        match self {
            Int(i) => Ok(i),
            other => Err(Error::conversion("integer", other.type_name())),
        }
    }

    /// Tries to read the value as an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// assert_eq!(Value::from(-3).as_i64().unwrap(), -3);
    /// assert!(Value::from(u64::max_value()).as_i64().is_err());
    /// ```
    pub fn as_i64(&self) -> Result<i64> { i64::try_from(self.as_inum()?) }

    /// Tries to read the value as a `u64`.
    pub fn as_u64(&self) -> Result<u64> { u64::try_from(self.as_inum()?) }

    /// Tries to read the value as an `f64`. Both float widths are accepted.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Float(f) => Ok(f.to_f64()),
            other => Err(Error::conversion("float", other.type_name())),
        }
    }

    /// Tries to borrow the value as a string.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Str(s) => Ok(s),
            other => Err(Error::conversion("string", other.type_name())),
        }
    }

    /// Tries to borrow the value as binary.
    pub fn as_bin(&self) -> Result<&Bytes> {
        match self {
            Bin(b) => Ok(b),
            other => Err(Error::conversion("binary", other.type_name())),
        }
    }

    /// Tries to borrow the value as an array.
    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Array(a) => Ok(a),
            other => Err(Error::conversion("array", other.type_name())),
        }
    }

    /// Consumes the value, converting it into a vector of values.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let ks = Value::from(vec![1, 2, 3]);
    ///
    /// let k_numbers = ks.into_array().unwrap();
    /// assert_eq!(k_numbers.len(), 3);
    /// ```
    pub fn into_array(self) -> Result<Vec<Value>> {
        match self {
            Array(a) => Ok(a),
            other => Err(Error::conversion("array", other.type_name())),
        }
    }

    /// Tries to borrow the value as a map.
    pub fn as_map(&self) -> Result<&VecMap<Value, Value>> {
        match self {
            Map(m) => Ok(m),
            other => Err(Error::conversion("map", other.type_name())),
        }
    }

    /// Consumes the value, converting it into a [`VecMap`].
    pub fn into_map(self) -> Result<VecMap<Value, Value>> {
        match self {
            Map(m) => Ok(m),
            other => Err(Error::conversion("map", other.type_name())),
        }
    }

    /// Tries to borrow the value as an extension's type id and payload.
    pub fn as_ext(&self) -> Result<(i8, &Bytes)> {
        match self {
            Ext(ty, data) => Ok((*ty, data)),
            other => Err(Error::conversion("extension", other.type_name())),
        }
    }

    /// Looks up the first entry whose key equals `key`, if this is a map.
    ///
    /// Keys match on their full typed value, so an integer key never matches a float.
    ///
    /// # Example
    ///
    /// ```
    /// use mpack::prelude::*;
    ///
    /// let m = decode_full(&[0x81, 0xa3, b'k', b'e', b'y', 0x01]).unwrap();
    ///
    /// assert_eq!(m.get(&Value::from("key")), Some(&Value::from(1)));
    /// assert_eq!(m.get(&Value::from("nope")), None);
    /// ```
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Map(m) => m.get(key),
            _ => None,
        }
    }
}

fn fmt_bytes(f: &mut std::fmt::Formatter, bytes: &[u8]) -> std::fmt::Result {
    write!(f, "b\"")?;
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    write!(f, "\"")
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Nil => write!(f, "nil"),
            Bool(b) => write!(f, "{}", b),
            Int(i) => write!(f, "{}", i),
            Float(x) => write!(f, "{}", x),
            Str(s) => write!(f, "{:?}", s),
            Bin(b) => fmt_bytes(f, b),
            Ext(ty, data) => {
                write!(f, "ext({}, ", ty)?;
                fmt_bytes(f, data)?;
                write!(f, ")")
            }
            Array(a) => {
                write!(f, "[")?;
                for (i, v) in a.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value { Str(s.to_owned()) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Array(v.into_iter().map(T::into).collect()) }
}

impl<K: Into<Value>, V: Into<Value>> From<VecMap<K, V>> for Value {
    fn from(m: VecMap<K, V>) -> Value { Map(m.into_iter().map(|(k, v)| (k.into(), v.into())).collect()) }
}

impl From<()> for Value {
    fn from(_: ()) -> Value { Nil }
}

from_fn!(Value, bool, Bool);
from_fn!(Value, Inum, Int);
from_fn!(Value, Float, Float);
from_fn!(Value, String, Str);
from_fn!(Value, Bytes, Bin);

// Integers
compose_from!(Value, Inum, u8);
compose_from!(Value, Inum, u16);
compose_from!(Value, Inum, u32);
compose_from!(Value, Inum, u64);
compose_from!(Value, Inum, usize);
compose_from!(Value, Inum, u128);
compose_from!(Value, Inum, i8);
compose_from!(Value, Inum, i16);
compose_from!(Value, Inum, i32);
compose_from!(Value, Inum, i64);
compose_from!(Value, Inum, isize);
compose_from!(Value, Inum, i128);
compose_from!(Value, Inum, BigInt);

// Floats
compose_from!(Value, Float, f32);
compose_from!(Value, Float, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Nil.is_nil());

        assert!(Value::from(5).as_inum().is_ok());

        assert!(Value::from(true).as_bool().unwrap());

        assert_eq!(Value::from("word").as_str().unwrap(), "word");

        assert_eq!(
            Value::from(1).as_str(),
            Err(Error::Conversion {
                expected: "string",
                found: "integer"
            })
        );
    }

    #[test]
    fn display() {
        let mut m = VecMap::new();
        m.push(Value::from("a"), Value::from(vec![1, 2]));
        m.push(Value::from(7), Value::Bin(Bytes::from_static(&[0xab, 0x01])));
        let v = Value::from(vec![Value::Map(m), Nil, Value::from(1.5)]);
        assert_eq!(v.to_string(), r#"[{"a": [1, 2], 7: b"ab01"}, nil, 1.5]"#);
    }

    #[test]
    fn int_keys_equal_across_widths() {
        let m: VecMap<Value, Value> = vec![(Value::Int(Inum::U8(1)), Nil)].into();
        let v = Map(m);
        assert!(v.get(&Value::Int(Inum::I64(1))).is_some());
        assert!(v.get(&Value::from(1.0f64)).is_none());
    }
}
